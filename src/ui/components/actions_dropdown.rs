//! Row action menu ("⋯" trigger).

use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionItem {
    pub id: String,
    pub label: String,
    pub variant: ActionVariant,
    pub hidden: bool,
    pub disabled: bool,
}

impl ActionItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant: ActionVariant::Default,
            hidden: false,
            disabled: false,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.variant = ActionVariant::Destructive;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Menu line: an item (index into the visible items) or a separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Item(usize),
    Separator,
}

#[derive(Default)]
pub struct ActionsDropdown {
    items: Vec<ActionItem>,
    is_open: bool,
    highlighted: Option<usize>,
    trigger_area: Rect,
    menu_area: Rect,
}

impl ActionsDropdown {
    pub fn new(items: Vec<ActionItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn set_items(&mut self, items: Vec<ActionItem>) {
        self.items = items;
        self.highlighted = None;
        if self.visible_items().is_empty() {
            self.is_open = false;
        }
    }

    pub fn visible_items(&self) -> Vec<&ActionItem> {
        self.items.iter().filter(|item| !item.hidden).collect()
    }

    /// Nothing is drawn, and no key is handled, when every item is hidden.
    pub fn is_rendered(&self) -> bool {
        self.items.iter().any(|item| !item.hidden)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn highlighted(&self) -> Option<&ActionItem> {
        self.visible_items().get(self.highlighted?).copied()
    }

    /// Visible items with a separator after each destructive item that is
    /// not the last one.
    pub fn rows(&self) -> Vec<MenuRow> {
        let visible = self.visible_items();
        let mut rows = Vec::with_capacity(visible.len() * 2);
        for (index, item) in visible.iter().enumerate() {
            rows.push(MenuRow::Item(index));
            if item.variant == ActionVariant::Destructive && index + 1 < visible.len() {
                rows.push(MenuRow::Separator);
            }
        }
        rows
    }

    pub fn open(&mut self) {
        if !self.is_rendered() {
            return;
        }
        self.is_open = true;
        self.highlighted = None;
        self.navigate(true);
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.highlighted = None;
    }

    /// Move to the next enabled item, wrapping. Stays put when every
    /// visible item is disabled.
    pub fn navigate(&mut self, forward: bool) {
        let visible = self.visible_items();
        let len = visible.len();
        if len == 0 {
            return;
        }

        let start = match (self.highlighted, forward) {
            (Some(index), _) => index,
            (None, true) => len - 1,
            (None, false) => 0,
        };
        for step in 1..=len {
            let candidate = if forward {
                (start + step) % len
            } else {
                (start + len - step) % len
            };
            if !visible[candidate].disabled {
                self.highlighted = Some(candidate);
                return;
            }
        }
    }

    /// Fire the visible item at `index`. Disabled items do nothing.
    pub fn activate(&mut self, index: usize) -> Action {
        let Some(item) = self.visible_items().get(index).copied() else {
            return Action::None;
        };
        if item.disabled {
            return Action::None;
        }
        let action = Action::MenuAction(item.id.clone());
        self.close();
        action
    }
}

impl Component for ActionsDropdown {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.is_rendered() {
            return Action::None;
        }
        if !self.is_open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('.')) {
                self.open();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.navigate(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.navigate(false);
                Action::None
            }
            KeyCode::Enter => match self.highlighted {
                Some(index) => self.activate(index),
                None => Action::None,
            },
            KeyCode::Esc => {
                self.close();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !self.is_rendered() || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }
        let point = Position::new(mouse.column, mouse.row);

        if self.trigger_area.contains(point) {
            if self.is_open {
                self.close();
            } else {
                self.open();
            }
            return Action::None;
        }
        if self.is_open && self.menu_area.contains(point) {
            let row = mouse.row.saturating_sub(self.menu_area.y + 1) as usize;
            if let Some(MenuRow::Item(index)) = self.rows().get(row).copied() {
                return self.activate(index);
            }
            return Action::None;
        }
        self.close();
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.is_rendered() {
            self.trigger_area = Rect::default();
            return;
        }
        self.trigger_area = rect;
        let border = if self.is_open { Color::Cyan } else { Color::Gray };
        f.render_widget(
            Paragraph::new("⋯").alignment(ratatui::layout::Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            ),
            rect,
        );
        if !self.is_open {
            return;
        }

        let visible = self.visible_items();
        let rows = self.rows();
        let width = visible
            .iter()
            .map(|item| item.label.chars().count() as u16 + 4)
            .max()
            .unwrap_or(10)
            .max(12);
        let lines: Vec<Line> = rows
            .iter()
            .map(|row| match row {
                MenuRow::Separator => Line::from(Span::styled(
                    "─".repeat(width as usize - 2),
                    Style::default().fg(Color::DarkGray),
                )),
                MenuRow::Item(index) => {
                    let item = visible[*index];
                    let mut style = match (item.disabled, item.variant) {
                        (true, _) => Style::default().fg(Color::DarkGray),
                        (false, ActionVariant::Destructive) => Style::default().fg(Color::Red),
                        (false, ActionVariant::Default) => Style::default().fg(Color::White),
                    };
                    if self.highlighted == Some(*index) {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Line::from(Span::styled(format!(" {}", item.label), style))
                }
            })
            .collect();

        let screen = f.area();
        let height = rows.len() as u16 + 2;
        let x = rect.right().saturating_sub(width);
        let y = if rect.bottom() + height <= screen.bottom() {
            rect.bottom()
        } else {
            rect.y.saturating_sub(height)
        };
        let menu_area = Rect::new(x, y, width.min(screen.width), height.min(screen.height));
        f.render_widget(Clear, menu_area);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            menu_area,
        );
        self.menu_area = menu_area;
    }

    fn on_blur(&mut self) {
        self.close();
    }
}
