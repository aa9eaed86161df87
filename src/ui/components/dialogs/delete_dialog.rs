//! Delete confirmation dialog

use super::common::{create_button_span, create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::constants::{DELETE_CANCEL, DELETE_CONFIRM, DELETE_DESCRIPTION, DELETE_TITLE};
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde::{Deserialize, Serialize};

/// Size of the trigger icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconSize {
    Xs,
    #[default]
    Sm,
    Md,
    Lg,
    Xl,
}

impl IconSize {
    /// Square icon dimensions, in pixels.
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            IconSize::Xs => (8, 8),
            IconSize::Sm => (12, 12),
            IconSize::Md => (16, 16),
            IconSize::Lg => (20, 20),
            IconSize::Xl => (24, 24),
        }
    }

    /// Trigger width in terminal columns, borders included.
    pub fn trigger_columns(self) -> u16 {
        self.dimensions().0 / 4 + 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogButton {
    Cancel,
    Confirm,
}

pub struct DeleteDialog {
    title: String,
    description: String,
    confirm_text: String,
    cancel_text: String,
    icon_size: IconSize,
    disabled: bool,
    target: Option<String>,
    focus: DialogButton,
    trigger_area: Rect,
    cancel_area: Rect,
    confirm_area: Rect,
}

impl Default for DeleteDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl DeleteDialog {
    pub fn new() -> Self {
        Self {
            title: DELETE_TITLE.to_string(),
            description: DELETE_DESCRIPTION.to_string(),
            confirm_text: DELETE_CONFIRM.to_string(),
            cancel_text: DELETE_CANCEL.to_string(),
            icon_size: IconSize::default(),
            disabled: false,
            target: None,
            focus: DialogButton::Cancel,
            trigger_area: Rect::default(),
            cancel_area: Rect::default(),
            confirm_area: Rect::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }

    pub fn with_icon_size(mut self, size: IconSize) -> Self {
        self.icon_size = size;
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn icon_size(&self) -> IconSize {
        self.icon_size
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn focus(&self) -> DialogButton {
        self.focus
    }

    /// Ask for confirmation about `target`. Ignored while disabled.
    pub fn open(&mut self, target: impl Into<String>) {
        if self.disabled {
            return;
        }
        self.target = Some(target.into());
        self.focus = DialogButton::Cancel;
    }

    pub fn confirm(&mut self) -> Action {
        match self.target.take() {
            Some(target) => {
                log::info!("Delete confirmed for {}", target);
                Action::DeleteConfirmed(target)
            }
            None => Action::None,
        }
    }

    pub fn cancel(&mut self) -> Action {
        if self.target.take().is_some() {
            Action::HideDialog
        } else {
            Action::None
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            DialogButton::Cancel => DialogButton::Confirm,
            DialogButton::Confirm => DialogButton::Cancel,
        };
    }

    /// Small outlined trash button sized from the icon size.
    pub fn render_trigger(&mut self, f: &mut Frame, rect: Rect) {
        let width = self.icon_size.trigger_columns().min(rect.width);
        self.trigger_area = Rect::new(rect.x, rect.y, width, rect.height.min(3));
        let style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Red)
        };
        f.render_widget(
            Paragraph::new("🗑").alignment(Alignment::Center).style(style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Gray)),
            ),
            self.trigger_area,
        );
    }

    pub fn trigger_area(&self) -> Rect {
        self.trigger_area
    }

    /// Left press on the trash button while enabled.
    pub fn trigger_clicked(&self, mouse: &MouseEvent) -> bool {
        !self.disabled
            && matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            && self.trigger_area.contains(Position::new(mouse.column, mouse.row))
    }
}

impl Component for DeleteDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.is_open() {
            return Action::None;
        }
        match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                self.toggle_focus();
                Action::None
            }
            KeyCode::Enter => match self.focus {
                DialogButton::Confirm => self.confirm(),
                DialogButton::Cancel => self.cancel(),
            },
            KeyCode::Char('y') => self.confirm(),
            KeyCode::Char('n') | KeyCode::Esc => self.cancel(),
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !self.is_open() || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }
        let point = Position::new(mouse.column, mouse.row);
        if self.confirm_area.contains(point) {
            self.confirm()
        } else if self.cancel_area.contains(point) {
            self.cancel()
        } else {
            Action::None
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let Some(target) = self.target.clone() else {
            return;
        };

        let area = LayoutManager::centered_rect(50, 35, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(" ⚠️  Confirmation ", Color::Red);
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height < 6 {
            return;
        }

        let text = vec![
            Line::from(Span::styled(
                self.title.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(format!("\"{target}\""), Style::default().fg(Color::Yellow))),
            Line::from(""),
            Line::from(Span::styled(self.description.clone(), Style::default().fg(Color::Gray))),
        ];
        f.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }),
            Rect::new(inner.x, inner.y, inner.width, inner.height - 2),
        );

        let cancel = create_button_span(&self.cancel_text, self.focus == DialogButton::Cancel, Color::Gray);
        let confirm = create_button_span(&self.confirm_text, self.focus == DialogButton::Confirm, Color::Red);
        let cancel_width = cancel.width() as u16;
        let confirm_width = confirm.width() as u16;
        let buttons_y = inner.bottom() - 2;
        let start = inner.x + inner.width.saturating_sub(cancel_width + confirm_width + 2) / 2;
        self.cancel_area = Rect::new(start, buttons_y, cancel_width, 1);
        self.confirm_area = Rect::new(start + cancel_width + 2, buttons_y, confirm_width, 1);
        f.render_widget(Paragraph::new(Line::from(cancel)), self.cancel_area);
        f.render_widget(Paragraph::new(Line::from(confirm)), self.confirm_area);

        f.render_widget(
            create_instructions_paragraph(&[shortcuts::TAB_SWITCH, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]),
            Rect::new(inner.x, inner.bottom() - 1, inner.width, 1),
        );
    }
}
