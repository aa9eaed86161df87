//! Searchable single-selection dropdown.
//!
//! A trigger shows the selected label (or a placeholder). Opening it pops a
//! list filtered live by a search field; the list is driven with the arrow
//! keys, Enter commits, Escape or a click anywhere outside dismisses.
//!
//! Outside clicks are observed through a [`PointerHub`] subscription held
//! only while the list is open.

mod state;

pub use state::{filter_options, Direction, MatchMode, SelectOption, SelectionState};

use crate::constants::{EMPTY_RESULTS, SEARCH_PLACEHOLDER, SELECT_PLACEHOLDER};
use crate::ui::components::scrollbar_helper::ScrollbarHelper;
use crate::ui::components::variants::{ButtonVariant, PopupWidth, SizeVariant};
use crate::ui::core::{Action, Component, PointerHub, PointerSubscription};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub struct SearchableSelector {
    id: String,
    options: Vec<SelectOption>,
    state: SelectionState,
    mode: MatchMode,
    disabled: bool,
    size: SizeVariant,
    button: ButtonVariant,
    label: Option<String>,
    error: Option<String>,
    placeholder: String,
    search_placeholder: String,
    empty_text: String,
    search_focused: bool,
    pointer_hub: Option<PointerHub>,
    subscription: Option<PointerSubscription>,
    area: Rect,
    trigger_area: Rect,
    popup_area: Rect,
    list_area: Rect,
    list_state: ListState,
    scrollbar: ScrollbarHelper,
}

impl SearchableSelector {
    pub fn new(id: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let state = SelectionState::new(&options, None);
        Self {
            id: id.into(),
            options,
            state,
            mode: MatchMode::Label,
            disabled: false,
            size: SizeVariant::default(),
            button: ButtonVariant::default(),
            label: None,
            error: None,
            placeholder: SELECT_PLACEHOLDER.to_string(),
            search_placeholder: SEARCH_PLACEHOLDER.to_string(),
            empty_text: EMPTY_RESULTS.to_string(),
            search_focused: false,
            pointer_hub: None,
            subscription: None,
            area: Rect::default(),
            trigger_area: Rect::default(),
            popup_area: Rect::default(),
            list_area: Rect::default(),
            list_state: ListState::default(),
            scrollbar: ScrollbarHelper::new(),
        }
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self.state.refilter(&self.options, mode);
        self
    }

    pub fn with_value(mut self, value: Option<String>) -> Self {
        self.state.set_selected_value(value);
        self
    }

    pub fn with_size(mut self, size: SizeVariant) -> Self {
        self.size = size;
        self
    }

    pub fn with_button_variant(mut self, button: ButtonVariant) -> Self {
        self.button = button;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_search_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.search_placeholder = placeholder.into();
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Watch clicks outside the selector through `hub` while open.
    pub fn with_pointer_hub(mut self, hub: PointerHub) -> Self {
        self.pointer_hub = Some(hub);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    pub fn has_pointer_subscription(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replace the option list. The filtered view is recomputed and the
    /// highlight cleared.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.state.refilter(&self.options, self.mode);
    }

    /// Controlled value coming from the owner.
    pub fn set_value(&mut self, value: Option<String>) {
        self.state.set_selected_value(value);
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.is_open() {
            self.dismiss();
        }
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|error| !error.is_empty());
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        let value = self.state.selected_value()?;
        self.options.iter().find(|option| option.value == value)
    }

    /// Text shown on the trigger.
    pub fn display_text(&self) -> &str {
        self.selected_option()
            .map(|option| option.label.as_str())
            .unwrap_or(&self.placeholder)
    }

    /// Options in the current filtered view, in display order.
    pub fn visible_options(&self) -> Vec<&SelectOption> {
        self.state
            .filtered()
            .iter()
            .filter_map(|index| self.options.get(*index))
            .collect()
    }

    pub fn open(&mut self) {
        if self.disabled || self.is_open() {
            return;
        }
        self.state.open(&self.options, self.mode);
        self.search_focused = true;
        self.list_state.select(None);
        // The popup area is only known after the next render
        let boundary = self.area;
        self.subscription = self.pointer_hub.as_ref().map(|hub| hub.subscribe(boundary));
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.dismiss();
        } else {
            self.open();
        }
    }

    pub fn filter(&mut self, term: &str) {
        self.state.set_search_term(term, &self.options, self.mode);
    }

    pub fn clear_search(&mut self) {
        self.filter("");
        self.search_focused = true;
    }

    /// Arrow-key handling. A closed selector opens on `Down`.
    pub fn navigate(&mut self, direction: Direction) {
        if !self.is_open() {
            if direction == Direction::Down {
                self.open();
            }
            return;
        }
        self.state.navigate(direction);
    }

    /// Commit a row of the filtered view, or the highlighted one.
    pub fn commit(&mut self, index: Option<usize>) -> Action {
        match self.state.commit(index, &self.options, self.mode) {
            Some(value) => {
                self.release();
                log::info!("Selector {}: value changed to '{}'", self.id, value);
                Action::SelectionChanged {
                    selector: self.id.clone(),
                    value,
                }
            }
            None => Action::None,
        }
    }

    /// Close without changing the selection.
    pub fn dismiss(&mut self) {
        self.state.close(&self.options, self.mode);
        self.release();
    }

    /// Dismiss if the hub saw a press outside since the last check.
    pub fn handle_outside_click(&mut self) -> Action {
        let clicked_outside = self
            .subscription
            .as_ref()
            .is_some_and(PointerSubscription::take_outside_click);
        if clicked_outside {
            self.dismiss();
        }
        Action::None
    }

    fn release(&mut self) {
        self.search_focused = false;
        self.subscription = None;
        self.popup_area = Rect::default();
        self.list_area = Rect::default();
    }

    fn push_search_char(&mut self, c: char) {
        let mut term = self.state.search_term().to_string();
        term.push(c);
        self.filter(&term);
    }

    fn pop_search_char(&mut self) {
        let mut term = self.state.search_term().to_string();
        if term.pop().is_some() {
            self.filter(&term);
        }
    }

    fn option_text(&self, option: &SelectOption) -> String {
        match (self.mode, &option.name) {
            (MatchMode::Extended, Some(name)) => format!("{} - {}", option.label, name),
            _ => option.label.clone(),
        }
    }

    fn popup_rect(&self, frame_area: Rect) -> Rect {
        let preset = self.size.preset();
        let width = match preset.popup_width {
            PopupWidth::Columns(columns) => columns.max(self.trigger_area.width),
            PopupWidth::MatchTrigger => self.trigger_area.width,
        }
        .min(frame_area.width);

        let rows = (self.state.filtered().len() as u16).clamp(1, preset.max_visible);
        // Borders, search line and separator
        let height = (rows + 4).min(frame_area.height);

        let below = self.trigger_area.bottom();
        let y = if below + height <= frame_area.bottom() {
            below
        } else if self.trigger_area.y >= frame_area.y + height {
            self.trigger_area.y - height
        } else {
            below.min(frame_area.bottom().saturating_sub(height))
        };
        let x = self.trigger_area.x.min(frame_area.right().saturating_sub(width));

        Rect::new(x, y, width, height)
    }

    fn render_trigger(&self, f: &mut Frame, area: Rect) {
        let button = self.button.style();
        let text_style = if self.disabled {
            button.style.add_modifier(Modifier::DIM)
        } else if self.selected_option().is_some() {
            button.style
        } else {
            button.style.fg(Color::DarkGray)
        };
        let chevron = if self.is_open() { "▲" } else { "▼" };

        let inner_width = if button.bordered {
            area.width.saturating_sub(2)
        } else {
            area.width
        } as usize;
        let text = self.display_text();
        let padding = inner_width.saturating_sub(text.chars().count() + 2);
        let line = Line::from(vec![
            Span::styled(text.to_string(), text_style),
            Span::raw(" ".repeat(padding)),
            Span::styled(chevron, Style::default().fg(Color::DarkGray)),
        ]);

        let mut paragraph = Paragraph::new(line).style(button.style);
        if button.bordered {
            let border_style = if self.error.is_some() {
                Style::default().fg(Color::Red)
            } else if self.is_open() {
                Style::default().fg(Color::Cyan)
            } else {
                button.border_style
            };
            paragraph = paragraph.block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            );
        }
        f.render_widget(paragraph, area);
    }

    fn render_popup(&mut self, f: &mut Frame) {
        let popup = self.popup_rect(f.area());
        self.popup_area = popup;
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup);
        f.render_widget(block, popup);
        if inner.height < 3 {
            return;
        }

        let search_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let separator_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let list_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 2);

        let term = self.state.search_term();
        let search_line = if term.is_empty() {
            Line::from(vec![
                Span::raw("🔍 "),
                Span::styled(self.search_placeholder.clone(), Style::default().fg(Color::DarkGray)),
            ])
        } else {
            let cursor = if self.search_focused { "█" } else { "" };
            Line::from(vec![
                Span::raw("🔍 "),
                Span::styled(format!("{term}{cursor}"), Style::default().fg(Color::White)),
                Span::styled("  ✕", Style::default().fg(Color::DarkGray)),
            ])
        };
        f.render_widget(Paragraph::new(search_line), search_area);
        f.render_widget(
            Paragraph::new("─".repeat(inner.width as usize)).style(Style::default().fg(Color::DarkGray)),
            separator_area,
        );

        let visible = self.visible_options();
        if visible.is_empty() {
            self.list_area = Rect::default();
            f.render_widget(
                Paragraph::new(self.empty_text.clone())
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(Style::default().fg(Color::Gray)),
                list_area,
            );
            return;
        }

        let preset = self.size.preset();
        let padding = " ".repeat(preset.item_padding as usize);
        let selected_value = self.state.selected_value();
        let items: Vec<ListItem> = visible
            .iter()
            .map(|option| {
                let is_selected = selected_value == Some(option.value.as_str());
                let check = if is_selected { "✓ " } else { "  " };
                let mut style = Style::default().add_modifier(preset.text_modifier);
                if is_selected {
                    style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
                }
                ListItem::new(Line::from(vec![
                    Span::raw(padding.clone()),
                    Span::styled(check, Style::default().fg(Color::Yellow)),
                    Span::styled(self.option_text(option), style),
                ]))
            })
            .collect();
        let total = items.len();

        let (list_rect, track) = ScrollbarHelper::calculate_areas(list_area, total);
        self.list_area = list_rect;
        let list = List::new(items).highlight_style(Style::default().bg(Color::Rgb(60, 45, 20)).fg(Color::Yellow));
        self.list_state.select(self.state.highlighted());
        f.render_stateful_widget(list, list_rect, &mut self.list_state);

        self.scrollbar
            .update_state(total, self.state.highlighted(), list_rect.height as usize);
        self.scrollbar.render(f, track);
    }
}

impl Component for SearchableSelector {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.disabled {
            return Action::None;
        }

        if !self.is_open() {
            if matches!(key.code, KeyCode::Down | KeyCode::Enter | KeyCode::Char(' ')) {
                self.open();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Down => {
                self.navigate(Direction::Down);
                Action::None
            }
            KeyCode::Up => {
                self.navigate(Direction::Up);
                Action::None
            }
            KeyCode::Enter => self.commit(None),
            KeyCode::Esc => {
                self.dismiss();
                Action::None
            }
            KeyCode::Backspace => {
                self.pop_search_char();
                Action::None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear_search();
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.push_search_char(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if self.disabled || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }

        let point = Position::new(mouse.column, mouse.row);
        if self.trigger_area.contains(point) {
            self.toggle();
            return Action::None;
        }

        if self.is_open() && self.list_area.contains(point) {
            let row = self.list_state.offset() + (mouse.row - self.list_area.y) as usize;
            if row < self.state.filtered().len() {
                return self.commit(Some(row));
            }
            return Action::None;
        }

        if self.is_open() && !self.popup_area.contains(point) && !self.area.contains(point) {
            self.dismiss();
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.area = rect;
        let mut y = rect.y;

        if let Some(label) = &self.label {
            let line = Line::from(vec![
                Span::styled(label.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
                Span::styled("*", Style::default().fg(Color::Red)),
            ]);
            f.render_widget(Paragraph::new(line), Rect::new(rect.x, y, rect.width, 1.min(rect.height)));
            y += 1;
        }

        let trigger_height = self.button.height().min(rect.bottom().saturating_sub(y));
        self.trigger_area = Rect::new(rect.x, y, rect.width, trigger_height);
        self.render_trigger(f, self.trigger_area);
        y += trigger_height;

        if let Some(error) = &self.error {
            if y < rect.bottom() {
                f.render_widget(
                    Paragraph::new(error.clone()).style(Style::default().fg(Color::Red)),
                    Rect::new(rect.x, y, rect.width, 1),
                );
            }
        }

        if self.is_open() {
            self.render_popup(f);
        }

        if let Some(subscription) = &self.subscription {
            subscription.set_boundary(self.area.union(self.popup_area));
        }
    }

    fn on_blur(&mut self) {
        if self.is_open() {
            self.dismiss();
        }
    }
}
