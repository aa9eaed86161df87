//! Labelled single-line text input, and its password variant.

use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const PASSWORD_MASK: char = '•';

/// Lowercased label with every whitespace run replaced by a single `-`.
pub fn input_id(label: &str) -> String {
    let mut id = String::with_capacity(label.len());
    let mut in_whitespace = false;
    for c in label.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.push(c);
            in_whitespace = false;
        }
    }
    id
}

pub struct InputWithLabel {
    id: String,
    label: String,
    placeholder: String,
    value: String,
    /// Cursor position in characters.
    cursor: usize,
    error: Option<String>,
    disabled: bool,
    focused: bool,
    masked: bool,
    input_area: Rect,
}

impl InputWithLabel {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: input_id(&label),
            label,
            placeholder: String::new(),
            value: String::new(),
            cursor: 0,
            error: None,
            disabled: false,
            focused: false,
            masked: false,
            input_area: Rect::default(),
        }
    }

    /// Explicit id, replacing the one derived from the label.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn input_id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Controlled value; the cursor moves to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// An empty message counts as no error.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|error| !error.is_empty());
    }

    pub fn set_masked(&mut self, masked: bool) {
        self.masked = masked;
    }

    /// Text as shown on screen.
    pub fn display_value(&self) -> String {
        if self.masked {
            std::iter::repeat(PASSWORD_MASK).take(self.value.chars().count()).collect()
        } else {
            self.value.clone()
        }
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(index, _)| index)
    }

    fn changed(&self) -> Action {
        Action::InputChanged {
            input: self.id.clone(),
            value: self.value.clone(),
        }
    }

    pub fn insert(&mut self, c: char) -> Action {
        let index = self.byte_index(self.cursor);
        self.value.insert(index, c);
        self.cursor += 1;
        self.changed()
    }

    pub fn backspace(&mut self) -> Action {
        if self.cursor == 0 {
            return Action::None;
        }
        self.cursor -= 1;
        let index = self.byte_index(self.cursor);
        self.value.remove(index);
        self.changed()
    }

    pub fn delete(&mut self) -> Action {
        if self.cursor >= self.value.chars().count() {
            return Action::None;
        }
        let index = self.byte_index(self.cursor);
        self.value.remove(index);
        self.changed()
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    fn input_line(&self) -> Line<'static> {
        if self.value.is_empty() && !self.focused {
            return Line::from(Span::styled(self.placeholder.clone(), Style::default().fg(Color::DarkGray)));
        }

        let shown = self.display_value();
        if !self.focused {
            return Line::from(shown);
        }

        let before: String = shown.chars().take(self.cursor).collect();
        let at: String = shown.chars().nth(self.cursor).map_or(" ".to_string(), String::from);
        let after: String = shown.chars().skip(self.cursor + 1).collect();
        Line::from(vec![
            Span::raw(before),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::raw(after),
        ])
    }
}

impl Component for InputWithLabel {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.disabled {
            return Action::None;
        }
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => {
                self.move_left();
                Action::None
            }
            KeyCode::Right => {
                self.move_right();
                Action::None
            }
            KeyCode::Home => {
                self.home();
                Action::None
            }
            KeyCode::End => {
                self.end();
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
        if self.input_area.contains(point) {
            let column = mouse.column.saturating_sub(self.input_area.x + 1) as usize;
            self.cursor = column.min(self.value.chars().count());
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if rect.height < 4 {
            return;
        }

        f.render_widget(
            Paragraph::new(Span::styled(
                self.label.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Rect::new(rect.x, rect.y, rect.width, 1),
        );

        let border_color = if self.error.is_some() {
            Color::Red
        } else if self.focused {
            Color::Cyan
        } else {
            Color::Gray
        };
        let text_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        self.input_area = Rect::new(rect.x, rect.y + 1, rect.width, 3);
        f.render_widget(
            Paragraph::new(self.input_line()).style(text_style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            ),
            self.input_area,
        );

        if let Some(error) = &self.error {
            if rect.height > 4 {
                f.render_widget(
                    Paragraph::new(error.clone()).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                    Rect::new(rect.x, rect.y + 4, rect.width, 1),
                );
            }
        }
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}

/// Password input: masked until the visibility toggle is flipped.
pub struct SecurePassword {
    input: InputWithLabel,
    visible: bool,
    toggle_area: Rect,
}

impl SecurePassword {
    pub fn new(label: impl Into<String>) -> Self {
        let mut input = InputWithLabel::new(label);
        input.set_masked(true);
        Self {
            input,
            visible: false,
            toggle_area: Rect::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.input = self.input.with_id(id);
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.input = self.input.with_placeholder(placeholder);
        self
    }

    pub fn input(&self) -> &InputWithLabel {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputWithLabel {
        &mut self.input
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
        self.input.set_masked(!self.visible);
    }
}

impl Component for SecurePassword {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('t') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.toggle_visibility();
            return Action::None;
        }
        self.input.handle_key_events(key)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left))
            && self.toggle_area.contains(Position::new(mouse.column, mouse.row))
        {
            self.toggle_visibility();
            return Action::None;
        }
        self.input.handle_mouse_events(mouse)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.input.render(f, rect);
        if rect.height < 4 || rect.width < 6 {
            return;
        }
        // Eye toggle inside the right border of the input box
        self.toggle_area = Rect::new(rect.right() - 4, rect.y + 2, 2, 1);
        let eye = if self.visible { "◉" } else { "◎" };
        f.render_widget(
            Paragraph::new(eye).style(Style::default().fg(Color::Gray)),
            self.toggle_area,
        );
    }

    fn on_focus(&mut self) {
        self.input.on_focus();
    }

    fn on_blur(&mut self) {
        self.input.on_blur();
    }
}
