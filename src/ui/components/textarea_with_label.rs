//! Labelled multi-line text input.
//!
//! Same id, error and cursor rules as [`InputWithLabel`](super::InputWithLabel),
//! with `Enter` inserting a line break and `Up`/`Down` moving between lines.

use crate::ui::components::input_with_label::input_id;
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const DEFAULT_ROWS: u16 = 3;

pub struct TextareaWithLabel {
    id: String,
    label: String,
    placeholder: String,
    value: String,
    /// Cursor position in characters, line breaks included.
    cursor: usize,
    error: Option<String>,
    disabled: bool,
    focused: bool,
    /// Visible text rows.
    rows: u16,
    /// First visible line.
    scroll: usize,
    input_area: Rect,
}

impl TextareaWithLabel {
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
            rows: DEFAULT_ROWS,
            scroll: 0,
            input_area: Rect::default(),
        }
    }

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

    pub fn with_rows(mut self, rows: u16) -> Self {
        self.rows = rows.max(1);
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn input_id(&self) -> &str {
        &self.id
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

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Rows taken on screen: label, bordered box and error line.
    pub fn height(&self) -> u16 {
        self.rows + 4
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// An empty message counts as no error.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|error| !error.is_empty());
    }

    /// Zero-based `(line, column)` of the cursor.
    pub fn cursor_position(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for c in self.value.chars().take(self.cursor) {
            if c == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    fn line_lengths(&self) -> Vec<usize> {
        self.value.split('\n').map(|line| line.chars().count()).collect()
    }

    /// Character index of `(line, column)`, both clamped to the text.
    fn index_at(&self, line: usize, column: usize) -> usize {
        let lengths = self.line_lengths();
        let line = line.min(lengths.len() - 1);
        let before: usize = lengths[..line].iter().map(|len| len + 1).sum();
        before + column.min(lengths[line])
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

    /// Same column on the previous line; the first line goes to the start.
    pub fn move_up(&mut self) {
        let (line, column) = self.cursor_position();
        self.cursor = if line == 0 { 0 } else { self.index_at(line - 1, column) };
    }

    /// Same column on the next line; the last line goes to the end.
    pub fn move_down(&mut self) {
        let (line, column) = self.cursor_position();
        self.cursor = if line + 1 >= self.line_lengths().len() {
            self.value.chars().count()
        } else {
            self.index_at(line + 1, column)
        };
    }

    pub fn line_start(&mut self) {
        let (line, _) = self.cursor_position();
        self.cursor = self.index_at(line, 0);
    }

    pub fn line_end(&mut self) {
        let (line, _) = self.cursor_position();
        self.cursor = self.index_at(line, usize::MAX);
    }

    /// Keep the cursor line inside the visible rows.
    fn follow_cursor(&mut self) {
        let (line, _) = self.cursor_position();
        let rows = self.rows as usize;
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + rows {
            self.scroll = line + 1 - rows;
        }
    }

    fn text_lines(&self) -> Vec<Line<'static>> {
        if self.value.is_empty() && !self.focused {
            return vec![Line::from(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let (cursor_line, cursor_column) = self.cursor_position();
        self.value
            .split('\n')
            .enumerate()
            .skip(self.scroll)
            .take(self.rows as usize)
            .map(|(index, text)| {
                if !self.focused || index != cursor_line {
                    return Line::from(text.to_string());
                }
                let before: String = text.chars().take(cursor_column).collect();
                let at: String = text.chars().nth(cursor_column).map_or(" ".to_string(), String::from);
                let after: String = text.chars().skip(cursor_column + 1).collect();
                Line::from(vec![
                    Span::raw(before),
                    Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
                    Span::raw(after),
                ])
            })
            .collect()
    }
}

impl Component for TextareaWithLabel {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.disabled {
            return Action::None;
        }
        let action = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Enter => self.insert('\n'),
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
            KeyCode::Up => {
                self.move_up();
                Action::None
            }
            KeyCode::Down => {
                self.move_down();
                Action::None
            }
            KeyCode::Home => {
                self.line_start();
                Action::None
            }
            KeyCode::End => {
                self.line_end();
                Action::None
            }
            _ => Action::None,
        };
        self.follow_cursor();
        action
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if self.disabled || !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }
        let inner = Block::default().borders(Borders::ALL).inner(self.input_area);
        if inner.contains(Position::new(mouse.column, mouse.row)) {
            let line = self.scroll + (mouse.row - inner.y) as usize;
            let column = (mouse.column - inner.x) as usize;
            self.cursor = self.index_at(line, column);
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if rect.height < 3 {
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
        let box_height = (self.rows + 2).min(rect.height - 1);
        self.input_area = Rect::new(rect.x, rect.y + 1, rect.width, box_height);
        f.render_widget(
            Paragraph::new(self.text_lines()).style(text_style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color)),
            ),
            self.input_area,
        );

        if let Some(error) = &self.error {
            let error_y = self.input_area.bottom();
            if error_y < rect.bottom() {
                f.render_widget(
                    Paragraph::new(error.clone()).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                    Rect::new(rect.x, error_y, rect.width, 1),
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
