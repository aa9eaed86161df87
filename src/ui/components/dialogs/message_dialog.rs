//! Error, info and logs dialogs

use super::common::{create_dialog_block, create_instructions_paragraph, shortcuts};
use crate::ui::core::{Action, Component};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Info,
}

impl MessageKind {
    fn title(self) -> &'static str {
        match self {
            MessageKind::Error => " Erreur ",
            MessageKind::Info => " Information ",
        }
    }

    fn color(self) -> Color {
        match self {
            MessageKind::Error => Color::Red,
            MessageKind::Info => Color::Green,
        }
    }
}

/// One-message modal dismissed with Enter or Escape.
pub struct MessageDialog {
    pub kind: MessageKind,
    pub message: String,
}

impl MessageDialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            message: message.into(),
        }
    }
}

impl Component for MessageDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Action::HideDialog,
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let area = LayoutManager::centered_rect(60, 25, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(self.kind.title(), self.kind.color());
        let inner = block.inner(area);
        f.render_widget(block, area);
        if inner.height < 2 {
            return;
        }

        f.render_widget(
            Paragraph::new(self.message.as_str())
                .style(Style::default().fg(self.kind.color()))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 2),
        );
        f.render_widget(
            create_instructions_paragraph(&[shortcuts::ENTER_CLOSE]),
            Rect::new(inner.x, inner.bottom() - 1, inner.width, 1),
        );
    }
}

/// Scrollable view of the in-memory log buffer, newest first.
#[derive(Default)]
pub struct LogsDialog {
    logs: Vec<String>,
    scroll_offset: usize,
}

impl LogsDialog {
    pub fn new(logs: Vec<String>) -> Self {
        Self { logs, scroll_offset: 0 }
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.logs.len() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

impl Component for LogsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Action::HideDialog,
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_down();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_up();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let area = LayoutManager::centered_rect(80, 80, rect);
        f.render_widget(Clear, area);
        let block = create_dialog_block(" Journaux ", Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(inner);
        f.render_widget(
            create_instructions_paragraph(&[shortcuts::SCROLL, shortcuts::SEPARATOR, shortcuts::ESC_CANCEL]),
            chunks[0],
        );

        if self.logs.is_empty() {
            f.render_widget(
                Paragraph::new("Aucun journal disponible")
                    .style(Style::default().fg(Color::Gray))
                    .alignment(Alignment::Center),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = self
            .logs
            .iter()
            .skip(self.scroll_offset)
            .take(chunks[1].height as usize)
            .map(|log| {
                // "[HH:MM:SS.mmm] LEVEL message"
                let Some(bracket_end) = log.find("] ") else {
                    return ListItem::new(log.as_str());
                };
                let message = &log[bracket_end + 2..];
                let style = if message.starts_with("ERROR") {
                    Style::default().fg(Color::Red)
                } else if message.starts_with("WARN") {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(&log[..bracket_end + 2], Style::default().fg(Color::DarkGray)),
                    Span::styled(message, style),
                ]))
            })
            .collect();
        f.render_widget(List::new(items), chunks[1]);
    }
}
