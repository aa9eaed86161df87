//! Single-flight export trigger.
//!
//! At most one export runs at a time. Starting one hands out an
//! [`InFlightExport`] guard; the marker is cleared when the guard drops,
//! whichever way the export ends.

use crate::constants::{ERROR_EXPORT_FAILED, EXPORT_IDLE, EXPORT_RUNNING};
use crate::ui::core::{Action, Component, DialogType};
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Xlsx,
    Pdf,
    Xml,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Xlsx, ExportKind::Pdf, ExportKind::Xml];

    pub fn label(self) -> &'static str {
        match self {
            ExportKind::Xlsx => "Excel (.xlsx)",
            ExportKind::Pdf => "PDF (.pdf)",
            ExportKind::Xml => "XML (.xml)",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportKind::Xlsx => "xlsx",
            ExportKind::Pdf => "pdf",
            ExportKind::Xml => "xml",
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("un export {0} est déjà en cours")]
    Busy(ExportKind),
    #[error("aucun export {0} n'est disponible")]
    Unavailable(ExportKind),
    #[error("échec de l'export {kind}: {message}")]
    Failed { kind: ExportKind, message: String },
}

/// Produces one export format. Implementations run on the tokio runtime.
#[async_trait]
pub trait ExportHandler: Send + Sync {
    async fn export(&self, kind: ExportKind) -> anyhow::Result<()>;
}

/// Proof that an export is running. Dropping it clears the in-flight
/// marker.
#[derive(Debug)]
pub struct InFlightExport {
    kind: ExportKind,
    marker: Rc<Cell<Option<ExportKind>>>,
}

impl InFlightExport {
    pub fn kind(&self) -> ExportKind {
        self.kind
    }
}

impl Drop for InFlightExport {
    fn drop(&mut self) {
        self.marker.set(None);
        log::debug!("Export {}: in-flight marker released", self.kind);
    }
}

#[derive(Default)]
pub struct ExportButton {
    handlers: BTreeMap<ExportKind, Arc<dyn ExportHandler>>,
    in_flight: Rc<Cell<Option<ExportKind>>>,
    pending: Option<InFlightExport>,
    menu_open: bool,
    highlighted: usize,
    trigger_area: Rect,
    menu_area: Rect,
}

impl ExportButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, kind: ExportKind, handler: Arc<dyn ExportHandler>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    pub fn handler(&self, kind: ExportKind) -> Option<Arc<dyn ExportHandler>> {
        self.handlers.get(&kind).cloned()
    }

    /// Kind of the export currently running, if any.
    pub fn exporting(&self) -> Option<ExportKind> {
        self.in_flight.get()
    }

    /// Whether the trigger for `kind` accepts a click right now.
    pub fn is_enabled(&self, kind: ExportKind) -> bool {
        self.handlers.contains_key(&kind) && self.exporting().is_none()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Claim the single-flight slot for `kind`.
    pub fn begin(&self, kind: ExportKind) -> Result<InFlightExport, ExportError> {
        if let Some(running) = self.in_flight.get() {
            return Err(ExportError::Busy(running));
        }
        if !self.handlers.contains_key(&kind) {
            return Err(ExportError::Unavailable(kind));
        }

        self.in_flight.set(Some(kind));
        log::info!("Export {}: started", kind);
        Ok(InFlightExport {
            kind,
            marker: Rc::clone(&self.in_flight),
        })
    }

    /// Run an export in place, holding the slot until it settles.
    pub async fn run(&self, kind: ExportKind) -> Result<(), ExportError> {
        let _guard = self.begin(kind)?;
        let handler = self.handler(kind).ok_or(ExportError::Unavailable(kind))?;

        handler.export(kind).await.map_err(|e| {
            log::error!("Export {} failed: {:#}", kind, e);
            ExportError::Failed {
                kind,
                message: format!("{e:#}"),
            }
        })
    }

    /// Start `kind` for a background runner: the guard is kept until the
    /// matching `Action::ExportSettled` comes back through `update`.
    pub fn start(&mut self, kind: ExportKind) -> Action {
        match self.begin(kind) {
            Ok(guard) => {
                self.pending = Some(guard);
                self.menu_open = false;
                Action::StartExport(kind)
            }
            Err(e) => {
                log::debug!("Export trigger ignored: {}", e);
                Action::None
            }
        }
    }

    pub fn open_menu(&mut self) {
        if self.exporting().is_some() {
            return;
        }
        self.menu_open = true;
        self.highlighted = ExportKind::ALL
            .iter()
            .position(|kind| self.is_enabled(*kind))
            .unwrap_or(0);
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    pub fn highlighted(&self) -> ExportKind {
        ExportKind::ALL[self.highlighted % ExportKind::ALL.len()]
    }

    fn move_highlight(&mut self, forward: bool) {
        let len = ExportKind::ALL.len();
        for step in 1..=len {
            let candidate = if forward {
                (self.highlighted + step) % len
            } else {
                (self.highlighted + len - step) % len
            };
            if self.is_enabled(ExportKind::ALL[candidate]) {
                self.highlighted = candidate;
                return;
            }
        }
    }

    fn render_menu(&mut self, f: &mut Frame) {
        let width = 22.min(f.area().width);
        let height = ExportKind::ALL.len() as u16 + 2;
        let x = self.trigger_area.right().saturating_sub(width);
        let y = if self.trigger_area.bottom() + height <= f.area().bottom() {
            self.trigger_area.bottom()
        } else {
            self.trigger_area.y.saturating_sub(height)
        };
        self.menu_area = Rect::new(x, y, width, height);

        let lines: Vec<Line> = ExportKind::ALL
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                let enabled = self.is_enabled(*kind);
                let icon = if self.exporting() == Some(*kind) { "⟳ " } else { "  " };
                let style = if !enabled {
                    Style::default().fg(Color::DarkGray)
                } else if index == self.highlighted {
                    Style::default().fg(Color::Yellow).bg(Color::Rgb(60, 45, 20))
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(vec![Span::raw(icon), Span::styled(kind.label(), style)])
            })
            .collect();

        f.render_widget(Clear, self.menu_area);
        f.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            self.menu_area,
        );
    }
}

impl Component for ExportButton {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if !self.menu_open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
                self.open_menu();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_highlight(true);
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_highlight(false);
                Action::None
            }
            KeyCode::Enter => self.start(self.highlighted()),
            KeyCode::Esc => {
                self.close_menu();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }

        let point = Position::new(mouse.column, mouse.row);
        if self.trigger_area.contains(point) {
            if self.menu_open {
                self.close_menu();
            } else {
                self.open_menu();
            }
            return Action::None;
        }

        if self.menu_open && self.menu_area.contains(point) {
            let row = mouse.row.saturating_sub(self.menu_area.y + 1) as usize;
            if let Some(kind) = ExportKind::ALL.get(row) {
                if self.is_enabled(*kind) {
                    return self.start(*kind);
                }
            }
            return Action::None;
        }

        self.close_menu();
        Action::None
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ExportSettled { kind, error } => {
                if self.pending.as_ref().map(InFlightExport::kind) == Some(kind) {
                    self.pending = None;
                }
                match error {
                    Some(message) => {
                        Action::ShowDialog(DialogType::Error(format!("{ERROR_EXPORT_FAILED} ({kind}) : {message}")))
                    }
                    None => Action::None,
                }
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.trigger_area = rect;
        let (label, style) = match self.exporting() {
            Some(_) => (format!("⟳ {EXPORT_RUNNING}"), Style::default().fg(Color::DarkGray)),
            None => (
                format!("⇩ {EXPORT_IDLE}"),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        };

        f.render_widget(
            Paragraph::new(label)
                .style(style)
                .alignment(ratatui::layout::Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Gray)),
                ),
            rect,
        );

        if self.menu_open {
            self.render_menu(f);
        }
    }

    fn on_blur(&mut self) {
        self.close_menu();
    }
}
