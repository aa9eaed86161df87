//! Scrollbar support for lists that can outgrow their popup.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Keeps scrollbar state in step with a list and renders it on demand.
pub struct ScrollbarHelper {
    state: ScrollbarState,
}

impl Default for ScrollbarHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollbarHelper {
    pub fn new() -> Self {
        Self {
            state: ScrollbarState::new(0),
        }
    }

    /// Sync with the list: `position` is the highlighted row, if any.
    pub fn update_state(&mut self, total_items: usize, position: Option<usize>, viewport_height: usize) {
        self.state = self
            .state
            .content_length(total_items)
            .viewport_content_length(viewport_height)
            .position(position.unwrap_or(0));
    }

    pub fn needs_scrollbar(total_items: usize, available_height: usize) -> bool {
        total_items > available_height
    }

    /// Split an unbordered list area into the list itself and, when the
    /// items overflow, a one column scrollbar track on the right.
    pub fn calculate_areas(area: Rect, total_items: usize) -> (Rect, Option<Rect>) {
        if !Self::needs_scrollbar(total_items, area.height as usize) || area.width < 2 {
            return (area, None);
        }

        let list_area = Rect {
            width: area.width - 1,
            ..area
        };
        let track_area = Rect {
            x: area.x + area.width - 1,
            width: 1,
            ..area
        };
        (list_area, Some(track_area))
    }

    pub fn render(&mut self, f: &mut Frame, track_area: Option<Rect>) {
        if let Some(area) = track_area {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .track_symbol(Some("│"))
                .thumb_symbol("█")
                .style(Style::default().fg(Color::DarkGray));

            f.render_stateful_widget(scrollbar, area, &mut self.state);
        }
    }

    pub fn state(&self) -> &ScrollbarState {
        &self.state
    }
}
