//! Layout management and calculations

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Screen areas of the demo application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainLayout {
    pub sidebar: Rect,
    pub toolbar: Rect,
    pub table: Rect,
    pub status: Rect,
}

/// Toolbar slots, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarLayout {
    pub selector: Rect,
    pub period: Rect,
    pub actions: Rect,
    pub delete: Rect,
    pub export: Rect,
}

/// Manages layout calculations and constraints for the UI
pub struct LayoutManager;

impl LayoutManager {
    /// Sidebar on the left, toolbar above the table on the right, and a
    /// one line status bar across the bottom.
    #[must_use]
    pub fn main_layout(area: Rect, sidebar_width: u16) -> MainLayout {
        let top_height = area.height.saturating_sub(1);
        let status = Rect::new(area.x, area.y + top_height, area.width, area.height.min(1));
        let top = Rect::new(area.x, area.y, area.width, top_height);

        let sidebar_width = sidebar_width.min(area.width / 2);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
            .split(top);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(columns[1]);

        MainLayout {
            sidebar: columns[0],
            toolbar: rows[0],
            table: rows[1],
            status,
        }
    }

    #[must_use]
    pub fn toolbar_layout(area: Rect) -> ToolbarLayout {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(24),
                Constraint::Length(34),
                Constraint::Length(5),
                Constraint::Length(6),
                Constraint::Length(24),
            ])
            .split(area);
        ToolbarLayout {
            selector: chunks[0],
            period: chunks[1],
            actions: chunks[2],
            delete: chunks[3],
            export: chunks[4],
        }
    }

    /// Calculate a centered rectangle within the given area
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(popup_layout[1])[1]
    }
}
