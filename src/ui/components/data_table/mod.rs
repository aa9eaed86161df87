//! Caller-paged table with a local text filter.
//!
//! The table never holds more than the page its owner hands it. Paging
//! controls only *request* pages (`Action::PageRequested`,
//! `Action::PageSizeRequested`); the owner answers by calling
//! [`PaginatedFilterableTable::set_page`] with the new data.

mod filter;
mod pagination;

pub use filter::{contains_ignore_case, visible_rows, Column, ColumnFilter};
pub use pagination::{compute_page_window, PageSize, TablePage};

use crate::constants::{
    PAGE_WINDOW_SIZE, TABLE_ITEMS_PER_PAGE, TABLE_LOADING, TABLE_NO_DATA, TABLE_NO_RESULT, TABLE_RESULTS,
    TABLE_SEARCH_PLACEHOLDER, TABLE_SHOW,
};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

pub struct PaginatedFilterableTable<R> {
    title: Option<String>,
    columns: Vec<Column<R>>,
    page: TablePage<R>,
    is_loading: bool,
    search_column: Option<String>,
    filter_text: String,
    column_filter: Option<ColumnFilter>,
    visible: Vec<usize>,
    search_mode: bool,
    focused: bool,
    table_state: TableState,
    search_area: Rect,
    body_area: Rect,
    page_size_area: Rect,
    page_targets: Vec<(Rect, usize)>,
}

impl<R> PaginatedFilterableTable<R> {
    pub fn new(columns: Vec<Column<R>>, page_size: usize) -> Self {
        Self {
            title: None,
            columns,
            page: TablePage::empty(page_size),
            is_loading: false,
            search_column: None,
            filter_text: String::new(),
            column_filter: None,
            visible: Vec::new(),
            search_mode: false,
            focused: false,
            table_state: TableState::default(),
            search_area: Rect::default(),
            body_area: Rect::default(),
            page_size_area: Rect::default(),
            page_targets: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Route the search box to a single column instead of every column.
    pub fn with_search_column(mut self, column: impl Into<String>) -> Self {
        self.search_column = Some(column.into());
        self
    }

    /// Replace the page wholesale. Inconsistent page numbers are clamped and
    /// the visible rows are re-derived from the current filter.
    pub fn set_page(&mut self, page: TablePage<R>) {
        self.page = page.clamped();
        self.refresh_visible();
    }

    pub fn set_loading(&mut self, is_loading: bool) {
        self.is_loading = is_loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn page(&self) -> &TablePage<R> {
        &self.page
    }

    pub fn columns(&self) -> &[Column<R>] {
        &self.columns
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn column_filter(&self) -> Option<&ColumnFilter> {
        self.column_filter.as_ref()
    }

    pub fn is_search_mode(&self) -> bool {
        self.search_mode
    }

    /// Update the search text. With a search column the text becomes that
    /// column's filter; without one it is matched against every column.
    /// Purely local: no page is requested.
    pub fn set_global_filter(&mut self, text: &str) {
        self.filter_text = text.to_string();
        if let Some(column) = &self.search_column {
            self.column_filter = (!text.is_empty()).then(|| ColumnFilter {
                column: column.clone(),
                value: text.to_string(),
            });
        }
        self.refresh_visible();
    }

    /// Rows of the current page passing the filters, in page order.
    pub fn visible_rows(&self) -> Vec<&R> {
        self.visible.iter().filter_map(|index| self.page.rows.get(*index)).collect()
    }

    pub fn selected_row(&self) -> Option<&R> {
        let position = self.table_state.selected()?;
        self.page.rows.get(*self.visible.get(position)?)
    }

    pub fn request_page(&self, page: usize) -> Action {
        if self.is_loading || page < 1 || page > self.page.total_pages {
            return Action::None;
        }
        Action::PageRequested(page)
    }

    pub fn request_page_size(&self, size: usize) -> Action {
        if self.is_loading || PageSize::try_from(size).is_err() {
            return Action::None;
        }
        Action::PageSizeRequested(size)
    }

    pub fn previous_page(&self) -> Action {
        self.request_page(self.page.current_page.saturating_sub(1))
    }

    pub fn next_page(&self) -> Action {
        self.request_page(self.page.current_page + 1)
    }

    pub fn first_page(&self) -> Action {
        if self.page.current_page == 1 {
            return Action::None;
        }
        self.request_page(1)
    }

    pub fn last_page(&self) -> Action {
        if self.page.current_page == self.page.total_pages {
            return Action::None;
        }
        self.request_page(self.page.total_pages)
    }

    /// Request the next allowed page size, wrapping around.
    pub fn cycle_page_size(&self) -> Action {
        let current = PageSize::try_from(self.page.page_size).unwrap_or_default();
        self.request_page_size(current.next().as_usize())
    }

    pub fn page_window(&self) -> Vec<usize> {
        compute_page_window(self.page.current_page, self.page.total_pages, PAGE_WINDOW_SIZE)
    }

    pub fn results_label(&self) -> String {
        if self.page.total_items > 0 {
            format!("{} {}", self.page.total_items, TABLE_RESULTS)
        } else {
            TABLE_NO_RESULT.to_string()
        }
    }

    pub fn select_next_row(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let next = match self.table_state.selected() {
            Some(index) if index + 1 < self.visible.len() => index + 1,
            Some(index) => index,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    pub fn select_previous_row(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let previous = self.table_state.selected().map_or(0, |index| index.saturating_sub(1));
        self.table_state.select(Some(previous));
    }

    fn refresh_visible(&mut self) {
        self.visible = visible_rows(
            &self.page.rows,
            &self.columns,
            &self.filter_text,
            self.column_filter.as_ref(),
        );
        self.table_state
            .select(if self.visible.is_empty() { None } else { Some(0) });
    }

    fn push_filter_char(&mut self, c: char) {
        let mut text = self.filter_text.clone();
        text.push(c);
        self.set_global_filter(&text);
    }

    fn pop_filter_char(&mut self) {
        let mut text = self.filter_text.clone();
        if text.pop().is_some() {
            self.set_global_filter(&text);
        }
    }

    fn handle_search_keys(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.search_mode = false,
            KeyCode::Backspace => self.pop_filter_char(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => self.set_global_filter(""),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.push_filter_char(c),
            _ => {}
        }
        Action::None
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let line = if self.filter_text.is_empty() && !self.search_mode {
            Line::from(vec![
                Span::raw("🔍 "),
                Span::styled(TABLE_SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
                Span::styled("  (/)", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            let cursor = if self.search_mode { "█" } else { "" };
            Line::from(vec![
                Span::raw("🔍 "),
                Span::styled(format!("{}{}", self.filter_text, cursor), Style::default().fg(Color::White)),
            ])
        };
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_body(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(self.columns.iter().map(|column| column.header.clone()))
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
        let widths: Vec<_> = self.columns.iter().map(|column| column.width).collect();

        let message = if self.is_loading {
            Some(TABLE_LOADING)
        } else if self.visible.is_empty() {
            Some(TABLE_NO_DATA)
        } else {
            None
        };

        if let Some(message) = message {
            f.render_widget(Table::new(Vec::<Row>::new(), widths).header(header), area);
            if area.height > 2 {
                let message_area = Rect::new(area.x, area.y + 1 + (area.height - 1) / 2, area.width, 1);
                f.render_widget(
                    Paragraph::new(message)
                        .alignment(Alignment::Center)
                        .style(Style::default().fg(Color::Gray)),
                    message_area,
                );
            }
            return;
        }

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|index| self.page.rows.get(*index))
            .map(|row| Row::new(self.columns.iter().map(|column| column.cell(row))))
            .collect();

        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(2)
            .row_highlight_style(Style::default().bg(Color::Rgb(60, 45, 20)).fg(Color::Yellow))
            .highlight_symbol("▶ ");
        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_footer(&mut self, f: &mut Frame, area: Rect) {
        self.page_targets.clear();
        let muted = Style::default().fg(Color::Gray);
        let disabled = Style::default().fg(Color::DarkGray);

        let page_size = format!("[{}]", self.page.page_size);
        let left = vec![
            Span::styled(format!("{TABLE_SHOW} "), muted),
            Span::styled(
                page_size.clone(),
                if self.is_loading {
                    disabled
                } else {
                    Style::default().fg(Color::Cyan)
                },
            ),
            Span::styled(format!(" {TABLE_ITEMS_PER_PAGE}"), muted),
        ];
        let size_x = area.x + TABLE_SHOW.chars().count() as u16 + 1;
        self.page_size_area = Rect::new(size_x, area.y, page_size.chars().count() as u16, 1);
        f.render_widget(Paragraph::new(Line::from(left)), area);

        f.render_widget(
            Paragraph::new(self.results_label()).alignment(Alignment::Center).style(muted),
            area,
        );

        // Pager, right aligned: "‹ 1 2 3 4 5 ›"
        let current = self.page.current_page;
        let mut buttons: Vec<(String, usize, Style)> = Vec::new();
        let enabled_if = |enabled: bool| {
            if enabled && !self.is_loading {
                Style::default().fg(Color::White)
            } else {
                disabled
            }
        };
        buttons.push(("‹".to_string(), current.saturating_sub(1), enabled_if(current > 1)));
        for page in self.page_window() {
            let style = if self.is_loading {
                disabled
            } else if page == current {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            buttons.push((format!(" {page} "), page, style));
        }
        buttons.push(("›".to_string(), current + 1, enabled_if(current < self.page.total_pages)));

        let width: u16 = buttons.iter().map(|(text, _, _)| text.chars().count() as u16 + 1).sum();
        let mut x = area.right().saturating_sub(width);
        let mut spans = Vec::new();
        for (text, target, style) in buttons {
            let len = text.chars().count() as u16;
            self.page_targets.push((Rect::new(x, area.y, len, 1), target));
            spans.push(Span::styled(text, style));
            spans.push(Span::raw(" "));
            x += len + 1;
        }
        f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Right), area);
    }
}

impl<R> Component for PaginatedFilterableTable<R> {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.search_mode {
            return self.handle_search_keys(key);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.search_mode = true;
                Action::None
            }
            KeyCode::Esc if !self.filter_text.is_empty() => {
                self.set_global_filter("");
                Action::None
            }
            KeyCode::Left | KeyCode::Char('h') => self.previous_page(),
            KeyCode::Right | KeyCode::Char('l') => self.next_page(),
            KeyCode::Home | KeyCode::Char('g') => self.first_page(),
            KeyCode::End | KeyCode::Char('G') => self.last_page(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next_row();
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous_row();
                Action::None
            }
            KeyCode::Char('s') => self.cycle_page_size(),
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        let point = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((_, page)) = self.page_targets.iter().find(|(area, _)| area.contains(point)) {
                    return self.request_page(*page);
                }
                if self.page_size_area.contains(point) {
                    return self.cycle_page_size();
                }
                self.search_mode = self.search_area.contains(point);
                // Header takes the first body line
                if self.body_area.contains(point) && mouse.row > self.body_area.y {
                    let position = self.table_state.offset() + (mouse.row - self.body_area.y - 1) as usize;
                    if position < self.visible.len() {
                        self.table_state.select(Some(position));
                    }
                }
                Action::None
            }
            MouseEventKind::ScrollDown => {
                self.select_next_row();
                Action::None
            }
            MouseEventKind::ScrollUp => {
                self.select_previous_row();
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        if let Some(title) = &self.title {
            block = block.title(format!(" {title} "));
        }
        let inner = block.inner(rect);
        f.render_widget(block, rect);
        if inner.height < 4 {
            return;
        }

        self.search_area = Rect::new(inner.x, inner.y, inner.width, 1);
        self.body_area = Rect::new(inner.x, inner.y + 2, inner.width, inner.height - 4);
        let footer_area = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);

        self.render_search(f, self.search_area);
        self.render_body(f, self.body_area);
        self.render_footer(f, footer_area);
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
        self.search_mode = false;
    }
}
