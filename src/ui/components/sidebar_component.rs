//! Sectioned navigation sidebar.
//!
//! Sections hold links; section titles are headers the cursor skips. The
//! active link is derived from the current route, never stored on its own.

use crate::constants::{ROUTE_HOME, ROUTE_LOGIN, ROUTE_REGISTER};
use crate::ui::components::scrollbar_helper::ScrollbarHelper;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarLink {
    pub title: String,
    pub href: String,
}

impl SidebarLink {
    pub fn new(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
        }
    }

    pub fn is_external(&self) -> bool {
        self.href.starts_with("http")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarSection {
    /// Empty for the untitled leading section.
    pub title: String,
    pub links: Vec<SidebarLink>,
}

impl SidebarSection {
    pub fn new(title: impl Into<String>, links: Vec<SidebarLink>) -> Self {
        Self {
            title: title.into(),
            links,
        }
    }
}

/// Navigation of the reporting application.
pub fn default_sections() -> Vec<SidebarSection> {
    vec![
        SidebarSection::new("", vec![SidebarLink::new("Accueil", ROUTE_HOME)]),
        SidebarSection::new(
            "Éditions comptables",
            vec![
                SidebarLink::new("Reporting", "/reporting"),
                SidebarLink::new("États financiers", "/etats-financiers"),
            ],
        ),
        SidebarSection::new(
            "Paramétrage",
            vec![
                SidebarLink::new("Mes Informations", "/informations"),
                SidebarLink::new("Plan comptable", "/plan-comptable"),
                SidebarLink::new("Source de données", "/data-source"),
                SidebarLink::new("Configuration", "/config-etat"),
                SidebarLink::new("Rubriques", "/rubriques"),
                SidebarLink::new("Exercices", "/exercices"),
                SidebarLink::new("Archivage", "/archivage"),
            ],
        ),
        SidebarSection::new(
            "Compte",
            vec![
                SidebarLink::new("Connexion", ROUTE_LOGIN),
                SidebarLink::new("Inscription", ROUTE_REGISTER),
            ],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SidebarRow {
    Header(String),
    Link(SidebarLink),
}

pub struct SidebarComponent {
    route: String,
    rows: Vec<SidebarRow>,
    list_state: ListState,
    scrollbar_helper: ScrollbarHelper,
    area: Rect,
    focused: bool,
}

impl Default for SidebarComponent {
    fn default() -> Self {
        Self::new(default_sections(), ROUTE_HOME)
    }
}

impl SidebarComponent {
    pub fn new(sections: Vec<SidebarSection>, route: impl Into<String>) -> Self {
        let mut rows = Vec::new();
        for section in sections {
            if !section.title.is_empty() {
                rows.push(SidebarRow::Header(section.title));
            }
            rows.extend(section.links.into_iter().map(SidebarRow::Link));
        }

        let mut sidebar = Self {
            route: String::new(),
            rows,
            list_state: ListState::default(),
            scrollbar_helper: ScrollbarHelper::new(),
            area: Rect::default(),
            focused: false,
        };
        sidebar.set_route(route);
        sidebar
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Follow the current route: the matching link becomes active and the
    /// cursor moves onto it.
    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = route.into();
        let active = self.active_index().or_else(|| self.link_indices().first().copied());
        self.list_state.select(active);
    }

    pub fn links(&self) -> Vec<&SidebarLink> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                SidebarRow::Link(link) => Some(link),
                SidebarRow::Header(_) => None,
            })
            .collect()
    }

    pub fn active_link(&self) -> Option<&SidebarLink> {
        self.link_at(self.active_index()?)
    }

    pub fn cursor_link(&self) -> Option<&SidebarLink> {
        self.link_at(self.list_state.selected()?)
    }

    fn link_at(&self, index: usize) -> Option<&SidebarLink> {
        match self.rows.get(index)? {
            SidebarRow::Link(link) => Some(link),
            SidebarRow::Header(_) => None,
        }
    }

    fn active_index(&self) -> Option<usize> {
        self.rows
            .iter()
            .position(|row| matches!(row, SidebarRow::Link(link) if link.href == self.route))
    }

    fn link_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, SidebarRow::Link(_)))
            .map(|(index, _)| index)
            .collect()
    }

    /// Move the cursor to the next link, skipping headers and wrapping.
    pub fn move_cursor(&mut self, forward: bool) {
        let len = self.rows.len();
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        for offset in 1..=len {
            let index = if forward {
                (current + offset) % len
            } else {
                (current + len - offset) % len
            };
            if self.link_at(index).is_some() {
                self.list_state.select(Some(index));
                return;
            }
        }
    }

    /// Navigate to the link under the cursor.
    pub fn activate(&mut self) -> Action {
        let Some(link) = self.cursor_link() else {
            return Action::None;
        };
        if link.is_external() {
            log::info!("Sidebar: external link {}", link.href);
        }
        let href = link.href.clone();
        self.set_route(href.clone());
        Action::Navigate(href)
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(false);
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(true);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
            _ => Action::None,
        }
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !self.area.contains(Position::new(mouse.column, mouse.row)) {
            return Action::None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Skip the border rows
                if mouse.row <= self.area.y || mouse.row >= self.area.bottom() - 1 {
                    return Action::None;
                }
                let clicked = self.list_state.offset() + (mouse.row - self.area.y - 1) as usize;
                if self.link_at(clicked).is_none() {
                    return Action::None;
                }
                self.list_state.select(Some(clicked));
                self.activate()
            }
            MouseEventKind::ScrollUp => {
                self.move_cursor(false);
                Action::None
            }
            MouseEventKind::ScrollDown => {
                self.move_cursor(true);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.area = rect;
        let active = self.active_index();

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| match row {
                SidebarRow::Header(title) => ListItem::new(Line::from(Span::styled(
                    title.to_uppercase(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                ))),
                SidebarRow::Link(link) => {
                    let style = if Some(index) == active {
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    let mut spans = vec![Span::raw("  "), Span::styled(link.title.clone(), style)];
                    if link.is_external() {
                        spans.push(Span::styled(" ↗", Style::default().fg(Color::DarkGray)));
                    }
                    ListItem::new(Line::from(spans))
                }
            })
            .collect();

        let total = items.len();
        let border_color = if self.focused { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Comptoir ")
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let (list_area, track) = ScrollbarHelper::calculate_areas(inner, total);
        let list = List::new(items).highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)));
        f.render_stateful_widget(list, list_area, &mut self.list_state);

        self.scrollbar_helper
            .update_state(total, self.list_state.selected(), list_area.height as usize);
        self.scrollbar_helper.render(f, track);
    }

    fn on_focus(&mut self) {
        self.focused = true;
    }

    fn on_blur(&mut self) {
        self.focused = false;
    }
}
