//! Sign-in and sign-up screens built from the form inputs.
//!
//! Both screens are a card of fields next to an optional presentation
//! panel. Submitting validates the fields in place and, when they are all
//! valid, emits the collected values as an [`Action`](crate::ui::core::Action).

pub mod login_screen;
pub mod register_screen;

pub use login_screen::{LoginField, LoginScreen};
pub use register_screen::{RegisterField, RegisterScreen};

use crate::constants::{AUTH_INVALID_EMAIL, AUTH_REQUIRED_FIELD};
use crate::ui::components::variants::ButtonVariant;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use std::fmt;

/// Side panel is only drawn when the screen is at least this wide.
const SIDE_PANEL_MIN_WIDTH: u16 = 100;

/// Values of a submitted sign-in form.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Values of a submitted sign-up form.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub enterprise: String,
    /// Optional free text.
    pub presentation: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("enterprise", &self.enterprise)
            .field("presentation", &self.presentation)
            .finish()
    }
}

/// Error for a mandatory field.
pub fn required(value: &str) -> Option<String> {
    value.trim().is_empty().then(|| AUTH_REQUIRED_FIELD.to_string())
}

/// Error for a mandatory email field.
pub fn email_error(value: &str) -> Option<String> {
    if let Some(error) = required(value) {
        return Some(error);
    }
    match value.trim().split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => None,
        _ => Some(AUTH_INVALID_EMAIL.to_string()),
    }
}

/// Split the screen into the form card and, when wide enough, the
/// presentation panel.
fn split_screen(area: Rect) -> (Rect, Option<Rect>) {
    if area.width < SIDE_PANEL_MIN_WIDTH {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn card_block(focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Comptoir ")
        .border_style(Style::default().fg(border_color))
}

fn render_heading(f: &mut Frame, rect: Rect, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines), rect);
}

/// Full-width primary button.
fn render_button(f: &mut Frame, rect: Rect, label: &str, focused: bool) {
    let button = ButtonVariant::Default.style();
    let style = if focused {
        button.style.add_modifier(Modifier::BOLD)
    } else {
        button.style
    };
    let border_style = if focused {
        Style::default().fg(Color::White)
    } else {
        button.border_style
    };
    f.render_widget(
        Paragraph::new(label.to_string())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style),
            ),
        rect,
    );
}

/// One line of text ending with an underlined link.
fn render_link(f: &mut Frame, rect: Rect, prefix: &str, link: &str, focused: bool, alignment: Alignment) {
    let mut link_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    if focused {
        link_style = link_style.add_modifier(Modifier::REVERSED);
    }
    let mut spans = Vec::new();
    if !prefix.is_empty() {
        spans.push(Span::styled(format!("{prefix} "), Style::default().fg(Color::Gray)));
    }
    spans.push(Span::styled(link.to_string(), link_style));
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(alignment), rect);
}

fn render_side_panel(f: &mut Frame, rect: Rect, title: &str, lead: &str, bullets: &[&str], footer: &str) {
    let mut lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(lead.to_string()),
        Line::from(""),
    ];
    lines.extend(bullets.iter().map(|bullet| Line::from(format!("  • {bullet}"))));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(footer.to_string(), Style::default().fg(Color::DarkGray))));

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Gray).bg(Color::Rgb(30, 30, 40)))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray)),
            ),
        rect,
    );
}
