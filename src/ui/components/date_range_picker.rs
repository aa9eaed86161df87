//! Period picker with presets and a one-month calendar.
//!
//! Edits go to a temporary range; only "Valider" commits it, "Annuler" and
//! Escape restore the applied one.

use crate::constants::{
    DATE_RANGE_APPLY, DATE_RANGE_CALENDAR, DATE_RANGE_CANCEL, DATE_RANGE_PERIODS, DATE_RANGE_PLACEHOLDER,
};
use crate::ui::core::{Action, Component};
use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use serde::{Deserialize, Serialize};

const MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.", "déc.",
];
const MONTHS_LONG: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];
const WEEKDAYS: &str = "lu ma me je ve sa di";

/// `to` is `None` while only the first day of a range has been picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to: Some(to) }
    }

    /// First to last day of the month containing `date`.
    pub fn month_of(date: NaiveDate) -> Option<Self> {
        let first = date.with_day(1)?;
        let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
        Some(Self::new(first, last))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.to {
            Some(to) => self.from <= date && date <= to,
            None => self.from == date,
        }
    }

    /// `dd MMM yyyy - dd MMM yyyy` with French month abbreviations.
    pub fn label(&self) -> String {
        match self.to {
            Some(to) => format!("{} - {}", format_day(self.from), format_day(to)),
            None => format_day(self.from),
        }
    }
}

pub fn format_day(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS_SHORT[date.month0() as usize],
        date.year()
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodType {
    #[default]
    Custom,
    Trimester,
    Semester,
    Year,
}

impl PeriodType {
    /// Presets offered in the left panel, in display order.
    pub const PRESETS: [PeriodType; 3] = [PeriodType::Year, PeriodType::Semester, PeriodType::Trimester];

    pub fn label(self) -> &'static str {
        match self {
            PeriodType::Custom => "Personnalisée",
            PeriodType::Trimester => "Trimestre",
            PeriodType::Semester => "Semestre",
            PeriodType::Year => "Année",
        }
    }

    /// Range covered by the preset in `year`: the whole year, or its first
    /// semester or trimester. `Custom` has none.
    pub fn range(self, year: i32) -> Option<DateRange> {
        let months = match self {
            PeriodType::Custom => return None,
            PeriodType::Trimester => 3,
            PeriodType::Semester => 6,
            PeriodType::Year => 12,
        };
        let from = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let to = from.checked_add_months(Months::new(months))?.pred_opt()?;
        Some(DateRange::new(from, to))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerFocus {
    Periods,
    Calendar,
    Buttons,
}

pub struct DateRangePicker {
    today: NaiveDate,
    applied: Option<DateRange>,
    temp: Option<DateRange>,
    period: PeriodType,
    is_open: bool,
    focus: PickerFocus,
    period_cursor: usize,
    cursor: NaiveDate,
    apply_focused: bool,
    trigger_area: Rect,
    popup_area: Rect,
    period_targets: Vec<(Rect, PeriodType)>,
    day_targets: Vec<(Rect, NaiveDate)>,
    cancel_area: Rect,
    apply_area: Rect,
}

impl DateRangePicker {
    /// The applied range starts as the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        let applied = DateRange::month_of(today);
        Self {
            today,
            applied,
            temp: applied,
            period: PeriodType::Custom,
            is_open: false,
            focus: PickerFocus::Periods,
            period_cursor: 0,
            cursor: today,
            apply_focused: true,
            trigger_area: Rect::default(),
            popup_area: Rect::default(),
            period_targets: Vec::new(),
            day_targets: Vec::new(),
            cancel_area: Rect::default(),
            apply_area: Rect::default(),
        }
    }

    pub fn with_range(mut self, range: Option<DateRange>) -> Self {
        self.applied = range;
        self.temp = range;
        self
    }

    pub fn applied(&self) -> Option<DateRange> {
        self.applied
    }

    pub fn temporary(&self) -> Option<DateRange> {
        self.temp
    }

    pub fn period(&self) -> PeriodType {
        self.period
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn focus(&self) -> PickerFocus {
        self.focus
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn label(&self) -> String {
        self.applied
            .map(|range| range.label())
            .unwrap_or_else(|| DATE_RANGE_PLACEHOLDER.to_string())
    }

    pub fn open(&mut self) {
        self.temp = self.applied;
        self.cursor = self.temp.map_or(self.today, |range| range.from);
        self.focus = PickerFocus::Periods;
        self.is_open = true;
    }

    pub fn select_period(&mut self, period: PeriodType, year: i32) {
        if let Some(range) = period.range(year) {
            self.temp = Some(range);
            self.cursor = range.from;
            self.period = period;
        }
    }

    /// Calendar click: start a new range, or complete the pending one.
    pub fn pick_day(&mut self, date: NaiveDate) {
        self.temp = Some(match self.temp {
            Some(DateRange { from, to: None }) if date < from => DateRange::new(date, from),
            Some(DateRange { from, to: None }) => DateRange::new(from, date),
            _ => DateRange { from: date, to: None },
        });
        self.cursor = date;
        self.period = PeriodType::Custom;
    }

    pub fn apply(&mut self) -> Action {
        self.applied = self.temp;
        self.is_open = false;
        match self.temp {
            Some(range) => {
                log::info!("Date range applied: {}", range.label());
                Action::DateRangeChanged(range)
            }
            None => Action::None,
        }
    }

    pub fn cancel(&mut self) {
        self.temp = self.applied;
        self.is_open = false;
    }

    fn move_cursor(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.cursor.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.cursor.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    fn move_month(&mut self, forward: bool) {
        let moved = if forward {
            self.cursor.checked_add_months(Months::new(1))
        } else {
            self.cursor.checked_sub_months(Months::new(1))
        };
        if let Some(date) = moved {
            self.cursor = date;
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            PickerFocus::Periods => PickerFocus::Calendar,
            PickerFocus::Calendar => PickerFocus::Buttons,
            PickerFocus::Buttons => PickerFocus::Periods,
        };
    }

    fn handle_open_keys(&mut self, key: KeyEvent) -> Action {
        match (self.focus, key.code) {
            (_, KeyCode::Esc) => self.cancel(),
            (_, KeyCode::Tab) => self.cycle_focus(),
            (PickerFocus::Periods, KeyCode::Down) => {
                self.period_cursor = (self.period_cursor + 1) % PeriodType::PRESETS.len();
            }
            (PickerFocus::Periods, KeyCode::Up) => {
                self.period_cursor = (self.period_cursor + PeriodType::PRESETS.len() - 1) % PeriodType::PRESETS.len();
            }
            (PickerFocus::Periods, KeyCode::Enter) => {
                self.select_period(PeriodType::PRESETS[self.period_cursor], self.today.year());
            }
            (PickerFocus::Calendar, KeyCode::Left) => self.move_cursor(-1),
            (PickerFocus::Calendar, KeyCode::Right) => self.move_cursor(1),
            (PickerFocus::Calendar, KeyCode::Up) => self.move_cursor(-7),
            (PickerFocus::Calendar, KeyCode::Down) => self.move_cursor(7),
            (PickerFocus::Calendar, KeyCode::PageUp) => self.move_month(false),
            (PickerFocus::Calendar, KeyCode::PageDown) => self.move_month(true),
            (PickerFocus::Calendar, KeyCode::Enter | KeyCode::Char(' ')) => self.pick_day(self.cursor),
            (PickerFocus::Buttons, KeyCode::Left | KeyCode::Right) => self.apply_focused = !self.apply_focused,
            (PickerFocus::Buttons, KeyCode::Enter) => {
                if self.apply_focused {
                    return self.apply();
                }
                self.cancel();
            }
            _ => {}
        }
        Action::None
    }

    fn render_popup(&mut self, f: &mut Frame) {
        let screen = f.area();
        let width = 42.min(screen.width);
        let height = 14.min(screen.height);
        let x = self.trigger_area.x.min(screen.right().saturating_sub(width));
        let y = if self.trigger_area.bottom() + height <= screen.bottom() {
            self.trigger_area.bottom()
        } else {
            self.trigger_area.y.saturating_sub(height)
        };
        self.popup_area = Rect::new(x, y, width, height);
        f.render_widget(Clear, self.popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(self.popup_area);
        f.render_widget(block, self.popup_area);
        if inner.width < 36 || inner.height < 11 {
            return;
        }

        let header = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let left = Rect::new(inner.x, inner.y, 13, inner.height);
        let right = Rect::new(inner.x + 14, inner.y, inner.width - 14, inner.height);

        // Presets
        f.render_widget(Paragraph::new(Span::styled(DATE_RANGE_PERIODS, header)), left);
        self.period_targets.clear();
        for (index, period) in PeriodType::PRESETS.iter().enumerate() {
            let area = Rect::new(left.x, left.y + 2 + index as u16, left.width, 1);
            let mut style = if self.period == *period {
                Style::default().fg(Color::Black).bg(Color::Gray)
            } else {
                Style::default().fg(Color::Gray)
            };
            if self.focus == PickerFocus::Periods && self.period_cursor == index {
                style = style.add_modifier(Modifier::REVERSED);
            }
            f.render_widget(Paragraph::new(Span::styled(format!(" {}", period.label()), style)), area);
            self.period_targets.push((area, *period));
        }

        // Calendar
        f.render_widget(Paragraph::new(Span::styled(DATE_RANGE_CALENDAR, header)), right);
        let title = format!("‹ {} {} ›", MONTHS_LONG[self.cursor.month0() as usize], self.cursor.year());
        f.render_widget(
            Paragraph::new(title).style(Style::default().fg(Color::Cyan)),
            Rect::new(right.x, right.y + 1, right.width, 1),
        );
        f.render_widget(
            Paragraph::new(WEEKDAYS).style(Style::default().fg(Color::DarkGray)),
            Rect::new(right.x, right.y + 2, right.width, 1),
        );
        self.render_days(f, Rect::new(right.x, right.y + 3, 21, 6));

        // Buttons
        let buttons_y = inner.bottom() - 1;
        let cancel = format!("[{DATE_RANGE_CANCEL}]");
        let apply = format!("[{DATE_RANGE_APPLY}]");
        let apply_x = inner.right().saturating_sub(apply.chars().count() as u16);
        let cancel_x = apply_x.saturating_sub(cancel.chars().count() as u16 + 1);
        self.cancel_area = Rect::new(cancel_x, buttons_y, cancel.chars().count() as u16, 1);
        self.apply_area = Rect::new(apply_x, buttons_y, apply.chars().count() as u16, 1);
        let button_style = |active: bool| {
            if active && self.focus == PickerFocus::Buttons {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            }
        };
        f.render_widget(
            Paragraph::new(cancel).style(button_style(!self.apply_focused)),
            self.cancel_area,
        );
        f.render_widget(Paragraph::new(apply).style(button_style(self.apply_focused)), self.apply_area);
    }

    fn render_days(&mut self, f: &mut Frame, area: Rect) {
        self.day_targets.clear();
        let Some(month) = DateRange::month_of(self.cursor) else {
            return;
        };
        let last_day = month.to.map_or(28, |to| to.day());
        let offset = month.from.weekday().num_days_from_monday();

        for day in 1..=last_day {
            let Some(date) = month.from.with_day(day) else {
                continue;
            };
            let slot = offset + day - 1;
            let cell = Rect::new(area.x + (slot % 7) as u16 * 3, area.y + (slot / 7) as u16, 2, 1);
            if cell.bottom() > area.bottom() {
                break;
            }

            let in_range = self.temp.is_some_and(|range| range.contains(date));
            let is_endpoint = self.temp.is_some_and(|range| range.from == date || range.to == Some(date));
            let mut style = if is_endpoint {
                Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if in_range {
                Style::default().fg(Color::White).bg(Color::Rgb(40, 60, 80))
            } else {
                Style::default().fg(Color::Gray)
            };
            if date == self.today {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            if self.focus == PickerFocus::Calendar && date == self.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            f.render_widget(Paragraph::new(Line::from(Span::styled(format!("{day:>2}"), style))), cell);
            self.day_targets.push((cell, date));
        }
    }
}

impl Component for DateRangePicker {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.is_open {
            return self.handle_open_keys(key);
        }
        if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
            self.open();
        }
        Action::None
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return Action::None;
        }
        let point = Position::new(mouse.column, mouse.row);

        if self.trigger_area.contains(point) {
            if self.is_open {
                self.cancel();
            } else {
                self.open();
            }
            return Action::None;
        }
        if !self.is_open {
            return Action::None;
        }
        if !self.popup_area.contains(point) {
            self.cancel();
            return Action::None;
        }

        if self.apply_area.contains(point) {
            return self.apply();
        }
        if self.cancel_area.contains(point) {
            self.cancel();
            return Action::None;
        }
        if let Some((_, period)) = self.period_targets.iter().find(|(area, _)| area.contains(point)) {
            let period = *period;
            self.focus = PickerFocus::Periods;
            self.select_period(period, self.today.year());
        } else if let Some((_, date)) = self.day_targets.iter().find(|(area, _)| area.contains(point)) {
            let date = *date;
            self.focus = PickerFocus::Calendar;
            self.pick_day(date);
        }
        Action::None
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.trigger_area = rect;
        let style = if self.applied.is_some() {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let border = if self.is_open { Color::Cyan } else { Color::Gray };
        f.render_widget(
            Paragraph::new(format!("📅 {}", self.label())).style(style).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            ),
            rect,
        );

        if self.is_open {
            self.render_popup(f);
        }
    }

    fn on_blur(&mut self) {
        if self.is_open {
            self.cancel();
        }
    }
}
