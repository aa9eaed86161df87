use crate::support::{click, contains_text, find_text, key, render};
use chrono::NaiveDate;
use comptoir::ui::components::date_range_picker::{format_day, PickerFocus};
use comptoir::ui::components::{DateRange, DateRangePicker, PeriodType};
use comptoir::ui::core::{Action, Component};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn picker() -> DateRangePicker {
    DateRangePicker::new(date(2026, 3, 15))
}

#[test]
fn test_preset_ranges() {
    assert_eq!(PeriodType::Custom.range(2024), None);
    assert_eq!(
        PeriodType::Trimester.range(2024),
        Some(DateRange::new(date(2024, 1, 1), date(2024, 3, 31)))
    );
    assert_eq!(
        PeriodType::Semester.range(2024),
        Some(DateRange::new(date(2024, 1, 1), date(2024, 6, 30)))
    );
    assert_eq!(
        PeriodType::Year.range(2024),
        Some(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)))
    );
}

#[test]
fn test_month_of_handles_leap_years() {
    assert_eq!(
        DateRange::month_of(date(2024, 2, 10)),
        Some(DateRange::new(date(2024, 2, 1), date(2024, 2, 29)))
    );
    assert_eq!(
        DateRange::month_of(date(2026, 12, 31)),
        Some(DateRange::new(date(2026, 12, 1), date(2026, 12, 31)))
    );
}

#[test]
fn test_contains() {
    let range = DateRange::new(date(2026, 1, 5), date(2026, 1, 10));
    assert!(range.contains(date(2026, 1, 5)));
    assert!(range.contains(date(2026, 1, 10)));
    assert!(!range.contains(date(2026, 1, 11)));

    let pending = DateRange {
        from: date(2026, 1, 5),
        to: None,
    };
    assert!(pending.contains(date(2026, 1, 5)));
    assert!(!pending.contains(date(2026, 1, 6)));
}

#[test]
fn test_labels() {
    assert_eq!(format_day(date(2026, 8, 3)), "03 août 2026");
    assert_eq!(
        DateRange::new(date(2026, 1, 5), date(2026, 2, 28)).label(),
        "05 janv. 2026 - 28 févr. 2026"
    );

    assert_eq!(picker().label(), "01 mars 2026 - 31 mars 2026");
    assert_eq!(picker().with_range(None).label(), "Sélectionner une période");
}

#[test]
fn test_pick_day_orders_endpoints() {
    let mut picker = picker();
    picker.open();

    picker.pick_day(date(2026, 3, 12));
    assert_eq!(
        picker.temporary(),
        Some(DateRange {
            from: date(2026, 3, 12),
            to: None
        })
    );

    // Second pick before the first swaps them
    picker.pick_day(date(2026, 3, 10));
    assert_eq!(
        picker.temporary(),
        Some(DateRange::new(date(2026, 3, 10), date(2026, 3, 12)))
    );

    // A third pick starts over
    picker.pick_day(date(2026, 3, 20));
    assert_eq!(picker.temporary().and_then(|range| range.to), None);
    assert_eq!(picker.period(), PeriodType::Custom);
}

#[test]
fn test_cancel_restores_applied_range() {
    let mut picker = picker();
    let applied = picker.applied();
    picker.open();
    picker.select_period(PeriodType::Year, 2026);
    assert_eq!(picker.period(), PeriodType::Year);
    assert_ne!(picker.temporary(), applied);

    picker.cancel();
    assert!(!picker.is_open());
    assert_eq!(picker.temporary(), applied);
    assert_eq!(picker.applied(), applied);
}

#[test]
fn test_apply_commits_temporary_range() {
    let mut picker = picker();
    picker.open();
    picker.select_period(PeriodType::Semester, 2026);

    let expected = DateRange::new(date(2026, 1, 1), date(2026, 6, 30));
    assert_eq!(picker.apply(), Action::DateRangeChanged(expected));
    assert_eq!(picker.applied(), Some(expected));
    assert!(!picker.is_open());

    // Nothing to commit
    let mut empty = DateRangePicker::new(date(2026, 3, 15)).with_range(None);
    empty.open();
    assert_eq!(empty.apply(), Action::None);
}

#[test]
fn test_keyboard_preset_flow() {
    let mut picker = picker();
    picker.handle_key_events(key(KeyCode::Enter));
    assert!(picker.is_open());
    assert_eq!(picker.focus(), PickerFocus::Periods);

    // First preset is the whole year
    picker.handle_key_events(key(KeyCode::Enter));
    assert_eq!(picker.period(), PeriodType::Year);

    picker.handle_key_events(key(KeyCode::Tab));
    assert_eq!(picker.focus(), PickerFocus::Calendar);
    picker.handle_key_events(key(KeyCode::Tab));
    assert_eq!(picker.focus(), PickerFocus::Buttons);

    let action = picker.handle_key_events(key(KeyCode::Enter));
    assert_eq!(
        action,
        Action::DateRangeChanged(DateRange::new(date(2026, 1, 1), date(2026, 12, 31)))
    );
}

#[test]
fn test_keyboard_calendar_flow() {
    let mut picker = picker();
    picker.handle_key_events(key(KeyCode::Enter));
    picker.handle_key_events(key(KeyCode::Tab));
    assert_eq!(picker.cursor(), date(2026, 3, 1));

    picker.handle_key_events(key(KeyCode::Right));
    picker.handle_key_events(key(KeyCode::Down));
    assert_eq!(picker.cursor(), date(2026, 3, 9));
    picker.handle_key_events(key(KeyCode::PageDown));
    assert_eq!(picker.cursor(), date(2026, 4, 9));

    picker.handle_key_events(key(KeyCode::Enter));
    picker.handle_key_events(key(KeyCode::Left));
    picker.handle_key_events(key(KeyCode::Char(' ')));
    assert_eq!(
        picker.temporary(),
        Some(DateRange::new(date(2026, 4, 8), date(2026, 4, 9)))
    );

    // Cancel button
    picker.handle_key_events(key(KeyCode::Tab));
    picker.handle_key_events(key(KeyCode::Left));
    assert_eq!(picker.handle_key_events(key(KeyCode::Enter)), Action::None);
    assert!(!picker.is_open());
    assert_eq!(picker.applied(), DateRange::month_of(date(2026, 3, 15)));
}

#[test]
fn test_escape_and_blur_cancel() {
    let mut picker = picker();
    picker.open();
    picker.pick_day(date(2026, 3, 2));
    picker.handle_key_events(key(KeyCode::Esc));
    assert!(!picker.is_open());
    assert_eq!(picker.temporary(), picker.applied());

    picker.open();
    picker.on_blur();
    assert!(!picker.is_open());
}

#[test]
fn test_render_trigger_and_popup() {
    let mut picker = picker();
    let area = Rect::new(0, 0, 34, 3);
    let buffer = render(&mut picker, 80, 24, area);
    assert!(contains_text(&buffer, "01 mars 2026 - 31 mars 2026"));
    assert!(!contains_text(&buffer, "Calendrier"));

    picker.open();
    let buffer = render(&mut picker, 80, 24, area);
    assert!(contains_text(&buffer, "Périodes"));
    assert!(contains_text(&buffer, "Calendrier"));
    assert!(contains_text(&buffer, "‹ mars 2026 ›"));
    assert!(contains_text(&buffer, "[Annuler]"));
    assert!(contains_text(&buffer, "[Valider]"));
}

#[test]
fn test_mouse_days_then_apply() {
    let mut picker = picker();
    let area = Rect::new(0, 0, 34, 3);
    render(&mut picker, 80, 24, area);

    picker.handle_mouse_events(click(3, 1));
    assert!(picker.is_open());

    let buffer = render(&mut picker, 80, 24, area);
    let (x, y) = find_text(&buffer, "12").expect("day 12 is rendered");
    picker.handle_mouse_events(click(x, y));
    let (x, y) = find_text(&buffer, "10").expect("day 10 is rendered");
    picker.handle_mouse_events(click(x, y));
    assert_eq!(picker.focus(), PickerFocus::Calendar);

    let (x, y) = find_text(&buffer, "[Valider]").expect("apply button is rendered");
    let expected = DateRange::new(date(2026, 3, 10), date(2026, 3, 12));
    assert_eq!(picker.handle_mouse_events(click(x, y)), Action::DateRangeChanged(expected));
    assert!(!picker.is_open());
}

#[test]
fn test_mouse_preset_and_outside_click() {
    let mut picker = picker();
    let area = Rect::new(0, 0, 34, 3);
    picker.open();
    let buffer = render(&mut picker, 80, 24, area);

    let (x, y) = find_text(&buffer, "Semestre").expect("preset is rendered");
    picker.handle_mouse_events(click(x, y));
    assert_eq!(picker.period(), PeriodType::Semester);

    // Clicking elsewhere discards the edit
    picker.handle_mouse_events(click(75, 22));
    assert!(!picker.is_open());
    assert_eq!(picker.applied(), DateRange::month_of(date(2026, 3, 15)));
}
