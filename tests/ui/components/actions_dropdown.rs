use crate::support::{click, contains_text, find_text, key, render};
use comptoir::ui::components::actions_dropdown::MenuRow;
use comptoir::ui::components::{ActionItem, ActionsDropdown};
use comptoir::ui::core::{Action, Component};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

fn items() -> Vec<ActionItem> {
    vec![
        ActionItem::new("details", "Détails"),
        ActionItem::new("supprimer", "Supprimer").destructive(),
        ActionItem::new("archiver", "Archiver").hidden(true),
        ActionItem::new("imprimer", "Imprimer").disabled(true),
        ActionItem::new("dupliquer", "Dupliquer"),
    ]
}

fn highlighted_id(dropdown: &ActionsDropdown) -> Option<&str> {
    dropdown.highlighted().map(|item| item.id.as_str())
}

#[test]
fn test_hidden_items_and_separators() {
    let dropdown = ActionsDropdown::new(items());
    let visible: Vec<&str> = dropdown.visible_items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(visible, vec!["details", "supprimer", "imprimer", "dupliquer"]);
    assert_eq!(
        dropdown.rows(),
        vec![
            MenuRow::Item(0),
            MenuRow::Item(1),
            MenuRow::Separator,
            MenuRow::Item(2),
            MenuRow::Item(3),
        ]
    );
}

#[test]
fn test_no_separator_after_last_item() {
    let dropdown = ActionsDropdown::new(vec![
        ActionItem::new("a", "Modifier"),
        ActionItem::new("b", "Supprimer").destructive(),
    ]);
    assert_eq!(dropdown.rows(), vec![MenuRow::Item(0), MenuRow::Item(1)]);
}

#[test]
fn test_navigation_skips_disabled_and_wraps() {
    let mut dropdown = ActionsDropdown::new(items());
    dropdown.handle_key_events(key(KeyCode::Enter));
    assert!(dropdown.is_open());
    assert_eq!(highlighted_id(&dropdown), Some("details"));

    dropdown.handle_key_events(key(KeyCode::Down));
    assert_eq!(highlighted_id(&dropdown), Some("supprimer"));
    dropdown.handle_key_events(key(KeyCode::Down));
    assert_eq!(highlighted_id(&dropdown), Some("dupliquer"));
    dropdown.handle_key_events(key(KeyCode::Down));
    assert_eq!(highlighted_id(&dropdown), Some("details"));
    dropdown.handle_key_events(key(KeyCode::Up));
    assert_eq!(highlighted_id(&dropdown), Some("dupliquer"));

    assert_eq!(
        dropdown.handle_key_events(key(KeyCode::Enter)),
        Action::MenuAction("dupliquer".to_string())
    );
    assert!(!dropdown.is_open());
}

#[test]
fn test_disabled_items_do_not_fire() {
    let mut dropdown = ActionsDropdown::new(items());
    assert_eq!(dropdown.activate(2), Action::None);
    assert_eq!(dropdown.activate(9), Action::None);

    let mut all_disabled = ActionsDropdown::new(vec![ActionItem::new("x", "Exporter").disabled(true)]);
    all_disabled.open();
    assert!(all_disabled.is_open());
    assert_eq!(all_disabled.highlighted(), None);
    assert_eq!(all_disabled.handle_key_events(key(KeyCode::Enter)), Action::None);
}

#[test]
fn test_everything_hidden_renders_nothing() {
    let mut dropdown = ActionsDropdown::new(vec![ActionItem::new("x", "Exporter").hidden(true)]);
    assert!(!dropdown.is_rendered());
    dropdown.open();
    assert!(!dropdown.is_open());
    assert_eq!(dropdown.handle_key_events(key(KeyCode::Enter)), Action::None);

    let buffer = render(&mut dropdown, 40, 10, Rect::new(0, 0, 5, 3));
    assert!(!contains_text(&buffer, "⋯"));
}

#[test]
fn test_set_items_closes_when_nothing_is_left() {
    let mut dropdown = ActionsDropdown::new(items());
    dropdown.open();
    dropdown.set_items(vec![ActionItem::new("x", "Exporter").hidden(true)]);
    assert!(!dropdown.is_open());
}

#[test]
fn test_mouse_menu() {
    let mut dropdown = ActionsDropdown::new(items());
    let area = Rect::new(40, 0, 5, 3);
    let buffer = render(&mut dropdown, 80, 24, area);
    assert!(contains_text(&buffer, "⋯"));

    dropdown.handle_mouse_events(click(42, 1));
    assert!(dropdown.is_open());
    let buffer = render(&mut dropdown, 80, 24, area);
    assert!(contains_text(&buffer, "Détails"));
    assert!(!contains_text(&buffer, "Archiver"));

    // The separator sits right under "Supprimer"
    let (x, y) = find_text(&buffer, "Supprimer").unwrap();
    assert_eq!(dropdown.handle_mouse_events(click(x, y + 1)), Action::None);
    assert!(dropdown.is_open());

    assert_eq!(
        dropdown.handle_mouse_events(click(x, y)),
        Action::MenuAction("supprimer".to_string())
    );

    dropdown.open();
    dropdown.handle_mouse_events(click(5, 20));
    assert!(!dropdown.is_open());
}
