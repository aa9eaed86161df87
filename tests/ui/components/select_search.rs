use crate::support::{click, ctrl, find_text, key, render};
use comptoir::ui::components::select_search::{filter_options, Direction, MatchMode, SearchableSelector, SelectOption};
use comptoir::ui::core::{Action, Component, PointerHub};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

fn fruits() -> Vec<SelectOption> {
    vec![SelectOption::new("a", "Apple"), SelectOption::new("b", "Banana")]
}

fn journals() -> Vec<SelectOption> {
    vec![
        SelectOption::new("AC", "Achats").with_name("Journal des achats"),
        SelectOption::new("VT", "Ventes").with_name("Journal des ventes"),
        SelectOption::new("BQ", "Banque").with_name("Journal de banque"),
        SelectOption::new("OD", "Opérations diverses"),
    ]
}

#[test]
fn test_filter_is_case_insensitive_substring_on_label() {
    let options = journals();
    assert_eq!(filter_options(&options, "AN", MatchMode::Label), vec![2]);
    assert_eq!(filter_options(&options, "ven", MatchMode::Label), vec![1]);
    assert!(filter_options(&options, "zzz", MatchMode::Label).is_empty());
}

#[test]
fn test_empty_term_keeps_every_option_in_order() {
    let options = journals();
    assert_eq!(filter_options(&options, "", MatchMode::Label), vec![0, 1, 2, 3]);
    assert_eq!(filter_options(&options, "", MatchMode::Extended), vec![0, 1, 2, 3]);
}

#[test]
fn test_extended_mode_matches_value_or_name() {
    let options = journals();
    // "vt" is only in a value, "journal de" only in names
    assert!(filter_options(&options, "vt", MatchMode::Label).is_empty());
    assert_eq!(filter_options(&options, "vt", MatchMode::Extended), vec![1]);
    assert_eq!(filter_options(&options, "journal de", MatchMode::Extended), vec![0, 1, 2]);
}

#[test]
fn test_apple_banana_scenario() {
    let mut selector = SearchableSelector::new("fruit", fruits());

    // Down on a closed selector opens it without selecting anything
    assert_eq!(selector.handle_key_events(key(KeyCode::Down)), Action::None);
    assert!(selector.is_open());
    assert_eq!(selector.state().highlighted(), None);

    selector.handle_key_events(key(KeyCode::Char('a')));
    selector.handle_key_events(key(KeyCode::Char('n')));
    let visible: Vec<&str> = selector.visible_options().iter().map(|o| o.label.as_str()).collect();
    assert_eq!(visible, vec!["Banana"]);
    assert_eq!(selector.state().highlighted(), None);

    selector.handle_key_events(key(KeyCode::Down));
    assert_eq!(selector.state().highlighted(), Some(0));

    let action = selector.handle_key_events(key(KeyCode::Enter));
    assert_eq!(
        action,
        Action::SelectionChanged {
            selector: "fruit".to_string(),
            value: "b".to_string(),
        }
    );
    assert!(!selector.is_open());
    assert_eq!(selector.state().search_term(), "");
    assert_eq!(selector.state().selected_value(), Some("b"));
}

#[test]
fn test_filter_resets_highlight() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    selector.open();
    selector.navigate(Direction::Down);
    selector.navigate(Direction::Down);
    assert_eq!(selector.state().highlighted(), Some(1));

    selector.filter("a");
    assert_eq!(selector.state().highlighted(), None);

    selector.navigate(Direction::Down);
    selector.clear_search();
    assert_eq!(selector.state().highlighted(), None);
}

#[test]
fn test_navigation_wraps_around() {
    let mut selector = SearchableSelector::new("journal", journals());
    selector.open();

    // Up from nothing lands on the last row
    selector.navigate(Direction::Up);
    assert_eq!(selector.state().highlighted(), Some(3));
    selector.navigate(Direction::Down);
    assert_eq!(selector.state().highlighted(), Some(0));
    selector.navigate(Direction::Up);
    assert_eq!(selector.state().highlighted(), Some(3));
}

#[test]
fn test_navigation_on_empty_view_is_noop() {
    let mut selector = SearchableSelector::new("journal", journals());
    selector.open();
    selector.filter("nothing matches");
    selector.navigate(Direction::Down);
    assert_eq!(selector.state().highlighted(), None);
    assert_eq!(selector.commit(None), Action::None);
    assert!(selector.is_open());
}

#[test]
fn test_commit_without_highlight_is_noop() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    selector.open();
    assert_eq!(selector.commit(None), Action::None);
    assert!(selector.is_open());
}

#[test]
fn test_committing_selected_value_toggles_off() {
    let mut selector = SearchableSelector::new("fruit", fruits()).with_value(Some("a".to_string()));
    assert_eq!(selector.display_text(), "Apple");

    selector.open();
    let action = selector.commit(Some(0));
    assert_eq!(
        action,
        Action::SelectionChanged {
            selector: "fruit".to_string(),
            value: String::new(),
        }
    );
    assert_eq!(selector.state().selected_value(), None);

    // Committing another value reports that value
    selector.open();
    assert_eq!(
        selector.commit(Some(1)),
        Action::SelectionChanged {
            selector: "fruit".to_string(),
            value: "b".to_string(),
        }
    );
}

#[test]
fn test_escape_dismisses_without_changing_selection() {
    let mut selector = SearchableSelector::new("fruit", fruits()).with_value(Some("b".to_string()));
    selector.handle_key_events(key(KeyCode::Enter));
    selector.handle_key_events(key(KeyCode::Char('p')));
    selector.handle_key_events(key(KeyCode::Down));

    assert_eq!(selector.handle_key_events(key(KeyCode::Esc)), Action::None);
    assert!(!selector.is_open());
    assert_eq!(selector.state().search_term(), "");
    assert_eq!(selector.state().highlighted(), None);
    assert_eq!(selector.state().selected_value(), Some("b"));
}

#[test]
fn test_search_editing_keys() {
    let mut selector = SearchableSelector::new("journal", journals());
    selector.open();
    for c in "ban".chars() {
        selector.handle_key_events(key(KeyCode::Char(c)));
    }
    assert_eq!(selector.state().search_term(), "ban");

    selector.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(selector.state().search_term(), "ba");

    selector.handle_key_events(ctrl('u'));
    assert_eq!(selector.state().search_term(), "");
    assert_eq!(selector.visible_options().len(), 4);
}

#[test]
fn test_disabled_selector_ignores_open() {
    let mut selector = SearchableSelector::new("fruit", fruits()).with_disabled(true);
    selector.open();
    assert!(!selector.is_open());
    selector.handle_key_events(key(KeyCode::Down));
    assert!(!selector.is_open());

    // Disabling an open selector closes it
    let mut selector = SearchableSelector::new("fruit", fruits());
    selector.open();
    selector.set_disabled(true);
    assert!(!selector.is_open());
}

#[test]
fn test_replacing_options_refilters() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    selector.open();
    selector.filter("an");
    selector.navigate(Direction::Down);

    selector.set_options(vec![
        SelectOption::new("o", "Orange"),
        SelectOption::new("m", "Mango"),
        SelectOption::new("k", "Kiwi"),
    ]);
    let visible: Vec<&str> = selector.visible_options().iter().map(|o| o.value.as_str()).collect();
    assert_eq!(visible, vec!["o", "m"]);
    assert_eq!(selector.state().highlighted(), None);
}

#[test]
fn test_subscription_is_scoped_to_open_state() {
    let hub = PointerHub::new();
    let mut selector = SearchableSelector::new("fruit", fruits()).with_pointer_hub(hub.clone());
    assert_eq!(hub.listener_count(), 0);

    selector.open();
    assert!(selector.has_pointer_subscription());
    assert_eq!(hub.listener_count(), 1);

    selector.dismiss();
    assert_eq!(hub.listener_count(), 0);

    selector.open();
    selector.navigate(Direction::Down);
    selector.commit(None);
    assert_eq!(hub.listener_count(), 0);

    // Dropped while open
    selector.open();
    assert_eq!(hub.listener_count(), 1);
    drop(selector);
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn test_outside_click_dismisses() {
    let hub = PointerHub::new();
    let mut selector = SearchableSelector::new("fruit", fruits()).with_pointer_hub(hub.clone());
    let area = Rect::new(0, 0, 30, 3);
    selector.open();
    render(&mut selector, 80, 24, area);

    // A press inside the popup is not an outside click
    assert_eq!(hub.dispatch(&click(2, 5)), 0);
    selector.handle_outside_click();
    assert!(selector.is_open());

    assert_eq!(hub.dispatch(&click(70, 20)), 1);
    selector.handle_outside_click();
    assert!(!selector.is_open());
    assert_eq!(hub.listener_count(), 0);
}

#[test]
fn test_press_on_trigger_before_redraw_is_inside() {
    let hub = PointerHub::new();
    let mut selector = SearchableSelector::new("fruit", fruits()).with_pointer_hub(hub.clone());
    let area = Rect::new(0, 0, 30, 3);
    render(&mut selector, 80, 24, area);

    // Opened, but no frame drawn yet
    selector.open();
    assert_eq!(hub.dispatch(&click(2, 1)), 0);
    selector.handle_outside_click();
    assert!(selector.is_open());

    assert_eq!(hub.dispatch(&click(70, 20)), 1);
    selector.handle_outside_click();
    assert!(!selector.is_open());
}

#[test]
fn test_mouse_trigger_and_row_click() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    let area = Rect::new(2, 1, 30, 3);
    render(&mut selector, 80, 24, area);

    selector.handle_mouse_events(click(5, 2));
    assert!(selector.is_open());

    let buffer = render(&mut selector, 80, 24, area);
    let (x, y) = find_text(&buffer, "Banana").expect("Banana row is rendered");
    let action = selector.handle_mouse_events(click(x, y));
    assert_eq!(
        action,
        Action::SelectionChanged {
            selector: "fruit".to_string(),
            value: "b".to_string(),
        }
    );
    assert!(!selector.is_open());
}

#[test]
fn test_render_shows_placeholder_and_empty_text() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    let area = Rect::new(0, 0, 40, 3);
    let buffer = render(&mut selector, 80, 24, area);
    assert!(find_text(&buffer, "Sélectionner une option").is_some());

    selector.open();
    selector.filter("xyz");
    let buffer = render(&mut selector, 80, 24, area);
    assert!(find_text(&buffer, "Aucun résultat trouvé").is_some());
}

#[test]
fn test_popup_opens_above_when_no_room_below() {
    let mut selector = SearchableSelector::new("fruit", fruits());
    let area = Rect::new(0, 20, 30, 3);
    selector.open();
    let buffer = render(&mut selector, 80, 24, area);
    let (_, y) = find_text(&buffer, "Apple").expect("Apple row is rendered");
    assert!(y < 20);
}
