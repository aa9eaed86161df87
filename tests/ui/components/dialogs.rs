use crate::support::{click, contains_text, find_text, key, render};
use comptoir::ui::components::dialogs::{DeleteDialog, DialogButton, IconSize, LogsDialog, MessageDialog, MessageKind};
use comptoir::ui::core::{Action, Component};
use crossterm::event::KeyCode;
use ratatui::{backend::TestBackend, layout::Rect, Terminal};

#[test]
fn test_french_defaults() {
    let dialog = DeleteDialog::new();
    assert_eq!(dialog.title(), "Êtes-vous sûr ?");
    assert_eq!(dialog.description(), "Cette action ne peut pas être annulée.");
    assert_eq!(dialog.icon_size(), IconSize::Sm);
    assert!(!dialog.is_open());
}

#[test]
fn test_icon_size_lookup() {
    let sizes = [
        (IconSize::Xs, 8),
        (IconSize::Sm, 12),
        (IconSize::Md, 16),
        (IconSize::Lg, 20),
        (IconSize::Xl, 24),
    ];
    for (size, pixels) in sizes {
        assert_eq!(size.dimensions(), (pixels, pixels));
    }
    assert_eq!(IconSize::Xs.trigger_columns(), 5);
    assert_eq!(IconSize::Xl.trigger_columns(), 9);

    let size: IconSize = serde_json::from_str("\"lg\"").unwrap();
    assert_eq!(size, IconSize::Lg);
}

#[test]
fn test_confirm_emits_target() {
    let mut dialog = DeleteDialog::new();
    dialog.open("E00042");
    assert!(dialog.is_open());
    assert_eq!(dialog.target(), Some("E00042"));
    assert_eq!(dialog.focus(), DialogButton::Cancel);

    assert_eq!(dialog.confirm(), Action::DeleteConfirmed("E00042".to_string()));
    assert!(!dialog.is_open());
    // Nothing left to confirm
    assert_eq!(dialog.confirm(), Action::None);
}

#[test]
fn test_cancel_hides() {
    let mut dialog = DeleteDialog::new();
    assert_eq!(dialog.cancel(), Action::None);
    dialog.open("E00001");
    assert_eq!(dialog.cancel(), Action::HideDialog);
    assert!(!dialog.is_open());
}

#[test]
fn test_disabled_dialog_does_not_open() {
    let mut dialog = DeleteDialog::new();
    dialog.set_disabled(true);
    dialog.open("E00001");
    assert!(!dialog.is_open());
}

#[test]
fn test_keyboard_focus_and_enter() {
    let mut dialog = DeleteDialog::new();
    dialog.open("E00003");

    // Enter on the initial focus cancels
    assert_eq!(dialog.handle_key_events(key(KeyCode::Enter)), Action::HideDialog);

    dialog.open("E00003");
    dialog.handle_key_events(key(KeyCode::Tab));
    assert_eq!(dialog.focus(), DialogButton::Confirm);
    assert_eq!(
        dialog.handle_key_events(key(KeyCode::Enter)),
        Action::DeleteConfirmed("E00003".to_string())
    );

    dialog.open("E00004");
    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('n'))), Action::HideDialog);
    dialog.open("E00004");
    assert_eq!(
        dialog.handle_key_events(key(KeyCode::Char('y'))),
        Action::DeleteConfirmed("E00004".to_string())
    );

    // Closed dialogs ignore keys
    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('y'))), Action::None);
}

#[test]
fn test_render_and_click_buttons() {
    let mut dialog = DeleteDialog::new().with_confirm_text("Effacer");
    let screen = Rect::new(0, 0, 100, 40);
    assert!(!contains_text(&render(&mut dialog, 100, 40, screen), "Effacer"));

    dialog.open("E00009");
    let buffer = render(&mut dialog, 100, 40, screen);
    assert!(contains_text(&buffer, "Êtes-vous sûr ?"));
    assert!(contains_text(&buffer, "\"E00009\""));

    let (x, y) = find_text(&buffer, "[ Annuler ]").expect("cancel button is rendered");
    assert_eq!(dialog.handle_mouse_events(click(x + 2, y)), Action::HideDialog);

    dialog.open("E00009");
    let buffer = render(&mut dialog, 100, 40, screen);
    let (x, y) = find_text(&buffer, "[ Effacer ]").expect("confirm button is rendered");
    assert_eq!(
        dialog.handle_mouse_events(click(x + 2, y)),
        Action::DeleteConfirmed("E00009".to_string())
    );
}

#[test]
fn test_trigger_follows_icon_size() {
    let mut dialog = DeleteDialog::new().with_icon_size(IconSize::Md);
    let mut terminal = Terminal::new(TestBackend::new(40, 5)).unwrap();
    terminal
        .draw(|f| dialog.render_trigger(f, Rect::new(10, 1, 20, 3)))
        .unwrap();
    assert_eq!(dialog.trigger_area(), Rect::new(10, 1, 7, 3));

    assert!(dialog.trigger_clicked(&click(12, 2)));
    assert!(!dialog.trigger_clicked(&click(20, 2)));

    dialog.set_disabled(true);
    assert!(!dialog.trigger_clicked(&click(12, 2)));
}

#[test]
fn test_message_dialog() {
    let mut dialog = MessageDialog::error("Fichier introuvable");
    assert_eq!(dialog.kind, MessageKind::Error);
    assert_eq!(dialog.handle_key_events(key(KeyCode::Char('x'))), Action::None);
    assert_eq!(dialog.handle_key_events(key(KeyCode::Enter)), Action::HideDialog);
    assert_eq!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog);

    let mut info = MessageDialog::info("Export terminé");
    let buffer = render(&mut info, 80, 24, Rect::new(0, 0, 80, 24));
    assert!(contains_text(&buffer, "Information"));
    assert!(contains_text(&buffer, "Export terminé"));
}

#[test]
fn test_logs_dialog_scrolls_within_bounds() {
    let mut dialog = LogsDialog::new(vec![
        "[10:00:02.000] INFO second".to_string(),
        "[10:00:01.000] ERROR first".to_string(),
    ]);
    dialog.handle_key_events(key(KeyCode::Up));
    assert_eq!(dialog.scroll_offset(), 0);
    dialog.handle_key_events(key(KeyCode::Char('j')));
    dialog.handle_key_events(key(KeyCode::Down));
    assert_eq!(dialog.scroll_offset(), 1);
    dialog.handle_key_events(key(KeyCode::Char('k')));
    assert_eq!(dialog.scroll_offset(), 0);

    let buffer = render(&mut dialog, 100, 30, Rect::new(0, 0, 100, 30));
    assert!(contains_text(&buffer, "INFO second"));
    assert!(contains_text(&buffer, "ERROR first"));

    assert_eq!(dialog.handle_key_events(key(KeyCode::Esc)), Action::HideDialog);
}

#[test]
fn test_empty_logs_dialog() {
    let mut dialog = LogsDialog::default();
    let buffer = render(&mut dialog, 100, 30, Rect::new(0, 0, 100, 30));
    assert!(contains_text(&buffer, "Aucun journal disponible"));
}
