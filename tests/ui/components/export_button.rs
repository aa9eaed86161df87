use crate::support::{contains_text, find_text, key, render};
use async_trait::async_trait;
use comptoir::ui::components::{ExportButton, ExportError, ExportHandler, ExportKind};
use comptoir::ui::core::{Action, Component, DialogType};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Handler that blocks until its gate is opened.
struct GatedHandler {
    gate: Arc<Notify>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl ExportHandler for GatedHandler {
    async fn export(&self, _kind: ExportKind) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        if self.fail {
            anyhow::bail!("disque plein");
        }
        Ok(())
    }
}

struct InstantHandler;

#[async_trait]
impl ExportHandler for InstantHandler {
    async fn export(&self, _kind: ExportKind) -> anyhow::Result<()> {
        Ok(())
    }
}

fn xml_button() -> ExportButton {
    ExportButton::new().with_handler(ExportKind::Xml, Arc::new(InstantHandler))
}

#[test]
fn test_export_kind_labels_and_serde() {
    assert_eq!(ExportKind::Xlsx.label(), "Excel (.xlsx)");
    assert_eq!(ExportKind::Pdf.extension(), "pdf");
    assert_eq!(ExportKind::Xml.to_string(), "xml");
    assert_eq!(serde_json::to_string(&ExportKind::Xlsx).unwrap(), "\"xlsx\"");
    let kind: ExportKind = serde_json::from_str("\"pdf\"").unwrap();
    assert_eq!(kind, ExportKind::Pdf);
}

#[test]
fn test_begin_is_single_flight() {
    let button = xml_button();
    assert_eq!(button.exporting(), None);
    assert!(button.is_enabled(ExportKind::Xml));
    assert!(!button.is_enabled(ExportKind::Pdf));

    let guard = button.begin(ExportKind::Xml).unwrap();
    assert_eq!(guard.kind(), ExportKind::Xml);
    assert_eq!(button.exporting(), Some(ExportKind::Xml));
    assert!(!button.is_enabled(ExportKind::Xml));
    assert_eq!(button.begin(ExportKind::Xml).unwrap_err(), ExportError::Busy(ExportKind::Xml));

    drop(guard);
    assert_eq!(button.exporting(), None);
    assert!(button.begin(ExportKind::Xml).is_ok());
}

#[test]
fn test_begin_without_handler_is_unavailable() {
    let button = xml_button();
    assert_eq!(
        button.begin(ExportKind::Pdf).unwrap_err(),
        ExportError::Unavailable(ExportKind::Pdf)
    );
    assert_eq!(button.exporting(), None);
}

#[tokio::test]
async fn test_second_run_is_rejected_while_first_is_pending() {
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let handler = GatedHandler {
        gate: gate.clone(),
        calls: calls.clone(),
        fail: false,
    };
    let button = ExportButton::new().with_handler(ExportKind::Xml, Arc::new(handler));

    let (first, second) = tokio::join!(button.run(ExportKind::Xml), async {
        // Let the first export reach its gate
        tokio::task::yield_now().await;
        assert_eq!(button.exporting(), Some(ExportKind::Xml));
        let rejected = button.run(ExportKind::Xml).await;
        gate.notify_one();
        rejected
    });

    assert!(first.is_ok());
    assert_eq!(second, Err(ExportError::Busy(ExportKind::Xml)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(button.exporting(), None);
}

#[tokio::test]
async fn test_failed_run_releases_the_marker() {
    let gate = Arc::new(Notify::new());
    // Permit stored up front so the handler does not wait
    gate.notify_one();
    let handler = GatedHandler {
        gate,
        calls: Arc::new(AtomicUsize::new(0)),
        fail: true,
    };
    let button = ExportButton::new().with_handler(ExportKind::Xml, Arc::new(handler));

    let result = button.run(ExportKind::Xml).await;
    match result {
        Err(ExportError::Failed { kind, message }) => {
            assert_eq!(kind, ExportKind::Xml);
            assert!(message.contains("disque plein"));
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert_eq!(button.exporting(), None);
    assert!(button.is_enabled(ExportKind::Xml));
}

#[test]
fn test_start_holds_the_slot_until_settled() {
    let mut button = xml_button();
    assert_eq!(button.start(ExportKind::Xml), Action::StartExport(ExportKind::Xml));
    assert_eq!(button.exporting(), Some(ExportKind::Xml));

    // Repeated clicks while running do nothing
    assert_eq!(button.start(ExportKind::Xml), Action::None);

    let action = button.update(Action::ExportSettled {
        kind: ExportKind::Xml,
        error: None,
    });
    assert_eq!(action, Action::None);
    assert_eq!(button.exporting(), None);
}

#[test]
fn test_settled_with_error_shows_dialog() {
    let mut button = xml_button();
    button.start(ExportKind::Xml);

    let action = button.update(Action::ExportSettled {
        kind: ExportKind::Xml,
        error: Some("accès refusé".to_string()),
    });
    match action {
        Action::ShowDialog(DialogType::Error(message)) => {
            assert!(message.contains("Échec de l'export"));
            assert!(message.contains("accès refusé"));
        }
        other => panic!("expected an error dialog, got {other:?}"),
    }
    assert_eq!(button.exporting(), None);
}

#[test]
fn test_unrelated_actions_pass_through_update() {
    let mut button = xml_button();
    assert_eq!(button.update(Action::Quit), Action::Quit);
}

#[test]
fn test_menu_keys() {
    let mut button = xml_button();
    assert_eq!(button.handle_key_events(key(KeyCode::Enter)), Action::None);
    assert!(button.is_menu_open());
    // Only the enabled kind can be highlighted
    assert_eq!(button.highlighted(), ExportKind::Xml);
    button.handle_key_events(key(KeyCode::Down));
    assert_eq!(button.highlighted(), ExportKind::Xml);

    assert_eq!(
        button.handle_key_events(key(KeyCode::Enter)),
        Action::StartExport(ExportKind::Xml)
    );
    assert!(!button.is_menu_open());

    // The menu cannot be opened while an export runs
    button.handle_key_events(key(KeyCode::Enter));
    assert!(!button.is_menu_open());
}

#[test]
fn test_escape_and_blur_close_menu() {
    let mut button = xml_button();
    button.open_menu();
    button.handle_key_events(key(KeyCode::Esc));
    assert!(!button.is_menu_open());

    button.open_menu();
    button.on_blur();
    assert!(!button.is_menu_open());
}

#[test]
fn test_render_idle_and_running_labels() {
    let mut button = xml_button();
    let area = Rect::new(0, 0, 24, 3);
    let buffer = render(&mut button, 60, 12, area);
    assert!(contains_text(&buffer, "Exporter"));

    button.start(ExportKind::Xml);
    let buffer = render(&mut button, 60, 12, area);
    assert!(contains_text(&buffer, "Export en cours..."));
}

#[test]
fn test_mouse_opens_menu_and_starts_export() {
    let mut button = xml_button();
    let area = Rect::new(0, 0, 24, 3);
    render(&mut button, 60, 12, area);

    button.handle_mouse_events(crate::support::click(5, 1));
    assert!(button.is_menu_open());

    let buffer = render(&mut button, 60, 12, area);
    // Disabled rows ignore clicks
    let (x, y) = find_text(&buffer, "PDF (.pdf)").expect("PDF row is rendered");
    assert_eq!(button.handle_mouse_events(crate::support::click(x, y)), Action::None);
    assert!(button.is_menu_open());

    let (x, y) = find_text(&buffer, "XML (.xml)").expect("XML row is rendered");
    assert_eq!(
        button.handle_mouse_events(crate::support::click(x, y)),
        Action::StartExport(ExportKind::Xml)
    );
}
