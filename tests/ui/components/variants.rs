use comptoir::ui::components::variants::PopupWidth;
use comptoir::ui::components::{ButtonVariant, SizeVariant};
use ratatui::style::Modifier;

#[test]
fn test_size_presets() {
    assert_eq!(SizeVariant::default(), SizeVariant::Md);

    let small = SizeVariant::Sm.preset();
    assert_eq!(small.popup_width, PopupWidth::Columns(30));
    assert_eq!(small.max_visible, 5);
    assert_eq!(small.text_modifier, Modifier::empty());

    let large = SizeVariant::Lg.preset();
    assert_eq!(large.item_padding, 2);
    assert!(large.text_modifier.contains(Modifier::BOLD));

    assert_eq!(SizeVariant::Full.preset().popup_width, PopupWidth::MatchTrigger);
}

#[test]
fn test_size_names() {
    let names: Vec<&str> = [SizeVariant::Sm, SizeVariant::Md, SizeVariant::Lg, SizeVariant::Full]
        .iter()
        .map(|size| size.as_str())
        .collect();
    assert_eq!(names, vec!["sm", "md", "lg", "full"]);

    let parsed: SizeVariant = serde_json::from_str("\"full\"").unwrap();
    assert_eq!(parsed, SizeVariant::Full);
    assert_eq!(serde_json::to_string(&SizeVariant::Lg).unwrap(), "\"lg\"");
}

#[test]
fn test_button_variants() {
    assert_eq!(ButtonVariant::default(), ButtonVariant::Outline);
    assert!(ButtonVariant::Default.style().bordered);
    assert_eq!(ButtonVariant::Default.height(), 3);
    assert!(!ButtonVariant::Ghost.style().bordered);
    assert_eq!(ButtonVariant::Ghost.height(), 1);
}
