use crate::support::{click, contains_text, find_text, key, mouse, render};
use comptoir::ui::components::sidebar_component::{default_sections, SidebarLink, SidebarSection};
use comptoir::ui::components::SidebarComponent;
use comptoir::ui::core::{Action, Component};
use crossterm::event::{KeyCode, MouseEventKind};
use ratatui::layout::Rect;

fn titles(sidebar: &SidebarComponent) -> Vec<&str> {
    sidebar.links().iter().map(|link| link.title.as_str()).collect()
}

#[test]
fn test_default_sections() {
    let sections = default_sections();
    let headers: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(headers, vec!["", "Éditions comptables", "Paramétrage", "Compte"]);

    let sidebar = SidebarComponent::default();
    assert_eq!(sidebar.route(), "/home");
    assert_eq!(sidebar.links().len(), 12);
    assert_eq!(titles(&sidebar)[0], "Accueil");
    assert_eq!(sidebar.active_link().map(|l| l.title.as_str()), Some("Accueil"));
}

#[test]
fn test_active_link_follows_route() {
    let mut sidebar = SidebarComponent::default();
    sidebar.set_route("/plan-comptable");
    assert_eq!(sidebar.active_link().map(|l| l.title.as_str()), Some("Plan comptable"));
    assert_eq!(sidebar.cursor_link().map(|l| l.title.as_str()), Some("Plan comptable"));

    // Unknown routes have no active link; the cursor falls back to the first link
    sidebar.set_route("/inconnu");
    assert_eq!(sidebar.active_link(), None);
    assert_eq!(sidebar.cursor_link().map(|l| l.title.as_str()), Some("Accueil"));
}

#[test]
fn test_cursor_skips_headers_and_wraps() {
    let mut sidebar = SidebarComponent::default();
    sidebar.move_cursor(true);
    assert_eq!(sidebar.cursor_link().map(|l| l.href.as_str()), Some("/reporting"));

    sidebar.move_cursor(false);
    sidebar.move_cursor(false);
    assert_eq!(sidebar.cursor_link().map(|l| l.href.as_str()), Some("/register"));

    sidebar.handle_key_events(key(KeyCode::Char('j')));
    assert_eq!(sidebar.cursor_link().map(|l| l.href.as_str()), Some("/home"));

    // Moving does not change the route
    assert_eq!(sidebar.route(), "/home");
}

#[test]
fn test_enter_navigates() {
    let mut sidebar = SidebarComponent::default();
    sidebar.handle_key_events(key(KeyCode::Down));
    sidebar.handle_key_events(key(KeyCode::Down));
    assert_eq!(
        sidebar.handle_key_events(key(KeyCode::Enter)),
        Action::Navigate("/etats-financiers".to_string())
    );
    assert_eq!(sidebar.route(), "/etats-financiers");
    assert_eq!(sidebar.active_link().map(|l| l.title.as_str()), Some("États financiers"));
}

#[test]
fn test_external_links() {
    let sections = vec![SidebarSection::new(
        "Aide",
        vec![
            SidebarLink::new("Documentation", "https://docs.exemple.fr"),
            SidebarLink::new("Contact", "/contact"),
        ],
    )];
    let mut sidebar = SidebarComponent::new(sections, "/contact");
    assert!(sidebar.links()[0].is_external());
    assert!(!sidebar.links()[1].is_external());

    let buffer = render(&mut sidebar, 40, 10, Rect::new(0, 0, 30, 8));
    assert!(contains_text(&buffer, "AIDE"));
    assert!(contains_text(&buffer, "Documentation ↗"));

    sidebar.move_cursor(true);
    assert_eq!(
        sidebar.activate(),
        Action::Navigate("https://docs.exemple.fr".to_string())
    );
}

#[test]
fn test_mouse_click_and_scroll() {
    let mut sidebar = SidebarComponent::default();
    let area = Rect::new(0, 0, 30, 20);
    let buffer = render(&mut sidebar, 80, 24, area);
    assert!(contains_text(&buffer, "ÉDITIONS COMPTABLES"));

    // Headers are not clickable
    let (x, y) = find_text(&buffer, "ÉDITIONS COMPTABLES").unwrap();
    assert_eq!(sidebar.handle_mouse_events(click(x, y)), Action::None);

    let (x, y) = find_text(&buffer, "Reporting").unwrap();
    assert_eq!(
        sidebar.handle_mouse_events(click(x, y)),
        Action::Navigate("/reporting".to_string())
    );

    sidebar.handle_mouse_events(mouse(MouseEventKind::ScrollDown, 5, 5));
    assert_eq!(sidebar.cursor_link().map(|l| l.href.as_str()), Some("/etats-financiers"));

    // Outside the sidebar
    assert_eq!(sidebar.handle_mouse_events(click(50, 5)), Action::None);
}
