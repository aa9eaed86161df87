use comptoir::ui::core::EventHandler;
use std::time::Duration;

#[test]
fn test_render_is_throttled_to_frame_budget() {
    let mut handler = EventHandler::new();
    handler.mark_rendered();
    assert!(handler.time_since_last_render() < Duration::from_millis(16));

    std::thread::sleep(Duration::from_millis(20));
    assert!(handler.should_render());

    handler.mark_rendered();
    assert!(handler.time_since_last_render() < Duration::from_millis(20));
}
