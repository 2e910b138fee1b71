use super::*;
use crate::kernel::services::ports::supported_versions;
use crate::kernel::AppState;

#[test]
fn elapsed_time_drops_leading_zero_units() {
    assert_eq!(format_elapsed(Duration::from_millis(400)), "0s");
    assert_eq!(format_elapsed(Duration::from_millis(59_600)), "1m0s");
    assert_eq!(format_elapsed(Duration::from_secs(65)), "1m5s");
    assert_eq!(format_elapsed(Duration::from_secs(3723)), "1h2m3s");
}

#[test]
fn progress_bar_fills_proportionally() {
    assert_eq!(progress_bar(4, 0.5), "██░░");
    assert_eq!(progress_bar(3, 1.5), "███");
    assert_eq!(progress_bar(2, 0.0), "░░");
}

#[test]
fn truncate_respects_display_width() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("Service Selector Mismatch", 10), "Service ..");
    assert_eq!(truncate("abc", 2), "..");
}

#[test]
fn status_hints_follow_view_and_focus() {
    let mut state = AppState::new(supported_versions(), Vec::new(), "k8s-dojo");
    assert!(chrome::status_bindings(&state).contains(&("enter", "select")));

    state.view = View::Dashboard;
    assert!(chrome::status_bindings(&state).contains(&("enter", "start")));

    state.view = View::ScenarioRunning(crate::kernel::RunningScenario::new("x".to_string(), 1));
    state.focus = FocusArea::Terminal;
    assert!(chrome::status_bindings(&state).contains(&("tab", "leave terminal")));
    state.focus = FocusArea::Content;
    assert!(chrome::status_bindings(&state).contains(&("c", "check")));
}
