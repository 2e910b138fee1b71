use super::*;
use crate::kernel::services::ports::{supported_versions, Difficulty};

fn info() -> ScenarioInfo {
    ScenarioInfo {
        id: "pvc".to_string(),
        name: "Pending Volume".to_string(),
        description: String::new(),
        category: "Storage".to_string(),
        difficulty: Difficulty::Medium,
        namespace: "storage-pvc".to_string(),
        hints: Vec::new(),
    }
}

#[test]
fn starts_on_version_select_with_home_title() {
    let state = AppState::new(supported_versions(), vec![info()], "dojo");
    assert!(matches!(state.view, View::VersionSelect { selected: 0 }));
    assert_eq!(state.header_title(), HOME_TITLE);
    assert!(!state.terminal_has_focus());
}

#[test]
fn running_is_found_behind_a_modal() {
    let mut state = AppState::new(supported_versions(), vec![info()], "dojo");
    state.previous = Some(Box::new(View::ScenarioRunning(RunningScenario::new(
        "pvc".to_string(),
        4,
    ))));
    state.view = View::ConfirmQuit {
        selection: ConfirmChoice::No,
    };

    assert_eq!(state.running().map(|r| r.run), Some(4));
    assert!(state.running_mut(3).is_none());
    assert!(state.running_mut(4).is_some());
    assert_eq!(state.header_title(), "🥋 Pending Volume");
}

#[test]
fn example_commands_use_cluster_and_namespace() {
    let state = AppState::new(supported_versions(), vec![info()], "dojo");
    assert_eq!(
        state.example_commands(&info()),
        vec![
            "kubectl config use-context kind-dojo".to_string(),
            "kubectl get pods -n storage-pvc".to_string(),
        ]
    );
}

#[test]
fn focus_and_choices_toggle() {
    assert_eq!(FocusArea::Terminal.next(), FocusArea::Sidebar);
    assert_eq!(ConfirmChoice::default().toggle(), ConfirmChoice::Yes);
    assert_eq!(SuccessButton::Continue.toggle(), SuccessButton::Retry);
}
