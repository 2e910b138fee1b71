use super::*;

#[test]
fn missing_fields_fall_back_to_defaults() {
    let settings: Settings = serde_json::from_str(r#"{"check_interval_ms": 5000}"#).unwrap();
    assert_eq!(settings.check_interval_ms, 5000);
    assert_eq!(settings.progress_tick_ms, 800);
    assert_eq!(settings.settle_delay_ms, 500);
    assert_eq!(settings.cluster_name, DEFAULT_CLUSTER_NAME);
    assert_eq!(settings.shell, None);
}

#[test]
fn zero_intervals_are_clamped_for_timers() {
    let settings = Settings {
        check_interval_ms: 0,
        progress_tick_ms: 0,
        settle_delay_ms: 0,
        ..Settings::default()
    };
    assert_eq!(settings.check_interval(), Duration::from_millis(1));
    assert_eq!(settings.progress_tick(), Duration::from_millis(1));
    assert_eq!(settings.settle_delay(), Duration::ZERO);
}

#[test]
fn unset_optionals_are_not_serialized() {
    let json = serde_json::to_string(&Settings::default()).unwrap();
    assert!(!json.contains("shell"));
    assert!(!json.contains("state_path"));
    assert!(json.contains("\"cluster_name\":\"k8s-dojo\""));
}
