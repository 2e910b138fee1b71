use super::*;
use std::time::Duration;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = load_settings_from(&dir.path().join("settings.json")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.check_interval(), Duration::from_secs(2));
    assert_eq!(settings.progress_tick(), Duration::from_millis(800));
    assert_eq!(settings.settle_delay(), Duration::from_millis(500));
    assert_eq!(settings.cluster_name, "k8s-dojo");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, r#"{"check_interval_ms": 5000, "shell": "/bin/bash"}"#).unwrap();

    let settings = load_settings_from(&path).unwrap();
    assert_eq!(settings.check_interval_ms, 5000);
    assert_eq!(settings.shell.as_deref(), Some("/bin/bash"));
    assert_eq!(settings.progress_tick_ms, 800);
}

#[test]
fn malformed_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ nope").unwrap();
    assert!(matches!(
        load_settings_from(&path),
        Err(SettingsError::Parse { .. })
    ));
}

#[test]
fn shell_falls_back_to_env_then_posix_default() {
    let mut settings = Settings::default();
    assert_eq!(resolve_shell(&settings, None), DEFAULT_SHELL);
    assert_eq!(
        resolve_shell(&settings, Some("/usr/bin/zsh".to_string())),
        "/usr/bin/zsh"
    );
    assert_eq!(resolve_shell(&settings, Some("  ".to_string())), DEFAULT_SHELL);

    settings.shell = Some("/bin/bash".to_string());
    assert_eq!(
        resolve_shell(&settings, Some("/usr/bin/zsh".to_string())),
        "/bin/bash"
    );
}

#[test]
fn state_path_override_is_used() {
    let settings = Settings {
        state_path: Some(PathBuf::from("/tmp/custom-state.json")),
        ..Settings::default()
    };
    assert_eq!(
        resolve_state_path(&settings),
        PathBuf::from("/tmp/custom-state.json")
    );
}
