use super::*;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

/// A stand-in `kubectl`: records calls, captures applied manifests and answers `get` from a file.
fn fake_kubectl(dir: &Path) -> PathBuf {
    let path = dir.join("kubectl");
    let script = format!(
        r#"#!/bin/sh
dir="{dir}"
echo "$3 $4 $5" >> "$dir/calls.log"
case "$3" in
  apply) cat > "$dir/applied.yaml" ;;
  delete) exit 0 ;;
  get)
    if [ -f "$dir/get.err" ]; then cat "$dir/get.err" >&2; exit 1; fi
    cat "$dir/get.json" ;;
  *) exit 2 ;;
esac
"#,
        dir = dir.display(),
    );
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn calls(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn connected_engine(dir: &Path) -> KubectlEngine {
    let engine = KubectlEngine::with_program(fake_kubectl(dir).to_string_lossy());
    engine.connect("apiVersion: v1\n").unwrap();
    engine
}

#[test]
fn catalog_lists_builtin_scenarios() {
    let engine = KubectlEngine::new();
    let catalog = engine.catalog();
    assert_eq!(catalog.len(), SCENARIOS.len());
    assert!(catalog.iter().any(|s| s.id == "image-pull-backoff"));
}

#[test]
fn start_requires_connection_and_known_id() {
    let engine = KubectlEngine::with_program("/nonexistent/kubectl");
    assert!(matches!(
        engine.start("storage-pvc-pending"),
        Err(ServiceError::NotConnected)
    ));
    assert!(matches!(
        engine.start("nope"),
        Err(ServiceError::UnknownScenario(id)) if id == "nope"
    ));
    assert!(matches!(engine.check(), Err(ServiceError::NoActiveScenario)));
}

#[test]
fn start_applies_manifest_after_clearing_namespace() {
    let dir = tempfile::tempdir().unwrap();
    let engine = connected_engine(dir.path());

    engine.start("storage-pvc-pending").unwrap();
    assert_eq!(engine.current(), Some("storage-pvc-pending"));
    assert_eq!(
        calls(dir.path()),
        vec![
            "delete namespace storage-pvc".to_string(),
            "apply -f -".to_string(),
        ]
    );
    let applied = std::fs::read_to_string(dir.path().join("applied.yaml")).unwrap();
    assert!(applied.contains("storageClassName: premium-ssd"));
}

#[test]
fn check_evaluates_the_probe() {
    let dir = tempfile::tempdir().unwrap();
    let engine = connected_engine(dir.path());
    engine.start("storage-pvc-pending").unwrap();

    std::fs::write(dir.path().join("get.json"), r#"{"status":{"phase":"Pending"}}"#).unwrap();
    assert_eq!(
        engine.check().unwrap(),
        CheckOutcome::unsolved("PVC is still Pending.")
    );

    std::fs::write(dir.path().join("get.json"), r#"{"status":{"phase":"Bound"}}"#).unwrap();
    assert_eq!(
        engine.check().unwrap(),
        CheckOutcome::solved("Success! PVC is Bound.")
    );
    assert!(calls(dir.path()).contains(&"get pvc data-pvc".to_string()));
}

#[test]
fn missing_object_is_an_unsolved_check() {
    let dir = tempfile::tempdir().unwrap();
    let engine = connected_engine(dir.path());
    engine.start("resource-quota-exceeded").unwrap();

    std::fs::write(
        dir.path().join("get.err"),
        "Error from server (NotFound): deployments.apps \"blocked-dep\" not found",
    )
    .unwrap();
    let outcome = engine.check().unwrap();
    assert!(!outcome.solved);
    assert!(outcome.message.contains("NotFound"));
}

#[test]
fn cleanup_deletes_namespace_once() {
    let dir = tempfile::tempdir().unwrap();
    let engine = connected_engine(dir.path());
    engine.start("net-service-selector").unwrap();

    engine.cleanup().unwrap();
    engine.cleanup().unwrap();
    assert_eq!(engine.current(), None);
    let deletes = calls(dir.path())
        .into_iter()
        .filter(|c| c.starts_with("delete"))
        .count();
    assert_eq!(deletes, 2);
}
