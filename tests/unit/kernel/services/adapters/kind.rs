use super::*;
use crate::kernel::services::ports::{supported_versions, ServiceError};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// A stand-in `kind` that records its arguments and knows one pre-existing cluster.
fn fake_kind(dir: &Path, existing: &str) -> PathBuf {
    let path = dir.join("kind");
    let log = dir.join("calls.log");
    let script = format!(
        r##"#!/bin/sh
echo "$@" >> "{log}"
case "$1 $2" in
  "get clusters") echo "{existing}" ;;
  "create cluster") exit 0 ;;
  "get kubeconfig") echo "apiVersion: v1" ; echo "# $4" ;;
  *) echo "unknown" >&2 ; exit 1 ;;
esac
"##,
        log = log.display(),
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

#[test]
fn creates_missing_cluster_with_node_image() {
    let dir = tempfile::tempdir().unwrap();
    let kind = fake_kind(dir.path(), "other");
    let provisioner = KindProvisioner::with_program(kind.to_string_lossy(), "dojo");

    let version = supported_versions()[0].clone();
    let kubeconfig = provisioner.ensure_cluster(&version).unwrap();
    assert_eq!(kubeconfig, "apiVersion: v1\n# dojo\n");
    assert_eq!(
        calls(dir.path()),
        vec![
            "get clusters".to_string(),
            "create cluster --name dojo --image kindest/node:v1.32.0".to_string(),
            "get kubeconfig --name dojo".to_string(),
        ]
    );
}

#[test]
fn reuses_existing_cluster() {
    let dir = tempfile::tempdir().unwrap();
    let kind = fake_kind(dir.path(), "dojo");
    let provisioner = KindProvisioner::with_program(kind.to_string_lossy(), "dojo");

    assert!(provisioner.cluster_exists().unwrap());
    provisioner.ensure_cluster(&supported_versions()[1]).unwrap();
    assert!(!calls(dir.path()).iter().any(|c| c.starts_with("create")));
}

#[test]
fn missing_tool_is_reported() {
    let provisioner = KindProvisioner::with_program("/nonexistent/kind", "dojo");
    let err = provisioner
        .ensure_cluster(&supported_versions()[0])
        .unwrap_err();
    assert!(matches!(err, ServiceError::Spawn { .. }));
}
