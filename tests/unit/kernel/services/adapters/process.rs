use super::*;

#[test]
fn returns_stdout_on_success() {
    let out = run("/bin/sh", &["-c", "echo hello"], None).unwrap();
    assert_eq!(out, "hello\n");
}

#[test]
fn feeds_stdin() {
    let out = run("/bin/sh", &["-c", "tr a-z A-Z"], Some("kind\n")).unwrap();
    assert_eq!(out, "KIND\n");
}

#[test]
fn non_zero_exit_carries_stderr() {
    let err = run("/bin/sh", &["-c", "echo boom >&2; exit 3"], None).unwrap_err();
    match err {
        ServiceError::CommandFailed {
            command, stderr, ..
        } => {
            assert_eq!(command, "/bin/sh -c echo boom >&2; exit 3");
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_program_is_a_spawn_error() {
    let err = run("/nonexistent/k8s-dojo-tool", &[], None).unwrap_err();
    assert!(matches!(err, ServiceError::Spawn { .. }));
}

fn large_input() -> String {
    "x".repeat(1 << 20)
}

#[test]
fn unread_stdin_is_an_io_error_after_the_child_exits() {
    let err = run("/bin/sh", &["-c", "exec 0<&-; exit 0"], Some(&large_input())).unwrap_err();
    assert!(matches!(err, ServiceError::Io(_)), "unexpected error: {err}");
}

#[test]
fn exit_status_wins_over_a_broken_stdin_pipe() {
    let err = run(
        "/bin/sh",
        &["-c", "exec 0<&-; echo refused >&2; exit 4"],
        Some(&large_input()),
    )
    .unwrap_err();
    match err {
        ServiceError::CommandFailed { stderr, .. } => assert_eq!(stderr, "refused"),
        other => panic!("unexpected error: {other}"),
    }
}
