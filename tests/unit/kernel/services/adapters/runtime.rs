use super::*;
use crate::kernel::services::ports::{
    supported_versions, CheckOutcome, Result, ScenarioInfo, ServiceError,
};
use rustc_hash::FxHashSet;
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;

struct FakeProvisioner {
    fail: bool,
}

impl ClusterProvisioner for FakeProvisioner {
    fn ensure_cluster(&self, version: &SupportedVersion) -> Result<String> {
        if self.fail {
            return Err(ServiceError::NotConnected);
        }
        Ok(format!("kubeconfig for {}", version.version))
    }
}

#[derive(Default)]
struct FakeEngine {
    calls: Mutex<Vec<String>>,
}

impl FakeEngine {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ScenarioEngine for FakeEngine {
    fn catalog(&self) -> Vec<ScenarioInfo> {
        Vec::new()
    }

    fn connect(&self, credential: &str) -> Result<()> {
        self.record(format!("connect {credential}"));
        Ok(())
    }

    fn start(&self, id: &str) -> Result<()> {
        // Slow enough that a racing cleanup would overtake it.
        std::thread::sleep(Duration::from_millis(50));
        self.record(format!("start {id}"));
        Ok(())
    }

    fn check(&self) -> Result<CheckOutcome> {
        self.record("check".to_string());
        Ok(CheckOutcome::unsolved("not yet"))
    }

    fn cleanup(&self) -> Result<()> {
        self.record("cleanup".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakeCompletions {
    saved: Mutex<Vec<String>>,
}

impl CompletionStore for FakeCompletions {
    fn load(&self) -> Result<FxHashSet<String>> {
        Ok(["a".to_string()].into_iter().collect())
    }

    fn mark_completed(&self, id: &str) -> Result<()> {
        self.saved.lock().unwrap().push(id.to_string());
        Ok(())
    }
}

struct Harness {
    runtime: AsyncRuntime,
    rx: Receiver<AppMessage>,
    engine: Arc<FakeEngine>,
    completions: Arc<FakeCompletions>,
}

fn harness(fail_provision: bool) -> Harness {
    let (tx, rx) = mpsc::channel();
    let engine = Arc::new(FakeEngine::default());
    let completions = Arc::new(FakeCompletions::default());
    let services = Collaborators {
        provisioner: Arc::new(FakeProvisioner {
            fail: fail_provision,
        }),
        engine: engine.clone(),
        completions: completions.clone(),
    };
    Harness {
        runtime: AsyncRuntime::new(tx, services).unwrap(),
        rx,
        engine,
        completions,
    }
}

fn next_action(rx: &Receiver<AppMessage>) -> Action {
    match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
        AppMessage::Action(action) => action,
        _ => panic!("expected an action"),
    }
}

#[test]
fn provision_connects_the_engine() {
    let h = harness(false);
    h.runtime.provision(3, supported_versions()[0].clone());

    match next_action(&h.rx) {
        Action::ProvisionFinished { epoch, result } => {
            assert_eq!(epoch, 3);
            assert_eq!(result.unwrap(), "kubeconfig for v1.32.0");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        &*h.engine.calls.lock().unwrap(),
        &["connect kubeconfig for v1.32.0".to_string()]
    );
}

#[test]
fn provision_failure_is_reported_as_text() {
    let h = harness(true);
    h.runtime.provision(1, supported_versions()[1].clone());
    match next_action(&h.rx) {
        Action::ProvisionFinished { result, .. } => {
            assert_eq!(result.unwrap_err(), "not connected to a cluster");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(h.engine.calls.lock().unwrap().is_empty());
}

#[test]
fn scheduled_action_arrives_after_delay() {
    let h = harness(false);
    let started = std::time::Instant::now();
    h.runtime
        .schedule(Duration::from_millis(30), Action::CheckTick { run: 2, token: 7 });
    match next_action(&h.rx) {
        Action::CheckTick { run, token } => assert_eq!((run, token), (2, 7)),
        other => panic!("unexpected {other:?}"),
    }
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn engine_calls_run_in_submission_order() {
    let h = harness(false);
    h.runtime.start_scenario(1, "x".to_string());
    h.runtime.cleanup_scenario();
    h.runtime.run_check(1, CheckOrigin::Manual);

    assert!(matches!(
        next_action(&h.rx),
        Action::ScenarioStarted { run: 1, result: Ok(()) }
    ));
    assert!(matches!(
        next_action(&h.rx),
        Action::CheckFinished {
            run: 1,
            origin: CheckOrigin::Manual,
            result: Ok(_),
        }
    ));
    assert_eq!(
        &*h.engine.calls.lock().unwrap(),
        &["start x".to_string(), "cleanup".to_string(), "check".to_string()]
    );
}

#[test]
fn shutdown_cleans_up_then_reports() {
    let h = harness(false);
    h.runtime.shutdown();
    assert!(matches!(next_action(&h.rx), Action::ShutdownComplete));
    assert_eq!(&*h.engine.calls.lock().unwrap(), &["cleanup".to_string()]);
}

#[test]
fn completions_load_and_save() {
    let h = harness(false);
    h.runtime.load_completions();
    match next_action(&h.rx) {
        Action::CompletionsLoaded(Ok(ids)) => assert_eq!(ids, vec!["a".to_string()]),
        other => panic!("unexpected {other:?}"),
    }

    h.runtime.mark_completed("b".to_string());
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while h.completions.saved.lock().unwrap().is_empty() && std::time::Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(&*h.completions.saved.lock().unwrap(), &["b".to_string()]);
}
