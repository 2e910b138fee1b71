//! Scenario engine backed by the `kubectl` CLI and the built-in scenario set.

pub mod scenarios;

use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tempfile::TempPath;

use crate::kernel::services::ports::{
    CheckOutcome, Result, ScenarioEngine, ScenarioInfo, ServiceError,
};

use super::process;
use scenarios::{ScenarioDef, SCENARIOS};

#[derive(Default)]
struct EngineState {
    kubeconfig: Option<TempPath>,
    current: Option<&'static ScenarioDef>,
}

pub struct KubectlEngine {
    program: String,
    state: Mutex<EngineState>,
}

impl KubectlEngine {
    pub fn new() -> Self {
        Self::with_program("kubectl")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            state: Mutex::new(EngineState::default()),
        }
    }

    pub fn current(&self) -> Option<&'static str> {
        self.lock().current.map(|def| def.id)
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn kubectl(&self, kubeconfig: &Path, args: &[&str], stdin: Option<&str>) -> Result<String> {
        let kubeconfig = kubeconfig.to_string_lossy();
        let mut full = vec!["--kubeconfig", kubeconfig.as_ref()];
        full.extend_from_slice(args);
        process::run(&self.program, &full, stdin)
    }

    fn delete_namespace(&self, kubeconfig: &Path, namespace: &str, wait: bool) -> Result<()> {
        let wait = if wait { "--wait=true" } else { "--wait=false" };
        self.kubectl(
            kubeconfig,
            &["delete", "namespace", namespace, "--ignore-not-found", wait],
            None,
        )
        .map(drop)
    }
}

impl Default for KubectlEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioEngine for KubectlEngine {
    fn catalog(&self) -> Vec<ScenarioInfo> {
        SCENARIOS.iter().map(ScenarioDef::info).collect()
    }

    fn connect(&self, credential: &str) -> Result<()> {
        let mut file = tempfile::Builder::new()
            .prefix("k8s-dojo-engine-")
            .suffix(".kubeconfig")
            .tempfile()?;
        file.write_all(credential.as_bytes())?;
        file.flush()?;
        self.lock().kubeconfig = Some(file.into_temp_path());
        Ok(())
    }

    fn start(&self, id: &str) -> Result<()> {
        let def = scenarios::find(id).ok_or_else(|| ServiceError::UnknownScenario(id.to_string()))?;
        let mut state = self.lock();
        let kubeconfig = state
            .kubeconfig
            .as_ref()
            .ok_or(ServiceError::NotConnected)?
            .to_path_buf();

        if let Some(previous) = state.current.take() {
            if previous.namespace != def.namespace {
                if let Err(error) = self.delete_namespace(&kubeconfig, previous.namespace, false) {
                    tracing::warn!(%error, scenario = previous.id, "cleanup of previous scenario failed");
                }
            }
        }

        // Leftovers from an interrupted run would make the apply a partial no-op.
        if let Err(error) = self.delete_namespace(&kubeconfig, def.namespace, true) {
            tracing::debug!(%error, scenario = def.id, "pre-start cleanup failed");
        }
        self.kubectl(&kubeconfig, &["apply", "-f", "-"], Some(def.manifest))?;

        tracing::info!(scenario = def.id, namespace = def.namespace, "scenario set up");
        state.current = Some(def);
        Ok(())
    }

    fn check(&self) -> Result<CheckOutcome> {
        let state = self.lock();
        let def = state.current.ok_or(ServiceError::NoActiveScenario)?;
        let kubeconfig = state
            .kubeconfig
            .as_ref()
            .ok_or(ServiceError::NotConnected)?;

        let mut args = vec!["get"];
        args.extend(def.probe.query());
        args.extend(["-n", def.namespace, "-o", "json"]);

        let output = match self.kubectl(kubeconfig, &args, None) {
            Ok(output) => output,
            // A missing object is a legitimate "not solved yet" answer.
            Err(ServiceError::CommandFailed { stderr, .. }) => {
                return Ok(CheckOutcome::unsolved(stderr))
            }
            Err(err) => return Err(err),
        };
        let doc: serde_json::Value = serde_json::from_str(&output)?;
        Ok(def.probe.evaluate(&doc, def.solved_message))
    }

    fn cleanup(&self) -> Result<()> {
        let mut state = self.lock();
        let Some(def) = state.current.take() else {
            return Ok(());
        };
        let Some(kubeconfig) = state.kubeconfig.as_ref() else {
            return Ok(());
        };
        tracing::info!(scenario = def.id, "cleaning up scenario");
        self.delete_namespace(kubeconfig, def.namespace, false)
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/kubectl/mod.rs"]
mod tests;
