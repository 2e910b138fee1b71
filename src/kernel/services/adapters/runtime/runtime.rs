use super::message::AppMessage;
use crate::kernel::services::ports::{
    ClusterProvisioner, CompletionStore, ScenarioEngine, SupportedVersion,
};
use crate::kernel::{Action, CheckOrigin};
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Duration;

/// The blocking collaborators effects are executed against.
#[derive(Clone)]
pub struct Collaborators {
    pub provisioner: Arc<dyn ClusterProvisioner>,
    pub engine: Arc<dyn ScenarioEngine>,
    pub completions: Arc<dyn CompletionStore>,
}

type EngineJob = Box<dyn FnOnce() -> Option<Action> + Send>;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
    services: Collaborators,
    // Scenario engine calls run one at a time, in submission order.
    engine_jobs: tokio::sync::mpsc::UnboundedSender<EngineJob>,
}

impl AsyncRuntime {
    pub fn new(tx: Sender<AppMessage>, services: Collaborators) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;

        let (engine_jobs, mut jobs) = tokio::sync::mpsc::unbounded_channel::<EngineJob>();
        let engine_tx = tx.clone();
        runtime.spawn(async move {
            while let Some(job) = jobs.recv().await {
                match tokio::task::spawn_blocking(job).await {
                    Ok(Some(action)) => {
                        let _ = engine_tx.send(AppMessage::Action(action));
                    }
                    Ok(None) => {}
                    Err(error) => tracing::error!(%error, "scenario engine task failed"),
                }
            }
        });

        Ok(Self {
            runtime,
            tx,
            services,
            engine_jobs,
        })
    }

    /// Stops the runtime without waiting for blocking tasks still in flight.
    pub fn shutdown_background(self) {
        self.runtime.shutdown_background();
    }

    /// Posts `action` after `delay`.
    pub fn schedule(&self, delay: Duration, action: Action) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(AppMessage::Action(action));
        });
    }

    pub fn provision(&self, epoch: u64, version: SupportedVersion) {
        let provisioner = self.services.provisioner.clone();
        let engine = self.services.engine.clone();
        self.spawn_blocking_action("provision", move || {
            let result = provisioner
                .ensure_cluster(&version)
                .and_then(|credential| {
                    engine.connect(&credential)?;
                    Ok(credential)
                })
                .map_err(|e| e.to_string());
            Action::ProvisionFinished { epoch, result }
        });
    }

    pub fn load_completions(&self) {
        let completions = self.services.completions.clone();
        self.spawn_blocking_action("load_completions", move || {
            let result = completions
                .load()
                .map(|set| set.into_iter().collect())
                .map_err(|e| e.to_string());
            Action::CompletionsLoaded(result)
        });
    }

    pub fn start_scenario(&self, run: u64, scenario_id: String) {
        let engine = self.services.engine.clone();
        self.submit_engine_job(move || {
            let result = engine.start(&scenario_id).map_err(|e| e.to_string());
            Some(Action::ScenarioStarted { run, result })
        });
    }

    pub fn run_check(&self, run: u64, origin: CheckOrigin) {
        let engine = self.services.engine.clone();
        self.submit_engine_job(move || {
            let result = engine.check().map_err(|e| e.to_string());
            Some(Action::CheckFinished {
                run,
                origin,
                result,
            })
        });
    }

    /// Fire-and-forget; a failed write is only logged.
    pub fn mark_completed(&self, scenario_id: String) {
        let completions = self.services.completions.clone();
        self.runtime.spawn_blocking(move || {
            if let Err(error) = completions.mark_completed(&scenario_id) {
                tracing::error!(%error, scenario = %scenario_id, "failed to save completion");
            }
        });
    }

    /// Fire-and-forget; a failed cleanup is only logged.
    pub fn cleanup_scenario(&self) {
        let engine = self.services.engine.clone();
        self.submit_engine_job(move || {
            if let Err(error) = engine.cleanup() {
                tracing::warn!(%error, "scenario cleanup failed");
            }
            None
        });
    }

    /// Cleans up the active scenario, then reports `ShutdownComplete` whatever the outcome.
    pub fn shutdown(&self) {
        let engine = self.services.engine.clone();
        self.submit_engine_job(move || {
            if let Err(error) = engine.cleanup() {
                tracing::warn!(%error, "scenario cleanup during shutdown failed");
            }
            Some(Action::ShutdownComplete)
        });
    }

    fn submit_engine_job<F>(&self, job: F)
    where
        F: FnOnce() -> Option<Action> + Send + 'static,
    {
        if self.engine_jobs.send(Box::new(job)).is_err() {
            tracing::error!("scenario engine queue closed");
        }
    }

    fn spawn_blocking_action<F>(&self, op: &'static str, job: F)
    where
        F: FnOnce() -> Action + Send + 'static,
    {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            match tokio::task::spawn_blocking(job).await {
                Ok(action) => {
                    let _ = tx.send(AppMessage::Action(action));
                }
                Err(error) => tracing::error!(op, %error, "blocking task failed"),
            }
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime.rs"]
mod tests;
