use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::kernel::services::ports::{CompletionStore, Result, ServiceError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    completed_scenarios: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_active_scenario: Option<String>,
}

/// Completion set persisted as `state.json`.
pub struct JsonCompletionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl JsonCompletionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StateFile> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StateFile::default())
            }
            Err(source) => return Err(self.state_error(source)),
        };
        Ok(serde_json::from_str(&data)?)
    }

    fn write(&self, state: &StateFile) -> Result<()> {
        let data = serde_json::to_string_pretty(state)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| self.state_error(source))?;
        }
        std::fs::write(&self.path, data).map_err(|source| self.state_error(source))
    }

    fn state_error(&self, source: std::io::Error) -> ServiceError {
        ServiceError::State {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl CompletionStore for JsonCompletionStore {
    fn load(&self) -> Result<FxHashSet<String>> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let state = self.read()?;
        Ok(state
            .completed_scenarios
            .into_iter()
            .filter_map(|(id, done)| done.then_some(id))
            .collect())
    }

    fn mark_completed(&self, id: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut state = self.read()?;
        state.completed_scenarios.insert(id.to_string(), true);
        self.write(&state)?;
        tracing::info!(scenario = id, path = %self.path.display(), "completion saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/completion.rs"]
mod tests;
