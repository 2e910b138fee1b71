use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CLUSTER_NAME: &str = "k8s-dojo";

/// User settings read from `settings.json`. Every field is optional on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub check_interval_ms: u64,
    pub progress_tick_ms: u64,
    pub settle_delay_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    pub cluster_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            check_interval_ms: 2000,
            progress_tick_ms: 800,
            settle_delay_ms: 500,
            shell: None,
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            state_path: None,
        }
    }
}

impl Settings {
    pub fn check_interval(&self) -> Duration {
        Duration::from_millis(self.check_interval_ms.max(1))
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms.max(1))
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
