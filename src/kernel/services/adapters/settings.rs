use std::path::{Path, PathBuf};

use crate::kernel::services::ports::Settings;

use super::paths;

pub const DEFAULT_SHELL: &str = "/bin/sh";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads settings from `path`. A missing file yields the defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&data).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Settings from the default location; problems are logged and the defaults used.
pub fn load_settings() -> Settings {
    let Some(path) = paths::get_settings_path() else {
        return Settings::default();
    };
    load_settings_from(&path).unwrap_or_else(|error| {
        tracing::warn!(%error, "using default settings");
        Settings::default()
    })
}

/// Configured shell, else `$SHELL`, else `/bin/sh`.
pub fn resolve_shell(settings: &Settings, env_shell: Option<String>) -> String {
    settings
        .shell
        .clone()
        .or(env_shell)
        .filter(|shell| !shell.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

pub fn resolve_state_path(settings: &Settings) -> PathBuf {
    settings
        .state_path
        .clone()
        .or_else(paths::get_state_path)
        .unwrap_or_else(|| std::env::temp_dir().join("k8s-dojo").join("state.json"))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
