//! On-disk locations under the application base directory.
//!
//! - `$K8S_DOJO_HOME` when set, else `~/.k8s-dojo`
//! - `settings.json`, `state.json` and `logs/` live directly below it

use std::ffi::OsString;
use std::path::PathBuf;

const APP_DIR: &str = ".k8s-dojo";
const HOME_ENV: &str = "K8S_DOJO_HOME";
const LOG_DIR: &str = "logs";
const SETTINGS_FILE: &str = "settings.json";
const STATE_FILE: &str = "state.json";

fn resolve_base_dir(override_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    home.filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(APP_DIR))
}

pub fn get_base_dir() -> Option<PathBuf> {
    resolve_base_dir(std::env::var_os(HOME_ENV), std::env::var_os("HOME"))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_base_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_base_dir().map(|p| p.join(SETTINGS_FILE))
}

pub fn get_state_path() -> Option<PathBuf> {
    get_base_dir().map(|p| p.join(STATE_FILE))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
