//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod completion;
pub mod keybinding;
pub mod kind;
pub mod kubectl;
pub mod paths;
pub mod process;
pub mod runtime;
pub mod settings;

pub use completion::JsonCompletionStore;
pub use keybinding::{KeybindingContext, KeybindingService};
pub use kind::KindProvisioner;
pub use kubectl::KubectlEngine;
pub use paths::{ensure_log_dir, get_base_dir, get_log_dir, get_settings_path, get_state_path};
pub use runtime::{AppMessage, AsyncRuntime, Collaborators};
pub use settings::{
    load_settings, load_settings_from, resolve_shell, resolve_state_path, SettingsError,
};
