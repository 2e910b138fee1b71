//! k8s-dojo: a Kubernetes troubleshooting trainer with an embedded shell.
//!
//! Module layout:
//! - core: frontend-neutral input types (events, commands)
//! - kernel: state machine, bootstrap progress, catalog, service ports and adapters
//! - terminal: pty-backed shell session, vt emulator, key translation, cell colors
//! - app: wiring and rendering
//! - tui: terminal setup/restore and signal handling

pub mod app;
pub mod core;
pub mod kernel;
pub mod terminal;
pub mod tui;
