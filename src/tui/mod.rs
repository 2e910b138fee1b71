//! TUI integration layer (crossterm + ratatui): terminal setup/restore and signal handling.

pub mod terminal_guard;

pub use terminal_guard::{
    install_termination_signals, TerminalGuard, TerminalRestorer, TerminationSignal,
};
