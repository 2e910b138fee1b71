//! Embedded shell: pty session, vt emulator grid, key translation and color resolution.

pub mod emulator;
pub mod keys;
pub mod palette;
pub mod session;

pub use emulator::{Cell, CellColor, Emulator, DEFAULT_COLS, DEFAULT_ROWS};
pub use keys::{bracketed_paste, bytes_for_key_event};
pub use palette::{resolve, ResolvedColors, TerminalPalette};
pub use session::{OutputNotifier, SessionError, TerminalSession};
