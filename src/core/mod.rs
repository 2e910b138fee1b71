//! Frontend-neutral input types shared by the kernel and the TUI layer.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::{InputEvent, Key};
