//! Async runtime adapter: executes effects off the UI thread and posts results back as messages.

mod message;
mod runtime;

pub use message::AppMessage;
pub use runtime::{AsyncRuntime, Collaborators};
