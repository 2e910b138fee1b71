use crate::core::event::InputEvent;
use crate::kernel::Action;

/// Everything the main loop reacts to arrives as one of these, on one queue.
pub enum AppMessage {
    Input(InputEvent),
    /// The terminal session has new output to draw.
    TerminalOutput,
    /// Result of an async effect or a fired timer, ready for the store.
    Action(Action),
    /// SIGINT/SIGTERM: leave the UI with this exit code.
    Terminate { exit_code: i32 },
}

impl From<Action> for AppMessage {
    fn from(action: Action) -> Self {
        AppMessage::Action(action)
    }
}
