//! Semantic commands: what a key means, independent of which key it was.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // Global
    Quit,
    FocusNext,
    Back,

    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    Select,

    // Scenario running
    Check,
    ToggleHints,
    NextHint,
    PrevHint,

    // Success screen and dialogs
    PrevButton,
    NextButton,
    Retry,
    ReturnMenu,
    Confirm,
    Cancel,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Quit => "quit",
            Command::FocusNext => "focusNext",
            Command::Back => "back",
            Command::Up => "up",
            Command::Down => "down",
            Command::Left => "left",
            Command::Right => "right",
            Command::Top => "top",
            Command::Bottom => "bottom",
            Command::Select => "select",
            Command::Check => "check",
            Command::ToggleHints => "toggleHints",
            Command::NextHint => "nextHint",
            Command::PrevHint => "prevHint",
            Command::PrevButton => "prevButton",
            Command::NextButton => "nextButton",
            Command::Retry => "retry",
            Command::ReturnMenu => "returnMenu",
            Command::Confirm => "confirm",
            Command::Cancel => "cancel",
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Command::Up
                | Command::Down
                | Command::Left
                | Command::Right
                | Command::Top
                | Command::Bottom
                | Command::Select
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
