use crate::core::Command;
use crate::kernel::services::ports::CheckOutcome;

/// Who asked for a solved-check. Only timer checks re-arm the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOrigin {
    Timer,
    Manual,
}

#[derive(Debug, Clone)]
pub enum Action {
    RunCommand(Command),
    ProvisionFinished {
        epoch: u64,
        result: Result<String, String>,
    },
    BootstrapTick {
        epoch: u64,
    },
    BootstrapSettled {
        epoch: u64,
    },
    CompletionsLoaded(Result<Vec<String>, String>),
    ScenarioStarted {
        run: u64,
        result: Result<(), String>,
    },
    CheckTick {
        run: u64,
        token: u64,
    },
    CheckFinished {
        run: u64,
        origin: CheckOrigin,
        result: Result<CheckOutcome, String>,
    },
    /// A termination signal arrived; tear down without asking.
    Terminate,
    ShutdownComplete,
}
