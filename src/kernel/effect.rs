use crate::kernel::action::CheckOrigin;
use crate::kernel::services::ports::SupportedVersion;

/// Work the store asks the outside world to perform. Every async effect answers with one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Provision {
        epoch: u64,
        version: SupportedVersion,
    },
    ScheduleBootstrapTick {
        epoch: u64,
    },
    ScheduleSettle {
        epoch: u64,
    },
    LoadCompletions,
    StartScenario {
        run: u64,
        scenario_id: String,
    },
    StartTerminal {
        credential: Option<String>,
    },
    StopTerminal,
    ScheduleCheck {
        run: u64,
        token: u64,
    },
    RunCheck {
        run: u64,
        origin: CheckOrigin,
    },
    MarkCompleted(String),
    CleanupScenario,
    /// Stop the terminal, clean up the active scenario, then report `ShutdownComplete`.
    Shutdown,
}
