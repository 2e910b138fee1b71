use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;

use super::bootstrap::BootstrapSync;
use super::catalog::Catalog;
use crate::kernel::services::ports::{ScenarioInfo, SupportedVersion};

pub const HOME_TITLE: &str = "🥋 K8s-Dojo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusArea {
    #[default]
    Sidebar,
    Content,
    Terminal,
}

impl FocusArea {
    /// Sidebar → Content → Terminal → Sidebar.
    pub fn next(self) -> Self {
        match self {
            FocusArea::Sidebar => FocusArea::Content,
            FocusArea::Content => FocusArea::Terminal,
            FocusArea::Terminal => FocusArea::Sidebar,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmChoice {
    Yes,
    #[default]
    No,
}

impl ConfirmChoice {
    pub fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessButton {
    #[default]
    Continue,
    Retry,
}

impl SuccessButton {
    pub fn toggle(self) -> Self {
        match self {
            SuccessButton::Continue => SuccessButton::Retry,
            SuccessButton::Retry => SuccessButton::Continue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub ok: bool,
}

impl StatusLine {
    pub fn pending(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ok: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunningScenario {
    pub scenario_id: String,
    /// Tags every async result and timer belonging to this run.
    pub run: u64,
    pub started_at: Instant,
    pub status: Option<StatusLine>,
    /// Set once the engine reports the fault is in place; checks are armed only after that.
    pub setup_done: bool,
    /// The one check timer allowed to fire; `0` when none is armed.
    pub check_token: u64,
    pub hints_visible: bool,
    pub hint_index: usize,
}

impl RunningScenario {
    pub fn new(scenario_id: String, run: u64) -> Self {
        Self {
            scenario_id,
            run,
            started_at: Instant::now(),
            status: Some(StatusLine::pending("Setting up scenario environment...")),
            setup_done: false,
            check_token: 0,
            hints_visible: false,
            hint_index: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[derive(Debug, Clone)]
pub struct SuccessState {
    pub scenario_id: String,
    pub message: String,
    pub elapsed: Duration,
    pub button: SuccessButton,
}

#[derive(Debug, Clone)]
pub enum View {
    VersionSelect {
        selected: usize,
    },
    Bootstrap {
        epoch: u64,
        version: String,
        sync: BootstrapSync,
    },
    Dashboard,
    ScenarioRunning(RunningScenario),
    Success(SuccessState),
    ConfirmRestart {
        scenario_id: String,
        selection: ConfirmChoice,
    },
    ConfirmQuit {
        selection: ConfirmChoice,
    },
}

impl View {
    pub fn is_modal(&self) -> bool {
        matches!(self, View::ConfirmRestart { .. } | View::ConfirmQuit { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::VersionSelect { .. } => "version-select",
            View::Bootstrap { .. } => "bootstrap",
            View::Dashboard => "dashboard",
            View::ScenarioRunning(_) => "scenario-running",
            View::Success(_) => "success",
            View::ConfirmRestart { .. } => "confirm-restart",
            View::ConfirmQuit { .. } => "confirm-quit",
        }
    }
}

pub struct AppState {
    pub view: View,
    /// The view a modal interrupted; taken exactly once when the modal closes.
    pub previous: Option<Box<View>>,
    pub focus: FocusArea,

    pub versions: Vec<SupportedVersion>,
    /// Kubernetes version of the provisioned cluster, shown in the header.
    pub cluster_version: Option<String>,
    pub cluster_name: String,
    pub credential: Option<String>,

    pub scenarios: Vec<ScenarioInfo>,
    pub completed: FxHashSet<String>,
    pub catalog: Catalog,

    pub epoch: u64,
    pub run: u64,
    pub next_check_token: u64,

    /// The user confirmed quitting; teardown is in flight.
    pub quitting: bool,
    /// Teardown finished; the main loop should stop.
    pub should_exit: bool,
}

impl AppState {
    pub fn new(
        versions: Vec<SupportedVersion>,
        scenarios: Vec<ScenarioInfo>,
        cluster_name: impl Into<String>,
    ) -> Self {
        let completed = FxHashSet::default();
        let catalog = Catalog::build(&scenarios, &completed);
        Self {
            view: View::VersionSelect { selected: 0 },
            previous: None,
            focus: FocusArea::Sidebar,
            versions,
            cluster_version: None,
            cluster_name: cluster_name.into(),
            credential: None,
            scenarios,
            completed,
            catalog,
            epoch: 0,
            run: 0,
            next_check_token: 0,
            quitting: false,
            should_exit: false,
        }
    }

    pub fn scenario(&self, id: &str) -> Option<&ScenarioInfo> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// The running scenario, whether on screen or behind a modal.
    pub fn running(&self) -> Option<&RunningScenario> {
        match (&self.view, self.previous.as_deref()) {
            (View::ScenarioRunning(running), _) => Some(running),
            (_, Some(View::ScenarioRunning(running))) => Some(running),
            _ => None,
        }
    }

    pub fn running_mut(&mut self, run: u64) -> Option<&mut RunningScenario> {
        let running = match (&mut self.view, self.previous.as_deref_mut()) {
            (View::ScenarioRunning(running), _) => running,
            (_, Some(View::ScenarioRunning(running))) => running,
            _ => return None,
        };
        (running.run == run).then_some(running)
    }

    pub fn terminal_has_focus(&self) -> bool {
        matches!(self.view, View::ScenarioRunning(_)) && self.focus == FocusArea::Terminal
    }

    /// Title shown in the header bar.
    pub fn header_title(&self) -> String {
        self.running()
            .and_then(|running| self.scenario(&running.scenario_id))
            .map_or_else(|| HOME_TITLE.to_string(), |s| format!("🥋 {}", s.name))
    }

    pub fn example_commands(&self, info: &ScenarioInfo) -> Vec<String> {
        vec![
            format!("kubectl config use-context kind-{}", self.cluster_name),
            format!("kubectl get pods -n {}", info.namespace),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/state.rs"]
mod tests;
