use super::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Descriptive data for one fault scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub namespace: String,
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub solved: bool,
    pub message: String,
}

impl CheckOutcome {
    pub fn solved(message: impl Into<String>) -> Self {
        Self {
            solved: true,
            message: message.into(),
        }
    }

    pub fn unsolved(message: impl Into<String>) -> Self {
        Self {
            solved: false,
            message: message.into(),
        }
    }
}

/// Injects faults into the cluster and verifies fixes.
///
/// At most one scenario is active at a time; `start` replaces the previous one.
pub trait ScenarioEngine: Send + Sync {
    fn catalog(&self) -> Vec<ScenarioInfo>;
    /// Points the engine at a cluster, given its kubeconfig contents.
    fn connect(&self, credential: &str) -> Result<()>;
    fn start(&self, id: &str) -> Result<()>;
    fn check(&self) -> Result<CheckOutcome>;
    fn cleanup(&self) -> Result<()>;
}
