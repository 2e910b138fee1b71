//! Service ports: traits + data contracts.

pub mod cluster;
pub mod completion;
pub mod error;
pub mod scenario;
pub mod settings;

pub use cluster::{supported_versions, ClusterProvisioner, SupportedVersion};
pub use completion::CompletionStore;
pub use error::{Result, ServiceError};
pub use scenario::{CheckOutcome, Difficulty, ScenarioEngine, ScenarioInfo};
pub use settings::Settings;
