//! Headless application core (state/action/effect).

pub mod action;
pub mod bootstrap;
pub mod catalog;
pub mod effect;
pub mod services;
pub mod state;
pub mod store;

pub use action::{Action, CheckOrigin};
pub use bootstrap::{BootstrapSync, ProgressStep, RealDoneOutcome, TickOutcome};
pub use catalog::{Catalog, CatalogCategory, CatalogEntry, CatalogRow};
pub use effect::Effect;
pub use state::{
    AppState, ConfirmChoice, FocusArea, RunningScenario, StatusLine, SuccessButton,
    SuccessState, View,
};
pub use store::{DispatchResult, Store};
