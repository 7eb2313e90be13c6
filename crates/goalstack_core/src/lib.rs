//! Core domain logic for the goal stack tool.
//! This crate is the single source of truth for goal stack invariants.

pub mod config;
pub mod indicator;
pub mod logging;
pub mod model;
pub mod service;
pub mod stack;
pub mod store;

pub use config::{ConfigError, GoalsConfig};
pub use indicator::{indicator_text, write_indicator, IndicatorError};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::goal::{Goal, GoalValidationError};
pub use model::identity::{goal_id, GoalId};
pub use service::goal_service::GoalService;
pub use stack::{render, GoalStack, StackError, StackResult, EMPTY_STACK_MESSAGE};
pub use store::{GoalStore, InMemoryGoalStore, JsonFileStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
