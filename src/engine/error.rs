//! Errors raised while executing transitions.

use crate::core::{Direction, HookError};
use thiserror::Error;

/// The graph cannot serve the requested operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Graph is not properly built, no initial actions")]
    NoInitialAction,

    #[error("{count} initial states registered, start at an explicit state instead")]
    MultipleInitialActions { count: usize },
}

/// Errors that can occur during transitions.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Changing state from {from} to {to} is not allowed")]
    InvalidTransition { from: String, to: String },

    #[error("Failed to execute {direction} hook of state {state}: {source}")]
    HookExecution {
        state: String,
        direction: Direction,
        #[source]
        source: HookError,
    },
}

impl TransitionError {
    /// Whether the edge was legal and only a hook failed.
    pub fn is_hook_failure(&self) -> bool {
        matches!(self, Self::HookExecution { .. })
    }
}
