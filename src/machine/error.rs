//! Errors raised by the cycle driver and state providers.

use crate::engine::TransitionError;
use thiserror::Error;

/// Failure of a state provider backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The backing store cannot be reached
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected or failed the operation
    #[error("State store failure: {0}")]
    Backend(String),
}

/// Errors that can occur while driving cycles.
#[derive(Debug, Error)]
pub enum MachineError {
    #[error("State machine for id '{id}' is already started")]
    AlreadyStarted { id: String },

    #[error("State machine for id '{id}' is not started")]
    NotStarted { id: String },

    /// Another caller moved the cycle while this transition's hooks ran;
    /// the hooks have run but the new state was not recorded.
    #[error("State of id '{id}' changed from {expected} to {found} during the transition")]
    StateChanged {
        id: String,
        expected: String,
        found: String,
    },

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl MachineError {
    /// Whether the transition was recorded and only a hook failed.
    pub fn is_hook_failure(&self) -> bool {
        matches!(self, Self::Transition(err) if err.is_hook_failure())
    }
}
