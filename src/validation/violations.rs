//! Findings reported by graph validation.

use thiserror::Error;

/// A structural problem found in a transition graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphViolation {
    #[error("No initial action registered; cycles can only be started at an explicit state")]
    NoInitialAction,

    #[error("{count} initial actions registered; starting without an explicit state is ambiguous")]
    MultipleInitialActions { count: usize },

    #[error("Hooks registered for state {state} which no action enters or leaves")]
    HooksOnUnknownState { state: String },

    #[error("State {state} has outbound actions but no action enters it")]
    UnreachableState { state: String },
}
