//! Core graph types.
//!
//! This module contains the data model of a transition graph:
//! - States via the blanket-implemented `State` trait
//! - Named `Action` edges
//! - Enter/exit `Hook`s
//! - The immutable `Graph` snapshot the engine executes against

mod action;
mod graph;
mod hook;
mod state;

pub use action::{Action, DEFAULT_INITIAL_ACTION};
pub use graph::{Graph, GraphSummary, Route};
pub use hook::{Direction, Hook, HookError, StateHookLists};
pub use state::{payload_summary, State};

pub(crate) use state::describe;
