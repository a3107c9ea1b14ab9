//! Builder API for ergonomic graph construction.
//!
//! The [`GraphBuilder`] accumulates actions, triggers and hooks and then
//! freezes them into an immutable [`Graph`](crate::core::Graph). Hooks are
//! registered through the [`StateHooks`] sub-builder returned by
//! [`GraphBuilder::select_state`].

pub mod graph;
pub mod macros;

pub use graph::{GraphBuilder, StateHooks};
