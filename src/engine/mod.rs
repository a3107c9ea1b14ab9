//! Transition execution.
//!
//! The engine validates that an edge exists, then runs the EXIT hooks of
//! the source state followed by the ENTER hooks of the target state,
//! applying the configured failure policy.
//!
//! # Failure policy
//!
//! - Usage errors (no or ambiguous initial action, unregistered edge)
//!   always propagate.
//! - Hook failures are reported to the exception handler, then either
//!   swallowed (silent mode, the default) or returned. A failing hook
//!   always stops the remaining hooks of its own list; in silent mode the
//!   other direction still runs.

mod config;
mod error;
mod transition;

pub use config::{EngineConfig, ExceptionHandler};
pub use error::{ConfigurationError, TransitionError};
pub use transition::TransitionEngine;
