//! Accumulating validation of transition graphs.
//!
//! Graph checks use Stillwater's `Validation` type so that every problem
//! is reported in one pass instead of stopping at the first one.
//!
//! Validation is a diagnostic. It never blocks a transition: an ambiguous
//! initial state, for example, still only fails when a cycle is started
//! without an explicit state.
//!
//! # Example
//!
//! ```rust
//! use stateflow::builder::GraphBuilder;
//!
//! let graph = GraphBuilder::<&str, ()>::new()
//!     .initialize("Open")
//!     .action("Fix", "Open", "Fixed")
//!     .build();
//!
//! assert!(graph.validate().is_success());
//! ```

pub mod rules;
pub mod violations;

pub use rules::validate_graph;
pub use violations::GraphViolation;
