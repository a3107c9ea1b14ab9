//! Stateflow: a graph-driven state machine library
//!
//! Stateflow separates the immutable description of a lifecycle from the
//! cycles that run through it. A [`Graph`](core::Graph) of named actions,
//! enter/exit hooks and input triggers is built once, and a
//! [`StateMachine`](machine::StateMachine) drives any number of cycles over
//! it, keeping each cycle's current state in a pluggable provider.
//!
//! # Core Concepts
//!
//! - **State**: any cloneable, hashable value via the blanket `State` trait
//! - **Action**: a named directed edge, the initial one has no source
//! - **Hook**: code run on entering or exiting a state
//! - **Trigger**: a predicate over input data that fires an action
//! - **Cycle**: one run through the graph, identified by a string id
//!
//! # Example
//!
//! ```rust
//! use stateflow::builder::GraphBuilder;
//! use stateflow::machine::StateMachine;
//! use stateflow::trigger::TriggerBuilder;
//!
//! let graph = GraphBuilder::<&str, String>::new()
//!     .initialize("Open")
//!     .action_with_triggers(
//!         "Fix",
//!         "Open",
//!         "Fixed",
//!         TriggerBuilder::new().chars(['f']).build(),
//!     )
//!     .action("Close", "Fixed", "Closed")
//!     .select_state("Closed")
//!     .on_enter(|payload| {
//!         println!("closed with {:?}", payload);
//!         Ok(())
//!     })
//!     .build();
//!
//! let machine = StateMachine::new(graph);
//! machine.start("issue-1").unwrap();
//!
//! assert!(machine.accept("issue-1", &'f').unwrap());
//! machine
//!     .post_with_payload("issue-1", "Closed", &"released".to_string())
//!     .unwrap();
//! assert!(machine.is_state("issue-1", &"Closed").unwrap());
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod machine;
pub mod trigger;
pub mod validation;

// Re-export commonly used types
pub use builder::GraphBuilder;
pub use core::{Action, Direction, Graph, HookError, State};
pub use engine::{EngineConfig, TransitionEngine, TransitionError};
pub use machine::{MachineError, MemoryStateProvider, StateMachine, StateProvider};
pub use trigger::{Trigger, TriggerBuilder};
