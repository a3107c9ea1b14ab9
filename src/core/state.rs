//! Core State trait for graph nodes.
//!
//! A state is any opaque value the consumer chooses: an enum, a string,
//! an integer. The engine only ever compares, hashes and clones states.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Implemented automatically for every type that satisfies the bounds, so
/// plain strings and derived enums work without any boilerplate.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the graph and the state provider
/// - `Eq` + `Hash`: states key the adjacency and hook maps
/// - `Debug`: states are rendered in errors and log lines
/// - `Send` + `Sync`: graphs are shared between threads driving different ids
///
/// Serialization is not required. Checkpoints and persisting providers add
/// `Serialize`/`Deserialize` bounds of their own.
///
/// # Example
///
/// ```rust
/// use stateflow::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Ticket {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>() {}
///
/// assert_state::<Ticket>();
/// assert_state::<String>();
/// assert_state::<&'static str>();
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Render an optional state for messages, `None` being the initial entry.
pub(crate) fn describe<S: State>(state: Option<&S>) -> String {
    match state {
        Some(state) => format!("{:?}", state),
        None => "<initial>".to_string(),
    }
}

/// Short rendering of a payload for log lines.
///
/// Keeps at most 16 characters of the `Debug` output, `"null"` when absent.
pub fn payload_summary<P: Debug>(payload: Option<&P>) -> String {
    match payload {
        Some(payload) => format!("{:?}", payload).chars().take(16).collect(),
        None => "null".to_string(),
    }
}
