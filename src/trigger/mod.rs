//! Triggers: predicates over external input that drive automatic transitions.
//!
//! A trigger is registered under a source state together with the target
//! state of its action. When a cycle in that state is fed input data, the
//! triggers are evaluated in registration order and the first one that
//! accepts decides the transition.
//!
//! Input data is dynamically typed (`&dyn Any`) so one graph can react to
//! characters, numbers and strings at once. Literal triggers match by
//! type-exact equality: a `char` trigger never matches an `i32` input.
//!
//! # Example
//!
//! ```rust
//! use stateflow::trigger::{Trigger, TriggerBuilder};
//!
//! let triggers = TriggerBuilder::<()>::new()
//!     .chars(['a', 'A'])
//!     .ints([1])
//!     .build();
//!
//! assert!(triggers[0].accept(&'a', None));
//! assert!(!triggers[0].accept(&'b', None));
//! assert!(triggers[2].accept(&1i32, None));
//! assert!(!triggers[2].accept(&1i64, None));
//! ```

mod builder;

pub use builder::TriggerBuilder;

use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Predicate deciding whether input data fires a transition.
pub trait Trigger<P>: Send + Sync {
    /// Check the input data and the transition payload.
    fn accept(&self, data: &dyn Any, payload: Option<&P>) -> bool;

    /// Short description for log lines.
    fn describe(&self) -> String {
        "custom".to_string()
    }
}

/// Trigger shared between the routes it watches.
///
/// A trigger given to a bidirectional action is the same instance in both
/// directions, not a copy.
pub type SharedTrigger<P> = Arc<dyn Trigger<P>>;

/// Matches input of type `T` equal to a fixed literal.
#[derive(Clone, Debug)]
pub struct LiteralTrigger<T> {
    expected: T,
}

impl<T> LiteralTrigger<T> {
    pub fn new(expected: T) -> Self {
        Self { expected }
    }
}

impl<T, P> Trigger<P> for LiteralTrigger<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    fn accept(&self, data: &dyn Any, _payload: Option<&P>) -> bool {
        data.downcast_ref::<T>()
            .is_some_and(|data| *data == self.expected)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.expected)
    }
}

/// Matches string input, owned or `&'static str`.
#[derive(Clone, Debug)]
pub struct StringTrigger {
    expected: String,
}

impl StringTrigger {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl<P> Trigger<P> for StringTrigger {
    fn accept(&self, data: &dyn Any, _payload: Option<&P>) -> bool {
        if let Some(data) = data.downcast_ref::<String>() {
            return *data == self.expected;
        }
        data.downcast_ref::<&'static str>()
            .is_some_and(|data| *data == self.expected)
    }

    fn describe(&self) -> String {
        format!("{:?}", self.expected)
    }
}

/// Trigger backed by an arbitrary predicate.
pub struct FnTrigger<P> {
    predicate: Box<dyn Fn(&dyn Any, Option<&P>) -> bool + Send + Sync>,
}

impl<P> FnTrigger<P> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&dyn Any, Option<&P>) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }
}

impl<P> Trigger<P> for FnTrigger<P> {
    fn accept(&self, data: &dyn Any, payload: Option<&P>) -> bool {
        (self.predicate)(data, payload)
    }
}
