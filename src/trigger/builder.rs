//! Builder API for collecting triggers.

use crate::trigger::{FnTrigger, LiteralTrigger, SharedTrigger, StringTrigger, Trigger};
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

/// Builder for a list of triggers handed to an action.
pub struct TriggerBuilder<P> {
    triggers: Vec<SharedTrigger<P>>,
}

impl<P: 'static> TriggerBuilder<P> {
    pub fn new() -> Self {
        Self {
            triggers: Vec::new(),
        }
    }

    /// Add one trigger per character
    pub fn chars(self, chars: impl IntoIterator<Item = char>) -> Self {
        self.literals(chars)
    }

    /// Add one trigger per string
    pub fn strings<I, T>(mut self, strings: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for s in strings {
            self.triggers.push(Arc::new(StringTrigger::new(s)));
        }
        self
    }

    /// Add one trigger per `i32`
    pub fn ints(self, ints: impl IntoIterator<Item = i32>) -> Self {
        self.literals(ints)
    }

    /// Add one trigger per `i64`
    pub fn longs(self, longs: impl IntoIterator<Item = i64>) -> Self {
        self.literals(longs)
    }

    /// Add one trigger per `f32`
    pub fn floats(self, floats: impl IntoIterator<Item = f32>) -> Self {
        self.literals(floats)
    }

    /// Add one trigger per `f64`
    pub fn doubles(self, doubles: impl IntoIterator<Item = f64>) -> Self {
        self.literals(doubles)
    }

    /// Add a trigger matching any value of type `T` equal to `value`
    pub fn object<T>(mut self, value: T) -> Self
    where
        T: PartialEq + Debug + Send + Sync + 'static,
    {
        self.triggers.push(Arc::new(LiteralTrigger::new(value)));
        self
    }

    /// Add a trigger from an arbitrary predicate
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&dyn Any, Option<&P>) -> bool + Send + Sync + 'static,
    {
        self.triggers.push(Arc::new(FnTrigger::new(predicate)));
        self
    }

    /// Add an existing trigger, keeping it shared
    pub fn trigger(mut self, trigger: SharedTrigger<P>) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn build(self) -> Vec<SharedTrigger<P>> {
        self.triggers
    }

    fn literals<T>(mut self, values: impl IntoIterator<Item = T>) -> Self
    where
        T: PartialEq + Debug + Send + Sync + 'static,
    {
        for value in values {
            let trigger: Arc<dyn Trigger<P>> = Arc::new(LiteralTrigger::new(value));
            self.triggers.push(trigger);
        }
        self
    }
}

impl<P: 'static> Default for TriggerBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}
