//! Cycle driver: many independent cycles over one graph.

use crate::core::{payload_summary, Graph, State};
use crate::engine::{EngineConfig, TransitionEngine, TransitionError};
use crate::machine::error::MachineError;
use crate::machine::locks::IdLocks;
use crate::machine::provider::{MemoryStateProvider, StateProvider};
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, trace, Level};

/// Id used by single-cycle consumers.
pub const DEFAULT_ID: &str = "DEFAULT_ID";

/// State machine driving cycles identified by id.
///
/// Wraps a [`TransitionEngine`] with a [`StateProvider`]: every operation
/// reads the current state of the id from the provider, executes the
/// transition and writes the new state back.
///
/// No lock is held while hooks run, so hooks may freely use the machine,
/// for their own id or any other. The new state is recorded with a
/// compare-and-set against the state the transition started from: when
/// another caller moved the id in the meantime the transition fails with
/// [`MachineError::StateChanged`] and nothing is recorded.
///
/// The recorded state follows edge legality, not hook success: when a hook
/// fails the new state is still recorded, and in non-silent mode the hook
/// failure is returned afterwards.
///
/// # Example
///
/// ```rust
/// use stateflow::builder::GraphBuilder;
/// use stateflow::machine::{MachineError, StateMachine};
///
/// let graph = GraphBuilder::<&str, String>::new()
///     .initialize("Open")
///     .action("Fix", "Open", "Fixed")
///     .action("Reopen", "Fixed", "Open")
///     .action("Test", "Fixed", "Tested")
///     .build();
/// let machine = StateMachine::new(graph);
///
/// assert_eq!(machine.start("t1").unwrap(), "Open");
/// machine.post("t1", "Fixed").unwrap();
/// machine.post("t1", "Open").unwrap();
///
/// let err = machine.post("t1", "Tested").unwrap_err();
/// assert!(matches!(err, MachineError::Transition(_)));
/// assert_eq!(machine.current_state("t1").unwrap(), Some("Open"));
/// ```
pub struct StateMachine<S: State, P> {
    engine: TransitionEngine<S, P>,
    provider: Arc<dyn StateProvider<S>>,
    locks: IdLocks,
}

impl<S: State, P: Debug> StateMachine<S, P> {
    /// Create a machine keeping states in memory.
    pub fn new(graph: Graph<S, P>) -> Self {
        Self::with_provider(graph, Arc::new(MemoryStateProvider::new()))
    }

    pub fn with_provider(graph: Graph<S, P>, provider: Arc<dyn StateProvider<S>>) -> Self {
        Self::from_engine(TransitionEngine::new(graph), provider)
    }

    pub fn from_engine(engine: TransitionEngine<S, P>, provider: Arc<dyn StateProvider<S>>) -> Self {
        if tracing::enabled!(Level::DEBUG) {
            debug!(summary = %engine.graph().summary(), "State machine ready");
        }
        Self {
            engine,
            provider,
            locks: IdLocks::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.engine.set_config(config);
        self
    }

    pub fn engine(&self) -> &TransitionEngine<S, P> {
        &self.engine
    }

    pub fn graph(&self) -> &Graph<S, P> {
        self.engine.graph()
    }

    pub fn set_provider(&mut self, provider: Arc<dyn StateProvider<S>>) {
        self.provider = provider;
    }

    pub fn set_silent(&mut self, silent: bool) {
        self.engine.set_silent(silent);
    }

    pub fn set_suppress_enter_on_self_loop(&mut self, suppress: bool) {
        self.engine.set_suppress_enter_on_self_loop(suppress);
    }

    pub fn set_suppress_exit_on_self_loop(&mut self, suppress: bool) {
        self.engine.set_suppress_exit_on_self_loop(suppress);
    }

    pub fn set_exception_handler<F>(&mut self, handler: F)
    where
        F: Fn(&TransitionError) + Send + Sync + 'static,
    {
        self.engine.set_exception_handler(handler);
    }

    /// Start the cycle `id` through the single initial action.
    pub fn start(&self, id: &str) -> Result<S, MachineError> {
        self.start_inner(id, None)
    }

    pub fn start_with_payload(&self, id: &str, payload: &P) -> Result<S, MachineError> {
        self.start_inner(id, Some(payload))
    }

    /// Start the cycle `id` directly at `state`.
    pub fn start_state(&self, id: &str, state: S) -> Result<(), MachineError> {
        self.start_state_inner(id, state, None)
    }

    pub fn start_state_with_payload(&self, id: &str, state: S, payload: &P) -> Result<(), MachineError> {
        self.start_state_inner(id, state, Some(payload))
    }

    /// Move the cycle `id` from its current state to `to`.
    pub fn post(&self, id: &str, to: S) -> Result<(), MachineError> {
        self.post_inner(id, to, None)
    }

    pub fn post_with_payload(&self, id: &str, to: S, payload: &P) -> Result<(), MachineError> {
        self.post_inner(id, to, Some(payload))
    }

    /// Post to `to` only when `id` is in `condition`.
    ///
    /// Returns whether a transition was executed. A mismatch, including an
    /// id that was never started, is not an error.
    pub fn post_on_state(&self, id: &str, to: S, condition: &S) -> Result<bool, MachineError> {
        self.post_when(id, None, |current| (current == condition).then_some(to))
    }

    pub fn post_on_state_with_payload(
        &self,
        id: &str,
        to: S,
        condition: &S,
        payload: &P,
    ) -> Result<bool, MachineError> {
        self.post_when(id, Some(payload), |current| {
            (current == condition).then_some(to)
        })
    }

    /// Post to `first.0` when `id` is in `first.1`, else to `second.0`
    /// when it is in `second.1`.
    pub fn post_on_either_state(
        &self,
        id: &str,
        first: (S, &S),
        second: (S, &S),
    ) -> Result<bool, MachineError> {
        self.post_on_either_state_inner(id, first, second, None)
    }

    pub fn post_on_either_state_with_payload(
        &self,
        id: &str,
        first: (S, &S),
        second: (S, &S),
        payload: &P,
    ) -> Result<bool, MachineError> {
        self.post_on_either_state_inner(id, first, second, Some(payload))
    }

    /// Post to the target mapped from the current state of `id`, if any.
    pub fn post_on_state_map(&self, id: &str, targets: &HashMap<S, S>) -> Result<bool, MachineError> {
        self.post_when(id, None, |current| targets.get(current).cloned())
    }

    pub fn post_on_state_map_with_payload(
        &self,
        id: &str,
        targets: &HashMap<S, S>,
        payload: &P,
    ) -> Result<bool, MachineError> {
        self.post_when(id, Some(payload), |current| targets.get(current).cloned())
    }

    /// Feed input data to the triggers of the current state of `id`.
    ///
    /// The first accepting trigger, in registration order, transitions the
    /// cycle to its target. Returns whether a trigger accepted. This is a
    /// mutating operation.
    pub fn accept(&self, id: &str, data: &dyn Any) -> Result<bool, MachineError> {
        self.accept_inner(id, data, None)
    }

    pub fn accept_with_payload(&self, id: &str, data: &dyn Any, payload: &P) -> Result<bool, MachineError> {
        self.accept_inner(id, data, Some(payload))
    }

    pub fn current_state(&self, id: &str) -> Result<Option<S>, MachineError> {
        let state = self.provider.current_state(id)?;
        trace!(id, state = ?state, "Current state");
        Ok(state)
    }

    pub fn is_state(&self, id: &str, state: &S) -> Result<bool, MachineError> {
        Ok(self.provider.is_state(id, state)?)
    }

    pub fn is_state_in(&self, id: &str, states: &[S]) -> Result<bool, MachineError> {
        Ok(self.provider.is_state_in(id, states)?)
    }

    /// Overwrite the state of `id` without running hooks or checking edges.
    pub fn reset_state(&self, id: &str, state: S) -> Result<(), MachineError> {
        let _guard = self.locks.lock(id);
        debug!(id, state = ?state, "Reset state");
        Ok(self.provider.set_state(id, state)?)
    }

    fn start_inner(&self, id: &str, payload: Option<&P>) -> Result<S, MachineError> {
        self.ensure_unstarted(id)?;

        let state = self.engine.initial_state()?.clone();
        let outcome = self.engine.start_state(&state, payload);
        self.settle(id, None, state.clone(), outcome)?;
        Ok(state)
    }

    fn start_state_inner(&self, id: &str, state: S, payload: Option<&P>) -> Result<(), MachineError> {
        self.ensure_unstarted(id)?;

        let outcome = self.engine.start_state(&state, payload);
        self.settle(id, None, state, outcome)
    }

    fn post_inner(&self, id: &str, to: S, payload: Option<&P>) -> Result<(), MachineError> {
        let current = self.require_started(id)?;
        self.transit(id, current, to, payload)
    }

    fn select_either(current: &S, first: (S, &S), second: (S, &S)) -> Option<S> {
        if current == first.1 {
            Some(first.0)
        } else if current == second.1 {
            Some(second.0)
        } else {
            None
        }
    }

    fn post_on_either_state_inner(
        &self,
        id: &str,
        first: (S, &S),
        second: (S, &S),
        payload: Option<&P>,
    ) -> Result<bool, MachineError> {
        self.post_when(id, payload, |current| {
            Self::select_either(current, first, second)
        })
    }

    /// Post to the target chosen from the current state, if one is chosen.
    fn post_when<F>(&self, id: &str, payload: Option<&P>, select: F) -> Result<bool, MachineError>
    where
        F: FnOnce(&S) -> Option<S>,
    {
        let Some(current) = self.current_state(id)? else {
            debug!(id, "No state for id, conditional post skipped");
            return Ok(false);
        };
        let Some(to) = select(&current) else {
            debug!(id, current = ?current, "No target state for current state");
            return Ok(false);
        };
        self.transit(id, current, to, payload)?;
        Ok(true)
    }

    fn accept_inner(&self, id: &str, data: &dyn Any, payload: Option<&P>) -> Result<bool, MachineError> {
        let current = self.require_started(id)?;

        let Some((trigger, to)) = self.engine.match_trigger(&current, data, payload) else {
            trace!(id, current = ?current, "No trigger accepted input");
            return Ok(false);
        };
        debug!(
            id,
            trigger = %trigger.describe(),
            payload = %payload_summary(payload),
            "Accept input"
        );
        let to = to.clone();
        self.transit(id, current, to, payload)?;
        Ok(true)
    }

    fn transit(&self, id: &str, current: S, to: S, payload: Option<&P>) -> Result<(), MachineError> {
        trace!(id, from = ?current, to = ?to, "Post");
        let outcome = self.engine.post(Some(&current), &to, payload);
        self.settle(id, Some(current), to, outcome)
    }

    /// Record `state` unless the transition itself was illegal.
    fn settle(
        &self,
        id: &str,
        expected: Option<S>,
        state: S,
        outcome: Result<(), TransitionError>,
    ) -> Result<(), MachineError> {
        match outcome {
            Err(err) if !err.is_hook_failure() => Err(err.into()),
            outcome => {
                self.record(id, expected.as_ref(), state)?;
                Ok(outcome?)
            }
        }
    }

    /// Write `state` if `id` is still in `expected`, `None` meaning unstarted.
    fn record(&self, id: &str, expected: Option<&S>, state: S) -> Result<(), MachineError> {
        let _guard = self.locks.lock(id);
        let found = self.provider.current_state(id)?;
        if found.as_ref() != expected {
            debug!(id, expected = ?expected, found = ?found, "State changed during transition");
            return Err(match expected {
                None => MachineError::AlreadyStarted { id: id.to_string() },
                Some(expected) => MachineError::StateChanged {
                    id: id.to_string(),
                    expected: format!("{:?}", expected),
                    found: found.map_or_else(|| "<unstarted>".to_string(), |s| format!("{:?}", s)),
                },
            });
        }
        match expected {
            None => self.provider.initialize_state(id, state)?,
            Some(_) => self.provider.set_state(id, state)?,
        }
        Ok(())
    }

    fn ensure_unstarted(&self, id: &str) -> Result<(), MachineError> {
        if self.provider.current_state(id)?.is_some() {
            return Err(MachineError::AlreadyStarted { id: id.to_string() });
        }
        Ok(())
    }

    fn require_started(&self, id: &str) -> Result<S, MachineError> {
        self.current_state(id)?
            .ok_or_else(|| MachineError::NotStarted { id: id.to_string() })
    }
}
