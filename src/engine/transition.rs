//! Transition execution over an immutable graph.

use crate::core::{describe, payload_summary, Direction, Graph, State};
use crate::engine::config::{EngineConfig, ExceptionHandler};
use crate::engine::error::{ConfigurationError, TransitionError};
use crate::trigger::SharedTrigger;
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Executes single transitions against a shared graph.
///
/// The engine is a pure function of graph, source state, target state and
/// payload plus the hooks it runs: it never records where a cycle is. The
/// caller owns the current state, see
/// [`StateMachine`](crate::machine::StateMachine) for a driver that keeps
/// it in a state provider.
///
/// # Example
///
/// ```rust
/// use stateflow::builder::GraphBuilder;
/// use stateflow::engine::TransitionEngine;
///
/// let graph = GraphBuilder::<&str, String>::new()
///     .initialize("first")
///     .action("f-s", "first", "second")
///     .build();
///
/// let engine = TransitionEngine::new(graph);
/// let state = engine.start(None).unwrap();
/// assert_eq!(state, "first");
///
/// engine.post(Some(&"first"), &"second", None).unwrap();
/// assert!(engine.post(Some(&"second"), &"first", None).is_err());
/// ```
pub struct TransitionEngine<S, P> {
    graph: Arc<Graph<S, P>>,
    config: EngineConfig,
    exception_handler: Option<ExceptionHandler>,
}

impl<S: State, P: Debug> TransitionEngine<S, P> {
    pub fn new(graph: Graph<S, P>) -> Self {
        Self::from_shared(Arc::new(graph))
    }

    /// Create an engine over a graph shared with other engines.
    pub fn from_shared(graph: Arc<Graph<S, P>>) -> Self {
        Self {
            graph,
            config: EngineConfig::default(),
            exception_handler: None,
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn graph(&self) -> &Graph<S, P> {
        &self.graph
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    /// Set whether hook failures are swallowed (the default) or returned.
    pub fn set_silent(&mut self, silent: bool) {
        self.config.silent = silent;
    }

    pub fn set_suppress_enter_on_self_loop(&mut self, suppress: bool) {
        self.config.suppress_enter_on_self_loop = suppress;
    }

    pub fn set_suppress_exit_on_self_loop(&mut self, suppress: bool) {
        self.config.suppress_exit_on_self_loop = suppress;
    }

    /// Handler notified of every hook failure, in silent mode too.
    pub fn set_exception_handler<F>(&mut self, handler: F)
    where
        F: Fn(&TransitionError) + Send + Sync + 'static,
    {
        self.exception_handler = Some(Arc::new(handler));
    }

    /// Target of the single initial action.
    pub fn initial_state(&self) -> Result<&S, TransitionError> {
        let routes = self.graph.routes_from(None);
        match routes {
            [] => Err(ConfigurationError::NoInitialAction.into()),
            [route] => Ok(route.to()),
            _ => Err(ConfigurationError::MultipleInitialActions {
                count: routes.len(),
            }
            .into()),
        }
    }

    /// Enter the graph through its single initial action.
    ///
    /// Returns the state entered.
    pub fn start(&self, payload: Option<&P>) -> Result<S, TransitionError> {
        let state = self.initial_state()?.clone();
        debug!(state = ?state, "Start state");
        self.transit(None, &state, payload)?;
        Ok(state)
    }

    /// Enter the graph directly at `state`.
    ///
    /// An initial action leading to `state` must have been registered.
    pub fn start_state(&self, state: &S, payload: Option<&P>) -> Result<(), TransitionError> {
        debug!(state = ?state, "Start state at explicit state");
        self.transit(None, state, payload)
    }

    /// Execute the transition `from -> to`.
    pub fn post(&self, from: Option<&S>, to: &S, payload: Option<&P>) -> Result<(), TransitionError> {
        self.transit(from, to, payload)
    }

    pub fn has_route(&self, from: Option<&S>, to: &S) -> bool {
        self.graph.has_route(from, to)
    }

    /// First trigger watching `state` that accepts the input, with its
    /// target. Pure: no transition is executed.
    pub fn match_trigger(
        &self,
        state: &S,
        data: &dyn Any,
        payload: Option<&P>,
    ) -> Option<(&SharedTrigger<P>, &S)> {
        self.graph
            .triggers_from(state)
            .find(|(trigger, _)| trigger.accept(data, payload))
    }

    fn transit(&self, from: Option<&S>, to: &S, payload: Option<&P>) -> Result<(), TransitionError> {
        let Some(action) = self.graph.action(from, to) else {
            return Err(TransitionError::InvalidTransition {
                from: describe(from),
                to: describe(Some(to)),
            });
        };
        debug!(
            action = action.name(),
            from = %describe(from),
            to = ?to,
            payload = %payload_summary(payload),
            "Transition"
        );

        let self_loop = action.is_self_loop();

        if let Some(from) = from {
            if self_loop && self.config.suppress_exit_on_self_loop {
                debug!(state = ?from, "Skip EXIT hooks for self loop");
            } else {
                self.run_hooks(from, Direction::Exit, payload)?;
            }
        }

        if self_loop && self.config.suppress_enter_on_self_loop {
            debug!(state = ?to, "Skip ENTER hooks for self loop");
        } else {
            self.run_hooks(to, Direction::Enter, payload)?;
        }

        Ok(())
    }

    fn run_hooks(&self, state: &S, direction: Direction, payload: Option<&P>) -> Result<(), TransitionError> {
        let hooks = self.graph.hooks(state, direction);
        if hooks.is_empty() {
            trace!(state = ?state, %direction, "No hooks to execute");
            return Ok(());
        }
        debug!(state = ?state, %direction, count = hooks.len(), "Execute hooks");

        for hook in hooks {
            let Err(source) = hook.execute(payload) else {
                continue;
            };
            let err = TransitionError::HookExecution {
                state: format!("{:?}", state),
                direction,
                source,
            };
            error!(error = %err, "Failed to execute hook");
            if let Some(handler) = &self.exception_handler {
                handler(&err);
            }
            if self.config.silent {
                // the rest of this list is skipped
                break;
            }
            return Err(err);
        }
        Ok(())
    }
}
