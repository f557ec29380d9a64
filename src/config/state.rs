//! State descriptions.

use super::machine::StateMachineConfiguration;
use super::transition::TransitionConfiguration;
use crate::core::{Deferred, Symbol};
use std::sync::Arc;

/// One state of a configuration level.
///
/// A state with a `sub_state` is composite: entering it means entering the
/// nested machine's start state, recursively. The nested machine is held by
/// `Arc` so one description can be reused under several parents.
#[derive(Clone, Debug)]
pub struct StateConfiguration<S: Symbol, I: Symbol> {
    pub state: S,
    pub on_enter: Option<Deferred>,
    pub on_exit: Option<Deferred>,
    pub transitions: Vec<TransitionConfiguration<S, I>>,
    pub sub_state: Option<Arc<StateMachineConfiguration<S, I>>>,
}

impl<S: Symbol, I: Symbol> StateConfiguration<S, I> {
    /// Create a leaf state with no actions or transitions.
    pub fn new(state: S) -> Self {
        Self {
            state,
            on_enter: None,
            on_exit: None,
            transitions: Vec::new(),
            sub_state: None,
        }
    }

    pub fn with_on_enter(mut self, action: Deferred) -> Self {
        self.on_enter = Some(action);
        self
    }

    pub fn with_on_exit(mut self, action: Deferred) -> Self {
        self.on_exit = Some(action);
        self
    }

    pub fn with_transition(mut self, transition: TransitionConfiguration<S, I>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Make this state composite.
    pub fn with_sub_state(mut self, sub_state: Arc<StateMachineConfiguration<S, I>>) -> Self {
        self.sub_state = Some(sub_state);
        self
    }

    /// Check if this state owns a nested machine.
    pub fn is_composite(&self) -> bool {
        self.sub_state.is_some()
    }
}
