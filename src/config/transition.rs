//! Transition descriptions.

use crate::core::{Deferred, Symbol};

/// A transition declared on one level of a configuration.
///
/// `next` names a state of the *same* level. When that state is composite,
/// the transition enters it at its resolved start path.
#[derive(Clone, Debug)]
pub struct TransitionConfiguration<S: Symbol, I: Symbol> {
    pub input: I,
    pub next: S,
    pub on_transition: Option<Deferred>,
}

impl<S: Symbol, I: Symbol> TransitionConfiguration<S, I> {
    /// Create a transition without an action.
    pub fn new(input: I, next: S) -> Self {
        Self {
            input,
            next,
            on_transition: None,
        }
    }

    /// Attach the action invoked between the exit and enter chains.
    pub fn with_action(mut self, action: Deferred) -> Self {
        self.on_transition = Some(action);
        self
    }
}
