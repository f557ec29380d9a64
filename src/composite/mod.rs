//! Composite compilation target: a nesting-preserving runtime.
//!
//! Unlike the flat table, each level of the configuration keeps its own
//! compiled machine. A composite state points at the already compiled
//! machine of its nested level, and a level reused under several parents is
//! compiled once and shared.
//!
//! # Example
//!
//! ```rust
//! use composite_state::compile::CompileOptions;
//! use composite_state::config::{
//!     StateConfiguration, StateMachineConfiguration, TransitionConfiguration,
//! };
//! use composite_state::symbol_enum;
//! use std::sync::Arc;
//!
//! symbol_enum! {
//!     enum Mode { Editing, Insert, Normal, Closed }
//! }
//! symbol_enum! {
//!     enum Key { Escape, I, Quit }
//! }
//!
//! let editing = Arc::new(StateMachineConfiguration::new(
//!     Mode::Normal,
//!     vec![
//!         StateConfiguration::new(Mode::Normal)
//!             .with_transition(TransitionConfiguration::new(Key::I, Mode::Insert)),
//!         StateConfiguration::new(Mode::Insert)
//!             .with_transition(TransitionConfiguration::new(Key::Escape, Mode::Normal)),
//!     ],
//! ));
//! let configuration = StateMachineConfiguration::new(
//!     Mode::Editing,
//!     vec![
//!         StateConfiguration::new(Mode::Editing)
//!             .with_sub_state(editing)
//!             .with_transition(TransitionConfiguration::new(Key::Quit, Mode::Closed)),
//!         StateConfiguration::new(Mode::Closed),
//!     ],
//! );
//!
//! let machine = configuration
//!     .to_composite_state_machine(&CompileOptions::default())
//!     .unwrap();
//!
//! let nested = machine.sub_state(&Mode::Editing).unwrap();
//! assert_eq!(nested.start(), &Mode::Normal);
//!
//! let step = nested.transition(&Mode::Normal, &Key::I).unwrap();
//! assert_eq!(step.next, Mode::Insert);
//! assert!(step.sub_state.is_none());
//! ```

mod builder;

use crate::core::{noop, Action, Symbol};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A transition of one level, with its action compiled.
#[derive(Clone)]
pub struct TransitionTuple<S: Symbol, I: Symbol> {
    pub input: I,
    /// Identifier of the target state within the same level.
    pub next: S,
    pub on_transition: Option<Action>,
    pub label: Option<String>,
}

impl<S: Symbol, I: Symbol> fmt::Debug for TransitionTuple<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTuple")
            .field("input", &self.input)
            .field("next", &self.next)
            .field("on_transition", &self.on_transition.is_some())
            .field("label", &self.label)
            .finish()
    }
}

/// A state of one level, with its actions compiled.
#[derive(Clone)]
pub struct StateTuple<S: Symbol, I: Symbol> {
    pub state: S,
    pub on_enter: Option<Action>,
    pub on_exit: Option<Action>,
    pub transitions: Vec<TransitionTuple<S, I>>,
    /// Compiled nested machine, present for composite states.
    pub sub_state: Option<Arc<CompositeStateMachine<S, I>>>,
    pub label: Option<String>,
}

impl<S: Symbol, I: Symbol> fmt::Debug for StateTuple<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTuple")
            .field("state", &self.state)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("transitions", &self.transitions)
            .field("sub_state", &self.sub_state)
            .field("label", &self.label)
            .finish()
    }
}

/// Result of looking up a transition.
#[derive(Clone)]
pub struct Step<S: Symbol, I: Symbol> {
    pub next: S,
    /// Transition action, a no-op when none was configured.
    pub action: Action,
    /// Compiled nested machine of `next`, when `next` is composite.
    pub sub_state: Option<Arc<CompositeStateMachine<S, I>>>,
}

impl<S: Symbol, I: Symbol> fmt::Debug for Step<S, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("next", &self.next)
            .field("sub_state", &self.sub_state.is_some())
            .finish_non_exhaustive()
    }
}

/// Compiled runtime for one configuration level.
///
/// Immutable after construction; shared between parents through `Arc` and
/// safe to read from several executors at once.
#[derive(Debug)]
pub struct CompositeStateMachine<S: Symbol, I: Symbol> {
    states: Vec<StateTuple<S, I>>,
    start: S,
    by_state: HashMap<S, usize>,
}

impl<S: Symbol, I: Symbol> CompositeStateMachine<S, I> {
    pub(crate) fn new(states: Vec<StateTuple<S, I>>, start: S) -> Self {
        let by_state = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.state.clone(), i))
            .collect();
        Self {
            states,
            start,
            by_state,
        }
    }

    /// State entered by default.
    pub fn start(&self) -> &S {
        &self.start
    }

    pub fn states(&self) -> &[StateTuple<S, I>] {
        &self.states
    }

    pub fn state(&self, state: &S) -> Option<&StateTuple<S, I>> {
        self.by_state.get(state).map(|&i| &self.states[i])
    }

    /// Compiled nested machine of a composite state.
    pub fn sub_state(&self, state: &S) -> Option<&Arc<CompositeStateMachine<S, I>>> {
        self.state(state)?.sub_state.as_ref()
    }

    /// Transition taken from `state` on `input` at this level.
    ///
    /// Only this level's transitions are consulted; an executor bubbles
    /// unhandled inputs up to the parent machine.
    pub fn transition(&self, state: &S, input: &I) -> Option<Step<S, I>> {
        let transition = self
            .state(state)?
            .transitions
            .iter()
            .find(|t| t.input == *input)?;

        Some(Step {
            next: transition.next.clone(),
            action: transition.on_transition.clone().unwrap_or_else(noop),
            sub_state: self.sub_state(&transition.next).cloned(),
        })
    }

    /// Invoke the enter action of `state`. Returns `false` for unknown states.
    pub fn enter(&self, state: &S) -> bool {
        self.invoke(state, |s| s.on_enter.as_ref())
    }

    /// Invoke the exit action of `state`. Returns `false` for unknown states.
    pub fn exit(&self, state: &S) -> bool {
        self.invoke(state, |s| s.on_exit.as_ref())
    }

    fn invoke<F>(&self, state: &S, select: F) -> bool
    where
        F: FnOnce(&StateTuple<S, I>) -> Option<&Action>,
    {
        let Some(tuple) = self.state(state) else {
            return false;
        };
        if let Some(action) = select(tuple) {
            action();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    crate::symbol_enum! {
        enum St {
            A,
            B,
        }
    }

    crate::symbol_enum! {
        enum In {
            X,
            Y,
        }
    }

    fn counting(hits: &Arc<AtomicUsize>) -> Action {
        let hits = Arc::clone(hits);
        Arc::new(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn machine(hits: &Arc<AtomicUsize>) -> CompositeStateMachine<St, In> {
        let nested = Arc::new(CompositeStateMachine::new(
            vec![StateTuple {
                state: St::A,
                on_enter: None,
                on_exit: None,
                transitions: Vec::new(),
                sub_state: None,
                label: None,
            }],
            St::A,
        ));

        CompositeStateMachine::new(
            vec![
                StateTuple {
                    state: St::A,
                    on_enter: Some(counting(hits)),
                    on_exit: Some(counting(hits)),
                    transitions: vec![TransitionTuple {
                        input: In::X,
                        next: St::B,
                        on_transition: None,
                        label: None,
                    }],
                    sub_state: None,
                    label: None,
                },
                StateTuple {
                    state: St::B,
                    on_enter: None,
                    on_exit: None,
                    transitions: vec![TransitionTuple {
                        input: In::Y,
                        next: St::A,
                        on_transition: Some(counting(hits)),
                        label: None,
                    }],
                    sub_state: Some(nested),
                    label: None,
                },
            ],
            St::A,
        )
    }

    #[test]
    fn transition_reports_next_and_nested_machine() {
        let hits = Arc::new(AtomicUsize::new(0));
        let machine = machine(&hits);

        let step = machine.transition(&St::A, &In::X).unwrap();
        assert_eq!(step.next, St::B);
        assert!(step.sub_state.is_some());

        let back = machine.transition(&St::B, &In::Y).unwrap();
        assert_eq!(back.next, St::A);
        assert!(back.sub_state.is_none());
        (back.action)();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_transition_yields_none() {
        let hits = Arc::new(AtomicUsize::new(0));
        let machine = machine(&hits);

        assert!(machine.transition(&St::A, &In::Y).is_none());
    }

    #[test]
    fn absent_transition_action_is_noop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let machine = machine(&hits);

        let step = machine.transition(&St::A, &In::X).unwrap();
        (step.action)();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn enter_and_exit_invoke_state_actions() {
        let hits = Arc::new(AtomicUsize::new(0));
        let machine = machine(&hits);

        assert!(machine.enter(&St::A));
        assert!(machine.exit(&St::A));
        assert!(machine.enter(&St::B));
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
