//! Hierarchy unrolling: one traversal record per reachable leaf.
//!
//! Records accumulate everything a leaf inherits from its ancestors: the
//! enter chain (outermost first), the exit chain (innermost first) and every
//! ancestor transition tagged with the depth it was declared at.

use super::error::CompileError;
use super::path::resolve_path;
use crate::config::{StateConfiguration, StateMachineConfiguration};
use crate::core::{Deferred, StatePath, Symbol};
use tracing::trace;

/// A transition candidate inherited by a leaf.
#[derive(Clone, Debug)]
pub(crate) struct TransitionTraversal<'a, S: Symbol, I: Symbol> {
    pub input: I,
    /// Full path of the leaf this transition enters.
    pub next: StatePath<S>,
    pub on_transition: Option<&'a Deferred>,
    /// Depth of the level that declared the transition; deeper wins.
    pub rank: usize,
}

/// Accumulated context of one state during unrolling.
#[derive(Clone, Debug)]
pub(crate) struct StateTraversal<'a, S: Symbol, I: Symbol> {
    pub configuration: &'a StateConfiguration<S, I>,
    pub on_enter: Vec<&'a Deferred>,
    pub on_exit: Vec<&'a Deferred>,
    pub state: StatePath<S>,
    pub transitions: Vec<TransitionTraversal<'a, S, I>>,
}

impl<'a, S: Symbol, I: Symbol> StateTraversal<'a, S, I> {
    /// Record for `child`, a state of `level`, nested under `parent`.
    fn descend(
        parent: Option<&Self>,
        level: &'a StateMachineConfiguration<S, I>,
        child: &'a StateConfiguration<S, I>,
    ) -> Result<Self, CompileError> {
        let prefix: &[S] = match parent {
            Some(parent) => &parent.state,
            None => &[],
        };

        let mut state = prefix.to_vec();
        state.push(child.state.clone());
        let rank = state.len();

        let mut transitions = parent.map_or_else(Vec::new, |p| p.transitions.clone());
        for transition in &child.transitions {
            let mut next = prefix.to_vec();
            next.extend(resolve_path(&level.states, &transition.next)?);
            transitions.push(TransitionTraversal {
                input: transition.input.clone(),
                next,
                on_transition: transition.on_transition.as_ref(),
                rank,
            });
        }

        let mut on_enter = parent.map_or_else(Vec::new, |p| p.on_enter.clone());
        on_enter.extend(child.on_enter.as_ref());

        let mut on_exit: Vec<&'a Deferred> = child.on_exit.iter().collect();
        if let Some(parent) = parent {
            on_exit.extend(parent.on_exit.iter().copied());
        }

        Ok(Self {
            configuration: child,
            on_enter,
            on_exit,
            state,
            transitions,
        })
    }
}

/// Unroll `configuration` into leaf records.
///
/// Traversal is depth-first, start state first and the remaining states in
/// authored order, so the first record is always the root start leaf.
/// Composite records are replaced by their children and never emitted.
pub(crate) fn unroll<S: Symbol, I: Symbol>(
    configuration: &StateMachineConfiguration<S, I>,
) -> Result<Vec<StateTraversal<'_, S, I>>, CompileError> {
    let mut visit = Vec::with_capacity(configuration.states.len());
    for state in configuration.ordered_states()?.into_iter().rev() {
        visit.push(StateTraversal::descend(None, configuration, state)?);
    }

    let mut unrolled = Vec::new();
    while let Some(current) = visit.pop() {
        let state = current.configuration;
        let Some(sub_state) = state.sub_state.as_deref() else {
            trace!(
                depth = current.state.len(),
                transitions = current.transitions.len(),
                "unrolled leaf"
            );
            unrolled.push(current);
            continue;
        };

        for child in sub_state.ordered_states()?.into_iter().rev() {
            visit.push(StateTraversal::descend(Some(&current), sub_state, child)?);
        }
    }

    Ok(unrolled)
}
