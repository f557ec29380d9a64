//! Transition resolution: override-by-rank and action composition.

use super::error::CompileError;
use super::options::CompileOptions;
use super::unroll::{StateTraversal, TransitionTraversal};
use crate::core::{compose, dot_delimited, noop, transition_label, Action, Deferred, Symbol};
use crate::linear::StateTransition;
use std::collections::HashMap;
use tracing::debug;

/// Pick, per input, the most specific candidate a leaf inherits.
///
/// The highest rank wins. Two candidates sharing the highest rank for one
/// input make the configuration ambiguous.
fn select<'t, 'a, S: Symbol, I: Symbol>(
    current: &'t StateTraversal<'a, S, I>,
) -> Result<Vec<&'t TransitionTraversal<'a, S, I>>, CompileError> {
    let mut index: HashMap<&I, usize> = HashMap::new();
    let mut selected: Vec<(&TransitionTraversal<'a, S, I>, bool)> = Vec::new();

    for candidate in &current.transitions {
        match index.get(&candidate.input) {
            None => {
                index.insert(&candidate.input, selected.len());
                selected.push((candidate, false));
            }
            Some(&position) => {
                let (best, tied) = &mut selected[position];
                if candidate.rank > best.rank {
                    *best = candidate;
                    *tied = false;
                } else if candidate.rank == best.rank {
                    *tied = true;
                }
            }
        }
    }

    selected
        .into_iter()
        .map(|(best, tied)| {
            if tied {
                Err(CompileError::AmbiguousTransition {
                    state: dot_delimited(&current.state),
                    input: best.input.name().to_string(),
                    rank: best.rank,
                })
            } else {
                Ok(best)
            }
        })
        .collect()
}

/// Resolve every unrolled leaf's transitions into executable form.
pub(crate) fn resolve<S: Symbol, I: Symbol>(
    unrolled: &[StateTraversal<'_, S, I>],
    options: &CompileOptions,
) -> Result<Vec<StateTransition<S, I>>, CompileError> {
    let leaves: HashMap<&[S], &StateTraversal<'_, S, I>> = unrolled
        .iter()
        .map(|leaf| (leaf.state.as_slice(), leaf))
        .collect();

    let mut resolved = Vec::new();
    for current in unrolled {
        let on_exit: Vec<Action> = current.on_exit.iter().map(|d| d.compile()).collect();

        for transition in select(current)? {
            let target = leaves.get(transition.next.as_slice()).ok_or_else(|| {
                CompileError::UnresolvedTargetPath {
                    path: dot_delimited(&transition.next),
                }
            })?;

            let mut steps = on_exit.clone();
            steps.push(transition.on_transition.map_or_else(noop, Deferred::compile));
            steps.extend(target.on_enter.iter().map(|d| d.compile()));

            resolved.push(StateTransition {
                state: current.state.clone(),
                input: transition.input.clone(),
                next: transition.next.clone(),
                output: compose(steps),
                rank: transition.rank,
                label: options.label(|| {
                    transition_label(&current.state, &transition.input, &transition.next)
                }),
            });
        }
    }

    debug!(
        leaves = unrolled.len(),
        transitions = resolved.len(),
        "resolved state transitions"
    );
    Ok(resolved)
}
