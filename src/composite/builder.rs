//! Dependency-ordered, memoized construction of composite machines.

use super::{CompositeStateMachine, StateTuple, TransitionTuple};
use crate::compile::{CompileError, CompileOptions};
use crate::config::StateMachineConfiguration;
use crate::core::{compile_optional, Symbol};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, trace};

type Compiled<S, I> = HashMap<usize, Arc<CompositeStateMachine<S, I>>>;

enum Work<'a, S: Symbol, I: Symbol> {
    /// Schedule a level, deferring it behind its uncompiled sub-machines.
    Visit(&'a StateMachineConfiguration<S, I>),
    /// Compile a level whose sub-machines are all compiled.
    Build(&'a StateMachineConfiguration<S, I>),
}

/// Compile `root` and every level below it, children before parents.
///
/// Levels are memoized by identity for the duration of this call only, so a
/// level reused under several parents yields one shared machine. A level
/// met again while it is still waiting on its own dependencies contains
/// itself and is rejected.
pub(super) fn build<S: Symbol, I: Symbol>(
    root: &StateMachineConfiguration<S, I>,
    options: &CompileOptions,
) -> Result<Arc<CompositeStateMachine<S, I>>, CompileError> {
    let mut compiled: Compiled<S, I> = HashMap::new();
    let mut deferred = HashSet::new();
    let mut work = vec![Work::Visit(root)];

    while let Some(item) = work.pop() {
        match item {
            Work::Visit(level) => {
                let key = level.identity();
                if compiled.contains_key(&key) {
                    continue;
                }
                if !deferred.insert(key) {
                    return Err(CompileError::CyclicSubMachine {
                        start: level.start.name().to_string(),
                    });
                }

                let unmet = unmet_dependencies(level, &compiled);
                if !unmet.is_empty() {
                    trace!(
                        start = level.start.name(),
                        dependencies = unmet.len(),
                        "deferred sub-machine"
                    );
                }

                work.push(Work::Build(level));
                work.extend(unmet.into_iter().rev().map(Work::Visit));
            }
            Work::Build(level) => {
                let key = level.identity();
                deferred.remove(&key);
                let machine = compile_level(level, &compiled, options)?;
                compiled.insert(key, Arc::new(machine));
            }
        }
    }

    debug!(machines = compiled.len(), "built composite state machine");
    compiled
        .remove(&root.identity())
        .ok_or_else(|| CompileError::CyclicSubMachine {
            start: root.start.name().to_string(),
        })
}

/// Distinct sub-machines of `level` not compiled yet, in state order.
fn unmet_dependencies<'a, S: Symbol, I: Symbol>(
    level: &'a StateMachineConfiguration<S, I>,
    compiled: &Compiled<S, I>,
) -> Vec<&'a StateMachineConfiguration<S, I>> {
    let mut seen = HashSet::new();
    level
        .states
        .iter()
        .filter_map(|s| s.sub_state.as_deref())
        .filter(|sub| !compiled.contains_key(&sub.identity()) && seen.insert(sub.identity()))
        .collect()
}

fn compile_level<S: Symbol, I: Symbol>(
    level: &StateMachineConfiguration<S, I>,
    compiled: &Compiled<S, I>,
    options: &CompileOptions,
) -> Result<CompositeStateMachine<S, I>, CompileError> {
    let mut states = Vec::with_capacity(level.states.len());

    for state in &level.states {
        let sub_state = match state.sub_state.as_deref() {
            Some(sub) => Some(compiled.get(&sub.identity()).cloned().ok_or_else(|| {
                CompileError::CyclicSubMachine {
                    start: sub.start.name().to_string(),
                }
            })?),
            None => None,
        };

        let transitions = state
            .transitions
            .iter()
            .map(|t| TransitionTuple {
                input: t.input.clone(),
                next: t.next.clone(),
                on_transition: compile_optional(t.on_transition.as_ref()),
                label: options.label(|| {
                    format!(
                        "{} -- {} --> {}",
                        state.state.name(),
                        t.input.name(),
                        t.next.name()
                    )
                }),
            })
            .collect();

        states.push(StateTuple {
            state: state.state.clone(),
            on_enter: compile_optional(state.on_enter.as_ref()),
            on_exit: compile_optional(state.on_exit.as_ref()),
            transitions,
            sub_state,
            label: options.label(|| state.state.name().to_string()),
        });
    }

    Ok(CompositeStateMachine::new(states, level.start.clone()))
}

impl<S: Symbol, I: Symbol> StateMachineConfiguration<S, I> {
    /// Compile this configuration into a nesting-preserving runtime.
    ///
    /// Every distinct level is compiled exactly once; composite states of
    /// different parents that share a level share its compiled machine.
    pub fn to_composite_state_machine(
        &self,
        options: &CompileOptions,
    ) -> Result<Arc<CompositeStateMachine<S, I>>, CompileError> {
        self.validate()?;
        build(self, options)
    }
}
