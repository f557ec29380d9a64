//! State machine descriptions and their structural validation.

use super::state::StateConfiguration;
use crate::compile::{resolve_path, CompileError};
use crate::core::{StatePath, Symbol};
use std::collections::HashSet;
use tracing::trace;

/// One level of a hierarchical state machine.
///
/// Owns its states and designates the `start` state entered by default.
/// Instances are immutable once authored; nested levels are shared by
/// reference and identified by address during compilation.
#[derive(Clone, Debug)]
pub struct StateMachineConfiguration<S: Symbol, I: Symbol> {
    pub states: Vec<StateConfiguration<S, I>>,
    pub start: S,
}

enum Visit<'a, S: Symbol, I: Symbol> {
    Enter(&'a StateMachineConfiguration<S, I>),
    Leave(usize),
}

impl<S: Symbol, I: Symbol> StateMachineConfiguration<S, I> {
    pub fn new(start: S, states: Vec<StateConfiguration<S, I>>) -> Self {
        Self { states, start }
    }

    /// Find a state of this level by identifier.
    pub fn find(&self, state: &S) -> Option<&StateConfiguration<S, I>> {
        self.states.iter().find(|s| s.state == *state)
    }

    /// States with the start state first, the rest in authored order.
    ///
    /// Fails if the start state is not part of this level.
    pub fn ordered_states(&self) -> Result<Vec<&StateConfiguration<S, I>>, CompileError> {
        let start = self
            .find(&self.start)
            .ok_or_else(|| CompileError::UnknownStart {
                start: self.start.name().to_string(),
            })?;

        let mut ordered = Vec::with_capacity(self.states.len());
        ordered.push(start);
        ordered.extend(self.states.iter().filter(|s| s.state != self.start));
        Ok(ordered)
    }

    /// Full path of the leaf entered when this machine starts.
    pub fn start_path(&self) -> Result<StatePath<S>, CompileError> {
        resolve_path(&self.states, &self.start)
    }

    /// Check every level reachable from this one.
    ///
    /// Each level must have unique state identifiers and a start state among
    /// them. Every transition must name a state of that same level, and no
    /// state may react to one input twice. Nested levels must form a tree;
    /// shared levels are checked once.
    pub fn validate(&self) -> Result<(), CompileError> {
        let mut checked = HashSet::new();
        let mut active = HashSet::new();
        let mut stack = vec![Visit::Enter(self)];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(level) => {
                    let key = level.identity();
                    if checked.contains(&key) {
                        continue;
                    }
                    if !active.insert(key) {
                        return Err(CompileError::CyclicSubMachine {
                            start: level.start.name().to_string(),
                        });
                    }

                    level.validate_level()?;

                    stack.push(Visit::Leave(key));
                    for state in level.states.iter().rev() {
                        if let Some(sub_state) = state.sub_state.as_deref() {
                            stack.push(Visit::Enter(sub_state));
                        }
                    }
                }
                Visit::Leave(key) => {
                    active.remove(&key);
                    checked.insert(key);
                }
            }
        }

        trace!(levels = checked.len(), "configuration validated");
        Ok(())
    }

    fn validate_level(&self) -> Result<(), CompileError> {
        let mut seen = HashSet::with_capacity(self.states.len());
        for state in &self.states {
            if !seen.insert(&state.state) {
                return Err(CompileError::DuplicateState {
                    state: state.state.name().to_string(),
                });
            }
        }

        if !seen.contains(&self.start) {
            return Err(CompileError::UnknownStart {
                start: self.start.name().to_string(),
            });
        }

        for state in &self.states {
            let mut inputs = HashSet::with_capacity(state.transitions.len());
            for transition in &state.transitions {
                if !seen.contains(&transition.next) {
                    return Err(CompileError::UnknownTarget {
                        state: state.state.name().to_string(),
                        target: transition.next.name().to_string(),
                    });
                }
                if !inputs.insert(&transition.input) {
                    return Err(CompileError::DuplicateTransition {
                        state: state.state.name().to_string(),
                        input: transition.input.name().to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Address of this level, used to memoize shared sub-machines.
    pub(crate) fn identity(&self) -> usize {
        self as *const Self as usize
    }
}
