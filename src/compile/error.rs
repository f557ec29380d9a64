//! Compile errors.

use thiserror::Error;

/// Configuration errors detected while compiling.
///
/// Compilation has no partial-success mode: any of these aborts the whole
/// pass and no compiled form is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompileError {
    #[error("Start state '{start}' is not one of the states of its level")]
    UnknownStart { start: String },

    #[error("State '{state}' is not declared in its level")]
    UnknownState { state: String },

    #[error("Transition from '{state}' targets unknown state '{target}'")]
    UnknownTarget { state: String, target: String },

    #[error("State '{state}' is declared more than once in one level")]
    DuplicateState { state: String },

    #[error("State '{state}' declares more than one transition on '{input}'")]
    DuplicateTransition { state: String, input: String },

    #[error("No leaf state matches resolved target path '{path}'")]
    UnresolvedTargetPath { path: String },

    #[error("State '{state}' has more than one transition on '{input}' at rank {rank}")]
    AmbiguousTransition {
        state: String,
        input: String,
        rank: usize,
    },

    #[error("Sub-machine starting at '{start}' contains itself")]
    CyclicSubMachine { start: String },
}
