//! Hierarchical state paths and their diagnostic rendering.

use super::symbol::Symbol;

/// Full hierarchical path of a state, outermost identifier first.
pub type StatePath<S> = Vec<S>;

/// Render a path as `A.B.C`.
pub fn dot_delimited<S: Symbol>(path: &[S]) -> String {
    path.iter()
        .map(Symbol::name)
        .collect::<Vec<_>>()
        .join(".")
}

/// Render a transition as `A.B -- X --> C`.
pub fn transition_label<S: Symbol, I: Symbol>(state: &[S], input: &I, next: &[S]) -> String {
    format!(
        "{} -- {} --> {}",
        dot_delimited(state),
        input.name(),
        dot_delimited(next)
    )
}
