//! Core value types shared by every compilation pass.
//!
//! This module contains the small vocabulary the compiler works in:
//! - Symbolic identifiers via the `Symbol` trait
//! - Deferred actions and their compiled, composable form
//! - Hierarchical state paths
//!
//! Nothing in here touches a configuration tree.

mod action;
mod macros;
mod path;
mod symbol;

pub use action::{compose, noop, Action, Deferred};
pub(crate) use action::compile_optional;
pub use path::{dot_delimited, transition_label, StatePath};
pub use symbol::Symbol;
