//! Compilation passes shared by the linear, table and composite targets.
//!
//! The flat pipeline runs in three steps:
//! - path resolution: a target identifier becomes the full path of the
//!   leaf it enters
//! - unrolling: the configuration tree becomes one record per leaf, carrying
//!   inherited enter/exit chains and rank-tagged transitions
//! - resolution: per leaf and input, the highest-rank candidate is selected
//!   and its exit, transition and enter actions are composed
//!
//! Every pass is pure and allocates its own working state, so one immutable
//! configuration may be compiled from several threads at once.

mod error;
mod options;
mod path;
mod resolve;
mod unroll;

pub use error::CompileError;
pub use options::CompileOptions;
pub use path::resolve_path;

pub(crate) use resolve::resolve;
pub(crate) use unroll::unroll;
