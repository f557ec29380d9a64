//! Compilation options.

use serde::{Deserialize, Serialize};

/// Options shared by every compilation target.
///
/// # Example
///
/// ```rust
/// use composite_state::compile::CompileOptions;
///
/// let options = CompileOptions::new().with_debugger_display(true);
/// assert!(options.debugger_display);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Attach dot-delimited path labels to compiled entities.
    ///
    /// Labels are diagnostics only and never change compiled behavior.
    #[serde(default)]
    pub debugger_display: bool,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debugger_display(mut self, enabled: bool) -> Self {
        self.debugger_display = enabled;
        self
    }

    /// Produce a label only when debugger display is enabled.
    pub(crate) fn label<F>(&self, render: F) -> Option<String>
    where
        F: FnOnce() -> String,
    {
        self.debugger_display.then(render)
    }
}
