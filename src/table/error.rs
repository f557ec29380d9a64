//! Table layout error types.

use thiserror::Error;

/// Failures while writing, reading or checking a [`TableLayout`](super::TableLayout).
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The layout could not be encoded; carries the serde_json or bincode message
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// The input is not a well-formed layout; carries the decoder message
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// The layout was written with a different `LAYOUT_VERSION`
    #[error("Unsupported layout version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// A start or next-row index points past the last row; the message names
    /// the offending row and input
    #[error("Layout validation failed: {0}")]
    ValidationFailed(String),
}
