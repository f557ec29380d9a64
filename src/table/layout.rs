//! Serializable shape of a compiled table.
//!
//! A layout captures rows, inputs and next-row indices. It does NOT include
//! actions, which are not serializable; it is meant for inspection, diffing
//! compiled output across builds, and tooling.

use super::error::LayoutError;
use crate::core::{StatePath, Symbol};
use serde::{Deserialize, Serialize};

/// Version identifier for layout format
pub const LAYOUT_VERSION: u32 = 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLayout<I: Symbol> {
    pub input: I,
    pub next: usize,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RowLayout<S: Symbol, I: Symbol> {
    pub state: StatePath<S>,
    #[serde(default)]
    pub label: Option<String>,
    pub transitions: Vec<TransitionLayout<I>>,
}

/// Action-free snapshot of a [`StateTransitionTable`](super::StateTransitionTable).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TableLayout<S: Symbol, I: Symbol> {
    /// Layout format version
    pub version: u32,

    /// Row entered when the machine starts
    pub start: usize,

    pub states: Vec<RowLayout<S, I>>,
}

impl<S: Symbol, I: Symbol> TableLayout<S, I> {
    pub fn to_json(&self) -> Result<String, LayoutError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        let layout: Self = serde_json::from_str(json)
            .map_err(|e| LayoutError::DeserializationFailed(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, LayoutError> {
        bincode::serialize(self).map_err(|e| LayoutError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, LayoutError> {
        let layout: Self = bincode::deserialize(bytes)
            .map_err(|e| LayoutError::DeserializationFailed(e.to_string()))?;
        layout.validate()?;
        Ok(layout)
    }

    /// Check version and that every index points at an existing row.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.version != LAYOUT_VERSION {
            return Err(LayoutError::UnsupportedVersion {
                found: self.version,
                supported: LAYOUT_VERSION,
            });
        }

        let rows = self.states.len();
        if rows > 0 && self.start >= rows {
            return Err(LayoutError::ValidationFailed(format!(
                "start row {} out of range ({} rows)",
                self.start, rows
            )));
        }

        for (row, state) in self.states.iter().enumerate() {
            if let Some(t) = state.transitions.iter().find(|t| t.next >= rows) {
                return Err(LayoutError::ValidationFailed(format!(
                    "row {} input '{}' points at missing row {}",
                    row,
                    t.input.name(),
                    t.next
                )));
            }
        }

        Ok(())
    }
}
