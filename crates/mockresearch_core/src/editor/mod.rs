//! Editable-record screen core.
//!
//! # Responsibility
//! - Model the view/edit toggle with snapshot-based cancel.
//! - Gate saves on a pluggable required-fields policy.
//!
//! # Invariants
//! - The controller is the only owner of the working copy and saved snapshot.
//! - Rendering never happens here; hosts read `current_state()` instead.

pub mod controller;
pub mod error;
pub mod policy;
pub mod record;

use serde::{Deserialize, Serialize};

/// Controller mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditMode {
    /// Fields render read-only. Initial mode.
    #[default]
    Viewing,
    /// Fields render as inputs and accept `set_field`.
    Editing,
}

impl EditMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Viewing => "viewing",
            Self::Editing => "editing",
        }
    }
}
