//! Host-agnostic screen models.
//!
//! # Responsibility
//! - Translate controller state into frames a presentation host can draw.
//! - Map toolbar presses onto controller transitions.
//!
//! # See also
//! - `crate::editor` for the underlying state machine.

pub mod profile_screen;
