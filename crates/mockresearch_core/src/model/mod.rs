//! Domain model for the profile editor.
//!
//! # Responsibility
//! - Define the participant profile record and its field vocabulary.
//! - Define validated value types used by profile fields.
//!
//! # Invariants
//! - Exactly one profile record exists per edit session; it has no identity.

pub mod profile;
pub mod region;
