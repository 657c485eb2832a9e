//! Local app settings.
//!
//! # Responsibility
//! - Persist small boolean UI flags such as dismissed cards.
//!
//! # Invariants
//! - Unset flags read as `false`.
//! - Settings never hold profile data.

pub mod flags;
