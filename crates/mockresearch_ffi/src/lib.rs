//! Flutter-facing bridge for MockResearch core.

pub mod api;
