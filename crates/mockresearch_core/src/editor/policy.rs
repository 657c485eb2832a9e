//! Validation policies gating `commit`.
//!
//! # Responsibility
//! - Decide which fields are required for a record to count as complete.
//! - Decide which record acts as the baseline for enforcing completeness.
//!
//! # Invariants
//! - Policies are pure: they never mutate the record they inspect.
//! - Missing fields are reported in record display order.

use crate::editor::record::{EditableRecord, RecordField};

/// Defines which fields a record must populate to be complete.
pub trait ValidationPolicy<R: EditableRecord> {
    /// Returns the required fields that `record` leaves empty.
    fn missing_fields(&self, record: &R) -> Vec<R::Field>;

    fn is_complete(&self, record: &R) -> bool {
        self.missing_fields(record).is_empty()
    }
}

/// Every field of the record is required.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllFieldsRequired;

impl<R: EditableRecord> ValidationPolicy<R> for AllFieldsRequired {
    fn missing_fields(&self, record: &R) -> Vec<R::Field> {
        R::fields()
            .iter()
            .copied()
            .filter(|field| !record.is_populated(*field))
            .collect()
    }
}

/// Only the listed fields are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredFields<F> {
    required: Vec<F>,
}

impl<F> RequiredFields<F> {
    pub fn new(required: impl IntoIterator<Item = F>) -> Self {
        Self {
            required: required.into_iter().collect(),
        }
    }
}

impl<R, F> ValidationPolicy<R> for RequiredFields<F>
where
    R: EditableRecord<Field = F>,
    F: RecordField,
{
    fn missing_fields(&self, record: &R) -> Vec<F> {
        R::fields()
            .iter()
            .copied()
            .filter(|field| self.required.contains(field) && !record.is_populated(*field))
            .collect()
    }
}

/// Which record decides whether completeness is enforced on commit.
///
/// Completeness is only enforced once the baseline itself was complete, so a
/// never-completed record can still be saved partially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaselinePolicy {
    /// Baseline is the last successfully saved snapshot.
    #[default]
    LastSaved,
    /// Baseline is the record the controller was hydrated with; it never moves.
    Initial,
}

impl BaselinePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastSaved => "last_saved",
            Self::Initial => "initial",
        }
    }
}
