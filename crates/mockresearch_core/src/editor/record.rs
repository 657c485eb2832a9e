//! Contracts a record type implements to be driven by the edit controller.

use std::fmt::Debug;

/// Named attribute of an editable record.
pub trait RecordField: Copy + Eq + Debug + 'static {
    /// Stable snake_case identifier, safe to log.
    fn name(self) -> &'static str;
}

/// A record with a fixed, ordered field set that can be edited field by field.
///
/// # Invariants
/// - `fields()` returns every field exactly once, in display order.
/// - `apply` either updates exactly the named field or leaves the record
///   untouched and reports a kind mismatch.
pub trait EditableRecord: Clone + PartialEq {
    type Field: RecordField;
    type Value;

    /// Every field of the record, in display order.
    fn fields() -> &'static [Self::Field];

    /// Whether `field` currently holds a non-empty / non-null value.
    fn is_populated(&self, field: Self::Field) -> bool;

    /// Writes `value` into `field`.
    ///
    /// # Errors
    /// - Returns the expected value kind when `value` does not fit `field`.
    fn apply(&mut self, field: Self::Field, value: Self::Value) -> Result<(), ValueKind>;
}

/// Value shapes a record field can accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Date,
    Region,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::Region => "region",
        }
    }
}
