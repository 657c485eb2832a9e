//! Edit controller error taxonomy.
//!
//! All variants are local and recoverable. None of them leaves the controller
//! in a corrupted state.

use crate::editor::record::{RecordField, ValueKind};
use crate::editor::EditMode;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EditResult<T, F> = Result<T, EditError<F>>;

/// Commit rejected because required fields are empty.
///
/// Raised only when the validation baseline was already complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError<F> {
    /// Empty required fields in display order. Never empty.
    pub missing: Vec<F>,
}

impl<F: RecordField> Display for ValidationError<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names = self
            .missing
            .iter()
            .map(|field| field.name())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "required fields missing: {names}")
    }
}

impl<F: RecordField> Error for ValidationError<F> {}

/// Controller operation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError<F> {
    Validation(ValidationError<F>),
    /// Operation is not allowed in the controller's current mode.
    InvalidState {
        operation: &'static str,
        mode: EditMode,
    },
    /// Value kind does not fit the target field.
    FieldTypeMismatch { field: F, expected: ValueKind },
}

impl<F: RecordField> EditError<F> {
    /// Missing fields for validation failures, empty otherwise.
    pub fn missing_fields(&self) -> &[F] {
        match self {
            Self::Validation(err) => &err.missing,
            _ => &[],
        }
    }
}

impl<F: RecordField> Display for EditError<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidState { operation, mode } => write!(
                f,
                "`{operation}` is not allowed while {}",
                mode.as_str()
            ),
            Self::FieldTypeMismatch { field, expected } => write!(
                f,
                "field `{}` expects a {} value",
                field.name(),
                expected.as_str()
            ),
        }
    }
}

impl<F: RecordField> Error for EditError<F> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl<F> From<ValidationError<F>> for EditError<F> {
    fn from(value: ValidationError<F>) -> Self {
        Self::Validation(value)
    }
}
