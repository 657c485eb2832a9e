//! View/edit controller for a single record.
//!
//! # Responsibility
//! - Own the working copy and the last-saved snapshot of one record.
//! - Drive the `Viewing` / `Editing` state machine.
//! - Gate `commit` on the configured validation policy.
//!
//! # Invariants
//! - While `Viewing`, the working copy equals the saved snapshot.
//! - `cancel` restores the working copy to the saved snapshot exactly.
//! - A rejected commit keeps the mode `Editing` and keeps every pending edit.
//! - Field values are never logged; only field names.

use crate::editor::error::{EditError, EditResult, ValidationError};
use crate::editor::policy::{AllFieldsRequired, BaselinePolicy, ValidationPolicy};
use crate::editor::record::{EditableRecord, RecordField};
use crate::editor::EditMode;
use log::{debug, info, warn};

/// Result of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The saved snapshot was replaced by the working copy.
    Saved,
    /// The working copy already matched the snapshot; nothing changed.
    Unchanged,
}

impl CommitOutcome {
    pub fn changed(self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Read-only view handed to presentation hosts.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordView<'a, R> {
    /// Working copy while editing, saved snapshot while viewing.
    pub record: &'a R,
    pub mode: EditMode,
}

/// Controller for one edit session over one record.
pub struct EditableRecordController<R: EditableRecord, P = AllFieldsRequired> {
    working: R,
    saved: R,
    initial: R,
    mode: EditMode,
    policy: P,
    baseline: BaselinePolicy,
}

impl<R: EditableRecord> EditableRecordController<R, AllFieldsRequired> {
    /// Creates a controller in `Viewing` mode where every field is required.
    pub fn new(record: R) -> Self {
        Self::with_policy(record, AllFieldsRequired)
    }
}

impl<R: EditableRecord + Default> Default for EditableRecordController<R, AllFieldsRequired> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R, P> EditableRecordController<R, P>
where
    R: EditableRecord,
    P: ValidationPolicy<R>,
{
    /// Creates a controller hydrated with `record` and a custom policy.
    ///
    /// The record becomes the working copy, the saved snapshot and the
    /// initial baseline at once.
    pub fn with_policy(record: R, policy: P) -> Self {
        Self {
            working: record.clone(),
            saved: record.clone(),
            initial: record,
            mode: EditMode::Viewing,
            policy,
            baseline: BaselinePolicy::default(),
        }
    }

    /// Selects which record decides whether completeness is enforced.
    pub fn baseline_policy(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    /// Returns the record the host should render together with the mode.
    pub fn current_state(&self) -> RecordView<'_, R> {
        RecordView {
            record: &self.working,
            mode: self.mode,
        }
    }

    /// Last successfully saved snapshot.
    pub fn saved(&self) -> &R {
        &self.saved
    }

    /// Whether the working copy differs from the saved snapshot.
    pub fn has_pending_changes(&self) -> bool {
        self.working != self.saved
    }

    /// Required fields the working copy currently leaves empty.
    pub fn missing_fields(&self) -> Vec<R::Field> {
        self.policy.missing_fields(&self.working)
    }

    /// Enters `Editing`. A no-op when already editing, so pending edits
    /// survive a repeated call.
    pub fn begin_edit(&mut self) {
        if self.is_editing() {
            debug!("event=record_begin_edit module=editor status=skipped reason=already_editing");
            return;
        }
        self.mode = EditMode::Editing;
        debug!("event=record_begin_edit module=editor status=ok");
    }

    /// Discards pending edits and returns to `Viewing`. A no-op while viewing.
    pub fn cancel(&mut self) {
        if !self.is_editing() {
            debug!("event=record_cancel module=editor status=skipped reason=not_editing");
            return;
        }
        let discarded = self.has_pending_changes();
        self.working = self.saved.clone();
        self.mode = EditMode::Viewing;
        debug!("event=record_cancel module=editor status=ok discarded={discarded}");
    }

    /// Updates one field of the working copy.
    ///
    /// No validation runs here; intermediate incomplete values are allowed.
    ///
    /// # Errors
    /// - `InvalidState` when not editing; the record is left untouched.
    /// - `FieldTypeMismatch` when the value kind does not fit the field.
    pub fn set_field(&mut self, field: R::Field, value: R::Value) -> EditResult<(), R::Field> {
        if !self.is_editing() {
            warn!(
                "event=record_set_field module=editor status=error field={} error_code=invalid_state",
                field.name()
            );
            return Err(EditError::InvalidState {
                operation: "set_field",
                mode: self.mode,
            });
        }

        self.working
            .apply(field, value)
            .map_err(|expected| EditError::FieldTypeMismatch { field, expected })?;
        debug!(
            "event=record_set_field module=editor status=ok field={}",
            field.name()
        );
        Ok(())
    }

    /// Saves the working copy and returns to `Viewing`.
    ///
    /// # Errors
    /// - `Validation` when the working copy is incomplete and the baseline
    ///   was complete; mode stays `Editing` and edits are kept.
    /// - `InvalidState` when not editing.
    pub fn commit(&mut self) -> EditResult<CommitOutcome, R::Field> {
        if !self.is_editing() {
            return Err(EditError::InvalidState {
                operation: "commit",
                mode: self.mode,
            });
        }

        let missing = self.policy.missing_fields(&self.working);
        if !missing.is_empty() && self.policy.is_complete(self.baseline_record()) {
            warn!(
                "event=record_commit module=editor status=rejected baseline={} missing={}",
                self.baseline.as_str(),
                field_names(&missing)
            );
            return Err(ValidationError { missing }.into());
        }

        let outcome = if self.working == self.saved {
            CommitOutcome::Unchanged
        } else {
            self.saved = self.working.clone();
            CommitOutcome::Saved
        };
        self.mode = EditMode::Viewing;
        info!(
            "event=record_commit module=editor status=ok changed={} incomplete_fields={}",
            outcome.changed(),
            missing.len()
        );
        Ok(outcome)
    }

    fn baseline_record(&self) -> &R {
        match self.baseline {
            BaselinePolicy::LastSaved => &self.saved,
            BaselinePolicy::Initial => &self.initial,
        }
    }
}

fn field_names<F: RecordField>(fields: &[F]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(",")
}
