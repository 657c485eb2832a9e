//! Profile screen model.
//!
//! # Responsibility
//! - Build the profile frame: field rows, toolbar and secondary sections.
//! - Route toolbar presses to `begin_edit` / `cancel` / `commit`.
//! - Raise the missing-data alert when a save is rejected.
//!
//! # Invariants
//! - Secondary sections are only present while viewing.
//! - A rejected save keeps every pending edit on screen.
//! - The alert stays up until `dismiss_alert` or the next toolbar action.

use crate::editor::controller::{CommitOutcome, EditableRecordController};
use crate::editor::error::EditResult;
use crate::editor::policy::BaselinePolicy;
use crate::editor::EditMode;
use crate::model::profile::{FieldValue, ProfileField, ProfileRecord};
use log::info;

/// Placeholder shown for empty fields.
pub const REQUIRED_PLACEHOLDER: &str = "Required";
pub const SCREEN_TITLE: &str = "Profile";
pub const MISSING_DATA_ALERT_TITLE: &str = "Profile Data Missing";
pub const MISSING_DATA_ALERT_MESSAGE: &str = "Please fill out all profile fields.";
pub const PROFILE_FOOTER: &str = "Your profile information is only shared with studies you're enrolled in for the very rare case that it is necessary to contact you.";

const BIRTH_DATE_FORMAT: &str = "%b %-d, %Y";

/// One rendered profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub field: ProfileField,
    pub title: &'static str,
    /// Formatted value, or the placeholder when empty.
    pub display: String,
    pub is_placeholder: bool,
    /// Render as an input rather than static text.
    pub editable: bool,
}

/// What a toolbar button does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Close the profile screen.
    Dismiss,
    BeginEdit,
    Cancel,
    Commit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarButton {
    pub label: &'static str,
    pub action: ToolbarAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolbar {
    pub title: &'static str,
    pub leading: ToolbarButton,
    pub trailing: ToolbarButton,
}

impl Toolbar {
    fn for_mode(mode: EditMode) -> Self {
        let (leading, trailing) = match mode {
            EditMode::Viewing => (
                ToolbarButton {
                    label: "Done",
                    action: ToolbarAction::Dismiss,
                },
                ToolbarButton {
                    label: "Edit",
                    action: ToolbarAction::BeginEdit,
                },
            ),
            EditMode::Editing => (
                ToolbarButton {
                    label: "Cancel",
                    action: ToolbarAction::Cancel,
                },
                ToolbarButton {
                    label: "Done",
                    action: ToolbarAction::Commit,
                },
            ),
        };
        Self {
            title: SCREEN_TITLE,
            leading,
            trailing,
        }
    }
}

/// Sections listed below the profile fields while viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSection {
    Legal,
    Notifications,
    EnrollInOtherStudies,
    GetHelp,
    ResetStudyParticipation,
}

impl ProfileSection {
    pub const ALL: [ProfileSection; 5] = [
        Self::Legal,
        Self::Notifications,
        Self::EnrollInOtherStudies,
        Self::GetHelp,
        Self::ResetStudyParticipation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Legal => "About Research & Privacy",
            Self::Notifications => "Notifications & Invitations",
            Self::EnrollInOtherStudies => "Enroll in other studies",
            Self::GetHelp => "Get Help",
            Self::ResetStudyParticipation => "Reset Study Participation",
        }
    }

    /// Rendered with a destructive style.
    pub fn is_destructive(self) -> bool {
        matches!(self, Self::ResetStudyParticipation)
    }
}

/// Blocking notice raised by a rejected save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
    pub missing: Vec<ProfileField>,
}

/// Everything a host needs to draw the screen once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFrame {
    pub mode: EditMode,
    pub toolbar: Toolbar,
    pub rows: Vec<FieldRow>,
    pub footer: &'static str,
    pub sections: Vec<ProfileSection>,
}

/// Rendering side of the profile screen, implemented by UI layers.
pub trait PresentationHost {
    fn render(&mut self, frame: &ProfileFrame);
    fn present_alert(&mut self, alert: &Alert);
}

/// Observable result of a toolbar press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Dismissed,
    EditingStarted,
    EditsDiscarded,
    Saved(CommitOutcome),
    /// Save rejected; the alert is now pending.
    SaveRejected,
}

/// Profile screen state: controller plus pending alert.
pub struct ProfileScreen {
    controller: EditableRecordController<ProfileRecord>,
    alert: Option<Alert>,
}

impl ProfileScreen {
    pub fn new(record: ProfileRecord) -> Self {
        Self::with_baseline(record, BaselinePolicy::default())
    }

    pub fn with_baseline(record: ProfileRecord, baseline: BaselinePolicy) -> Self {
        Self {
            controller: EditableRecordController::new(record).baseline_policy(baseline),
            alert: None,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.controller.mode()
    }

    /// Record currently on screen (working copy while editing).
    pub fn record(&self) -> &ProfileRecord {
        self.controller.current_state().record
    }

    pub fn saved(&self) -> &ProfileRecord {
        self.controller.saved()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar::for_mode(self.mode())
    }

    /// Routes one field edit from the host.
    pub fn set_field(
        &mut self,
        field: ProfileField,
        value: FieldValue,
    ) -> EditResult<(), ProfileField> {
        self.controller.set_field(field, value)
    }

    pub fn press_leading(&mut self) -> EditResult<ScreenEvent, ProfileField> {
        self.perform(self.toolbar().leading.action)
    }

    pub fn press_trailing(&mut self) -> EditResult<ScreenEvent, ProfileField> {
        self.perform(self.toolbar().trailing.action)
    }

    /// Applies a toolbar action to the controller.
    ///
    /// # Errors
    /// - `InvalidState` when `Commit` is requested while viewing. Validation
    ///   failures are reported as `ScreenEvent::SaveRejected` instead.
    pub fn perform(&mut self, action: ToolbarAction) -> EditResult<ScreenEvent, ProfileField> {
        self.alert = None;
        let event = match action {
            ToolbarAction::Dismiss => ScreenEvent::Dismissed,
            ToolbarAction::BeginEdit => {
                self.controller.begin_edit();
                ScreenEvent::EditingStarted
            }
            ToolbarAction::Cancel => {
                self.controller.cancel();
                ScreenEvent::EditsDiscarded
            }
            ToolbarAction::Commit => match self.controller.commit() {
                Ok(outcome) => ScreenEvent::Saved(outcome),
                Err(err) if !err.missing_fields().is_empty() => {
                    self.alert = Some(Alert {
                        title: MISSING_DATA_ALERT_TITLE,
                        message: MISSING_DATA_ALERT_MESSAGE,
                        missing: err.missing_fields().to_vec(),
                    });
                    ScreenEvent::SaveRejected
                }
                Err(err) => return Err(err),
            },
        };
        info!(
            "event=profile_action module=screen status=ok action={:?} mode={}",
            action,
            self.mode().as_str()
        );
        Ok(event)
    }

    /// Builds the current frame.
    pub fn frame(&self) -> ProfileFrame {
        let view = self.controller.current_state();
        let editable = view.mode == EditMode::Editing;
        let rows = ProfileField::ALL
            .iter()
            .map(|field| field_row(view.record, *field, editable))
            .collect();
        let sections = if editable {
            Vec::new()
        } else {
            ProfileSection::ALL.to_vec()
        };

        ProfileFrame {
            mode: view.mode,
            toolbar: Toolbar::for_mode(view.mode),
            rows,
            footer: PROFILE_FOOTER,
            sections,
        }
    }

    /// Pushes the current frame, then any pending alert, to `host`.
    pub fn render(&self, host: &mut impl PresentationHost) {
        host.render(&self.frame());
        if let Some(alert) = &self.alert {
            host.present_alert(alert);
        }
    }
}

fn field_row(record: &ProfileRecord, field: ProfileField, editable: bool) -> FieldRow {
    let display = match field {
        ProfileField::FirstName => non_empty(&record.first_name),
        ProfileField::LastName => non_empty(&record.last_name),
        ProfileField::Email => non_empty(&record.email),
        ProfileField::PhoneNumber => non_empty(&record.phone_number),
        ProfileField::BirthDate => record
            .birth_date
            .map(|date| date.format(BIRTH_DATE_FORMAT).to_string()),
        ProfileField::CurrentRegion => record
            .current_region
            .as_ref()
            .map(|region| region.display_name().to_string()),
    };

    FieldRow {
        field,
        title: field.title(),
        is_placeholder: display.is_none(),
        display: display.unwrap_or_else(|| REQUIRED_PLACEHOLDER.to_string()),
        editable,
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
