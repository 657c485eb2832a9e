//! Core logic for the MockResearch companion app.
//! This crate owns the profile edit rules and local settings storage.

pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod screen;
pub mod settings;

pub use editor::controller::{CommitOutcome, EditableRecordController, RecordView};
pub use editor::error::{EditError, EditResult, ValidationError};
pub use editor::policy::{AllFieldsRequired, BaselinePolicy, RequiredFields, ValidationPolicy};
pub use editor::record::{EditableRecord, RecordField, ValueKind};
pub use editor::EditMode;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::profile::{FieldValue, ProfileField, ProfileRecord};
pub use model::region::{RegionCode, RegionCodeError};
pub use screen::profile_screen::{
    Alert, FieldRow, PresentationHost, ProfileFrame, ProfileScreen, ProfileSection, ScreenEvent,
    Toolbar, ToolbarAction, ToolbarButton,
};
pub use settings::flags::{
    FlagResult, FlagStore, FlagStoreError, MemoryFlagStore, SqliteFlagStore,
    HEALTH_STUDY_CARD_DISMISSED,
};

/// Edit controller specialized for the participant profile.
pub type ProfileController = EditableRecordController<ProfileRecord>;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
