//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the process-wide profile edit session to Dart via FRB.
//! - Expose the persisted flag store used by the tasks tab.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Profile responses always carry the full current frame, even on failure.
//! - Log lines never contain profile values.

use chrono::NaiveDate;
use mockresearch_core::db::open_db;
use mockresearch_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    FieldValue, FlagStore, ProfileField, ProfileRecord, ProfileScreen, RecordField, RegionCode,
    ScreenEvent, SqliteFlagStore, ToolbarAction,
};
use log::warn;
use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};

const SETTINGS_DB_FILE_NAME: &str = "mockresearch_settings.sqlite3";
const BIRTH_DATE_WIRE_FORMAT: &str = "%Y-%m-%d";
static SETTINGS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static PROFILE_SESSION: Lazy<Mutex<ProfileScreen>> =
    Lazy::new(|| Mutex::new(ProfileScreen::new(ProfileRecord::default())));

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One profile row as rendered by the Flutter host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileFieldItem {
    /// Stable field name (`first_name`, `birth_date`, ...).
    pub field: String,
    pub title: String,
    pub display: String,
    pub is_placeholder: bool,
    pub editable: bool,
}

/// Profile session envelope returned by every profile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileResponse {
    /// Whether the requested operation succeeded.
    pub ok: bool,
    /// `viewing` or `editing`.
    pub mode: String,
    pub leading_label: String,
    pub trailing_label: String,
    pub fields: Vec<ProfileFieldItem>,
    /// Section titles shown below the fields.
    pub sections: Vec<String>,
    /// Set when the missing-data alert must be shown.
    pub alert_title: Option<String>,
    pub alert_message: Option<String>,
    /// Missing required field names for a rejected save.
    pub missing_fields: Vec<String>,
    /// Whether the host should close the profile screen.
    pub dismiss: bool,
    pub message: String,
}

/// Replaces the profile session with a freshly hydrated record.
///
/// Input semantics:
/// - `birth_date`: `YYYY-MM-DD` or empty for unset.
/// - `current_region`: ISO alpha-2 code or empty for unset.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_load(
    first_name: String,
    last_name: String,
    birth_date: String,
    email: String,
    phone_number: String,
    current_region: String,
) -> ProfileResponse {
    let record = parse_birth_date(&birth_date).and_then(|birth_date| {
        Ok(ProfileRecord {
            first_name,
            last_name,
            birth_date,
            email,
            phone_number,
            current_region: parse_region(&current_region)?,
        })
    });

    let mut session = lock_session();
    match record {
        Ok(record) => {
            *session = ProfileScreen::new(record);
            respond(&session, true, false, "Profile loaded.")
        }
        Err(err) => {
            warn!("event=ffi_profile_load module=ffi status=error error_code=invalid_input");
            respond(&session, false, false, format!("profile_load failed: {err}"))
        }
    }
}

/// Returns the current profile frame without changing state.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_snapshot() -> ProfileResponse {
    let session = lock_session();
    respond(&session, true, false, "")
}

/// Presses the leading toolbar button (`Done` / `Cancel`).
#[flutter_rust_bridge::frb(sync)]
pub fn profile_press_leading() -> ProfileResponse {
    let mut session = lock_session();
    let action = session.toolbar().leading.action;
    perform(&mut session, action)
}

/// Presses the trailing toolbar button (`Edit` / `Done`).
#[flutter_rust_bridge::frb(sync)]
pub fn profile_press_trailing() -> ProfileResponse {
    let mut session = lock_session();
    let action = session.toolbar().trailing.action;
    perform(&mut session, action)
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_begin_edit() -> ProfileResponse {
    perform(&mut lock_session(), ToolbarAction::BeginEdit)
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_cancel() -> ProfileResponse {
    perform(&mut lock_session(), ToolbarAction::Cancel)
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_commit() -> ProfileResponse {
    perform(&mut lock_session(), ToolbarAction::Commit)
}

/// Sets one text field, or the region field by code.
///
/// # FFI contract
/// - `field` is a stable field name; `birth_date` is rejected here.
/// - Empty `value` clears the field.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_text_field(field: String, value: String) -> ProfileResponse {
    let mut session = lock_session();
    let Some(field) = ProfileField::parse(&field) else {
        return respond(&session, false, false, format!("unknown profile field `{field}`"));
    };

    let value = match field {
        ProfileField::CurrentRegion => match parse_region(&value) {
            Ok(region) => FieldValue::Region(region),
            Err(err) => return respond(&session, false, false, err),
        },
        _ => FieldValue::Text(value),
    };
    apply_field(&mut session, field, value)
}

/// Sets the date of birth from `YYYY-MM-DD`; empty clears it.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_set_birth_date(value: String) -> ProfileResponse {
    let mut session = lock_session();
    match parse_birth_date(&value) {
        Ok(date) => apply_field(&mut session, ProfileField::BirthDate, FieldValue::Date(date)),
        Err(err) => respond(&session, false, false, err),
    }
}

/// Closes the missing-data alert.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_dismiss_alert() -> ProfileResponse {
    let mut session = lock_session();
    session.dismiss_alert();
    respond(&session, true, false, "")
}

/// One entry of the region picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionOptionItem {
    /// ISO 3166-1 alpha-2 code accepted by `profile_set_text_field`.
    pub code: String,
    pub name: String,
}

/// Lists every selectable region, ordered by display name.
///
/// The host prepends its own empty "Select Region" entry.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_region_options() -> Vec<RegionOptionItem> {
    RegionCode::picker_options()
        .iter()
        .map(|region| RegionOptionItem {
            code: region.as_str().to_string(),
            name: region.display_name().to_string(),
        })
        .collect()
}

/// Flag read response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagResponse {
    pub ok: bool,
    pub value: bool,
    pub message: String,
}

/// Reads a persisted boolean flag; unset flags read `false`.
#[flutter_rust_bridge::frb(sync)]
pub fn flag_get(key: String) -> FlagResponse {
    match with_flag_store(|store| store.get(&key)) {
        Ok(value) => FlagResponse {
            ok: true,
            value,
            message: String::new(),
        },
        Err(err) => FlagResponse {
            ok: false,
            value: false,
            message: format!("flag_get failed: {err}"),
        },
    }
}

/// Persists a boolean flag. Returns empty string on success.
#[flutter_rust_bridge::frb(sync)]
pub fn flag_set(key: String, value: bool) -> String {
    match with_flag_store(|store| store.set(&key, value)) {
        Ok(()) => String::new(),
        Err(err) => format!("flag_set failed: {err}"),
    }
}

fn lock_session() -> MutexGuard<'static, ProfileScreen> {
    // Session state stays consistent across a poisoned lock: every
    // controller transition completes before it can panic.
    PROFILE_SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn perform(session: &mut ProfileScreen, action: ToolbarAction) -> ProfileResponse {
    match session.perform(action) {
        Ok(ScreenEvent::Dismissed) => respond(session, true, true, ""),
        Ok(ScreenEvent::SaveRejected) => {
            respond(session, false, false, "Please fill out all profile fields.")
        }
        Ok(ScreenEvent::Saved(outcome)) if outcome.changed() => {
            respond(session, true, false, "Profile saved.")
        }
        Ok(_) => respond(session, true, false, ""),
        Err(err) => {
            warn!("event=ffi_profile_action module=ffi status=error action={action:?} error={err}");
            respond(session, false, false, err.to_string())
        }
    }
}

fn apply_field(
    session: &mut ProfileScreen,
    field: ProfileField,
    value: FieldValue,
) -> ProfileResponse {
    match session.set_field(field, value) {
        Ok(()) => respond(session, true, false, ""),
        Err(err) => respond(session, false, false, err.to_string()),
    }
}

fn respond(
    session: &ProfileScreen,
    ok: bool,
    dismiss: bool,
    message: impl Into<String>,
) -> ProfileResponse {
    let frame = session.frame();
    let alert = session.alert();
    ProfileResponse {
        ok,
        mode: frame.mode.as_str().to_string(),
        leading_label: frame.toolbar.leading.label.to_string(),
        trailing_label: frame.toolbar.trailing.label.to_string(),
        fields: frame
            .rows
            .into_iter()
            .map(|row| ProfileFieldItem {
                field: row.field.name().to_string(),
                title: row.title.to_string(),
                display: row.display,
                is_placeholder: row.is_placeholder,
                editable: row.editable,
            })
            .collect(),
        sections: frame
            .sections
            .iter()
            .map(|section| section.title().to_string())
            .collect(),
        alert_title: alert.map(|alert| alert.title.to_string()),
        alert_message: alert.map(|alert| alert.message.to_string()),
        missing_fields: alert
            .map(|alert| {
                alert
                    .missing
                    .iter()
                    .map(|field| field.name().to_string())
                    .collect()
            })
            .unwrap_or_default(),
        dismiss,
        message: message.into(),
    }
}

fn parse_birth_date(value: &str) -> Result<Option<NaiveDate>, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, BIRTH_DATE_WIRE_FORMAT)
        .map(Some)
        .map_err(|err| format!("birth_date must be YYYY-MM-DD: {err}"))
}

fn parse_region(value: &str) -> Result<Option<RegionCode>, String> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    RegionCode::parse(value)
        .map(Some)
        .map_err(|err| err.to_string())
}

fn resolve_settings_db_path() -> PathBuf {
    SETTINGS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("MOCKRESEARCH_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(SETTINGS_DB_FILE_NAME)
        })
        .clone()
}

fn with_flag_store<T>(
    f: impl FnOnce(&mut SqliteFlagStore<'_>) -> mockresearch_core::FlagResult<T>,
) -> Result<T, String> {
    let conn = open_db(resolve_settings_db_path())
        .map_err(|err| format!("settings DB open failed: {err}"))?;
    let mut store = SqliteFlagStore::new(&conn);
    f(&mut store).map_err(|err| err.to_string())
}
