//! Boolean flag store contracts and implementations.
//!
//! # Responsibility
//! - Expose a narrow `get/set(key) -> bool` capability to view layers.
//! - Provide in-memory and SQLite-backed stores.
//!
//! # Invariants
//! - Keys are trimmed; empty keys are rejected before any storage access.
//! - A missing key reads as `false`.

use crate::db::DbError;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Set once the user dismisses the health study card on the tasks tab.
pub const HEALTH_STUDY_CARD_DISMISSED: &str = "hasDismissedHealthStudyCard";

pub type FlagResult<T> = Result<T, FlagStoreError>;

/// Flag store errors.
#[derive(Debug)]
pub enum FlagStoreError {
    InvalidKey(String),
    Db(DbError),
}

impl Display for FlagStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey(key) => write!(f, "invalid flag key: `{key}`"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FlagStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidKey(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for FlagStoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for FlagStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value capability for persisted boolean flags.
pub trait FlagStore {
    fn get(&self, key: &str) -> FlagResult<bool>;
    fn set(&mut self, key: &str, value: bool) -> FlagResult<()>;
}

/// Process-local flag store. Values are lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlagStore {
    values: HashMap<String, bool>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlagStore {
    fn get(&self, key: &str) -> FlagResult<bool> {
        let key = normalize_key(key)?;
        Ok(self.values.get(key).copied().unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> FlagResult<()> {
        let key = normalize_key(key)?;
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// SQLite-backed flag store over the `flags` table.
///
/// The connection must come from `open_db` / `open_db_in_memory` so the
/// schema is migrated.
pub struct SqliteFlagStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFlagStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FlagStore for SqliteFlagStore<'_> {
    fn get(&self, key: &str) -> FlagResult<bool> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row("SELECT value FROM flags WHERE key = ?1", [key], |row| {
                row.get::<_, bool>(0)
            })
            .optional()?;
        Ok(value.unwrap_or(false))
    }

    fn set(&mut self, key: &str, value: bool) -> FlagResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO flags (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CAST(strftime('%s', 'now') AS INTEGER) * 1000",
            params![key, value],
        )?;
        debug!("event=flag_set module=settings status=ok key={key} value={value}");
        Ok(())
    }
}

fn normalize_key(key: &str) -> FlagResult<&str> {
    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(FlagStoreError::InvalidKey(key.to_string()));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{FlagStore, FlagStoreError, MemoryFlagStore, HEALTH_STUDY_CARD_DISMISSED};

    #[test]
    fn memory_store_defaults_to_false_and_overwrites() {
        let mut store = MemoryFlagStore::new();
        assert!(!store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());

        store.set(HEALTH_STUDY_CARD_DISMISSED, true).unwrap();
        assert!(store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());

        store.set(HEALTH_STUDY_CARD_DISMISSED, false).unwrap();
        assert!(!store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());
    }

    #[test]
    fn memory_store_trims_keys() {
        let mut store = MemoryFlagStore::new();
        store.set("  seen_intro ", true).unwrap();
        assert!(store.get("seen_intro").unwrap());
    }

    #[test]
    fn empty_key_is_rejected() {
        let mut store = MemoryFlagStore::new();
        let err = store.set("   ", true).expect_err("blank key must fail");
        assert!(matches!(err, FlagStoreError::InvalidKey(_)));
    }
}
