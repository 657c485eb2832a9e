use mockresearch_core::db::{latest_version, open_db, open_db_in_memory, schema_version, DbError};
use mockresearch_core::{FlagStore, FlagStoreError, SqliteFlagStore, HEALTH_STUDY_CARD_DISMISSED};
use rusqlite::{Connection, ErrorCode};

#[test]
fn unset_flag_reads_false() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteFlagStore::new(&conn);
    assert!(!store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());
}

#[test]
fn set_overwrites_existing_value() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteFlagStore::new(&conn);

    store.set(HEALTH_STUDY_CARD_DISMISSED, true).unwrap();
    assert!(store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());

    store.set(HEALTH_STUDY_CARD_DISMISSED, false).unwrap();
    assert!(!store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM flags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn upsert_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteFlagStore::new(&conn);
    store.set(HEALTH_STUDY_CARD_DISMISSED, false).unwrap();
    conn.execute(
        "UPDATE flags SET updated_at = 0 WHERE key = ?1",
        [HEALTH_STUDY_CARD_DISMISSED],
    )
    .unwrap();

    store.set(HEALTH_STUDY_CARD_DISMISSED, true).unwrap();

    let (value, updated_at): (i64, i64) = conn
        .query_row(
            "SELECT value, updated_at FROM flags WHERE key = ?1",
            [HEALTH_STUDY_CARD_DISMISSED],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(value, 1);
    assert!(updated_at > 0, "updated_at was not refreshed");
}

#[test]
fn flag_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = SqliteFlagStore::new(&conn);
        store.set(HEALTH_STUDY_CARD_DISMISSED, true).unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let store = SqliteFlagStore::new(&conn);
    assert!(store.get(HEALTH_STUDY_CARD_DISMISSED).unwrap());
    assert!(!store.get("unrelatedFlag").unwrap());
}

#[test]
fn blank_key_is_rejected_before_touching_storage() {
    let conn = open_db_in_memory().unwrap();
    let mut store = SqliteFlagStore::new(&conn);

    let err = store.set(" ", true).unwrap_err();
    assert!(matches!(err, FlagStoreError::InvalidKey(_)));
    let err = store.get("").unwrap_err();
    assert!(matches!(err, FlagStoreError::InvalidKey(_)));
}

#[test]
fn flags_table_rejects_blank_keys_and_non_boolean_values() {
    let conn = open_db_in_memory().unwrap();

    let blank_key = conn
        .execute("INSERT INTO flags (key, value) VALUES ('   ', 1)", [])
        .unwrap_err();
    assert_eq!(
        blank_key.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    );

    let not_boolean = conn
        .execute("INSERT INTO flags (key, value) VALUES ('someFlag', 2)", [])
        .unwrap_err();
    assert_eq!(
        not_boolean.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    );

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM flags", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn settings_file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 7;")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 7);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn conflicting_flags_table_fails_migration_without_bumping_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foreign.db");
    Connection::open(&path)
        .unwrap()
        .execute_batch("CREATE TABLE flags (key TEXT);")
        .unwrap();

    match open_db(&path).unwrap_err() {
        DbError::Migration { version, name, .. } => {
            assert_eq!((version, name), (1, "flags"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 0);
}
