use rusqlite::Connection;
use salesdesk_core::db::migrations::{apply_migrations, latest_version};
use salesdesk_core::db::{open_db, open_db_in_memory, open_store, DbError};
use salesdesk_core::StoreConfig;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "department");
    assert_table_exists(&conn, "seller");
}

#[test]
fn foreign_keys_are_enforced() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("salesdesk.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO department (name) VALUES ('Sales');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_store(&StoreConfig::File { path }).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM department;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn migrating_without_foreign_keys_is_rejected() {
    let mut conn = Connection::open_in_memory().unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::ForeignKeysDisabled), "unexpected error: {err}");
}

#[test]
fn opening_database_with_orphaned_seller_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orphan.sqlite3");
    drop(open_db(&path).unwrap());

    // A plain connection does not enforce foreign keys.
    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO seller (name, email, birth_date, base_salary, department_id)
         VALUES ('A', 'a@example.com', '1990-01-15', 1.0, 404);",
        [],
    )
    .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(err, DbError::OrphanedRows { count: 1 }),
        "unexpected error: {err}"
    );
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
