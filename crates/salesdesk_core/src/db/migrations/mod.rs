//! Schema migrations for the department/seller store.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - All pending migrations commit in one transaction or not at all.
//! - A store is only handed out when foreign keys are enforced and no seller
//!   row points at a missing department.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        sql: include_str!("0001_departments.sql"),
    },
    Migration {
        version: 2,
        sql: include_str!("0002_sellers.sql"),
    },
];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the schema up to date, then verifies referential integrity.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `ForeignKeysDisabled` when the connection does not enforce foreign keys.
/// - `OrphanedRows` when existing rows reference missing parents.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from = schema_version(conn)?;
    let latest = latest_version();
    if from > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from,
            latest_supported: latest,
        });
    }

    if from < latest {
        let tx = conn.transaction()?;
        for migration in MIGRATIONS.iter().skip_while(|m| m.version <= from) {
            tx.execute_batch(migration.sql)?;
            tx.pragma_update(None, "user_version", migration.version)?;
        }
        tx.commit()?;
        info!("event=db_migrate module=db status=ok from={from} to={latest}");
    }

    verify_referential_integrity(conn)
}

/// Checks that seller rows can rely on their department references.
pub fn verify_referential_integrity(conn: &Connection) -> DbResult<()> {
    let enforced: bool = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if !enforced {
        error!("event=db_integrity module=db status=error error_code=foreign_keys_off");
        return Err(DbError::ForeignKeysDisabled);
    }

    let mut stmt = conn.prepare("PRAGMA foreign_key_check;")?;
    let mut rows = stmt.query([])?;
    let mut orphaned = 0_usize;
    while rows.next()?.is_some() {
        orphaned += 1;
    }
    if orphaned > 0 {
        error!("event=db_integrity module=db status=error error_code=orphaned_rows count={orphaned}");
        return Err(DbError::OrphanedRows { count: orphaned });
    }

    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}
