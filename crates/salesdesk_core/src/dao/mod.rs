//! Data access contracts and SQLite implementations.
//!
//! # Responsibility
//! - Hide SQL behind one CRUD contract per record kind.
//! - Report semantic failures (`NotFound`, `Integrity`) separately from
//!   transport failures.
//!
//! # Invariants
//! - `find_all` is ordered by identity ascending.
//! - Every write runs in its own transaction; a failed call leaves the store
//!   unchanged.
//! - `Entity::validate` guards both directions: a record that fails it is
//!   never written, and a stored row that fails it is reported as
//!   `InvalidData`.

pub mod department_dao;
pub mod factory;
pub mod seller_dao;

use crate::db::DbError;
use crate::model::{Entity, RecordError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DaoResult<T> = Result<T, DaoError>;

/// Failure of one DAO call.
#[derive(Debug)]
pub enum DaoError {
    /// Connectivity, constraint or other backend failure.
    Storage(DbError),
    /// No stored row has this identity.
    NotFound { kind: &'static str, id: i64 },
    /// Delete refused because other rows still reference the key.
    Integrity(String),
    /// `insert` was given a record that already has an identity.
    IdentityAlreadySet { kind: &'static str, id: i64 },
    /// `update` was given a record that was never persisted.
    MissingIdentity { kind: &'static str },
    /// A record breaks a field invariant, on its way in or out of the store.
    InvalidData(String),
}

impl Display for DaoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Integrity(message) => write!(f, "{message}"),
            Self::IdentityAlreadySet { kind, id } => {
                write!(f, "{kind} already has identity {id}; use update")
            }
            Self::MissingIdentity { kind } => write!(f, "{kind} has no identity; use insert"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
        }
    }
}

impl Error for DaoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for DaoError {
    fn from(value: DbError) -> Self {
        Self::Storage(value)
    }
}

impl From<RecordError> for DaoError {
    fn from(value: RecordError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

impl From<rusqlite::Error> for DaoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// CRUD contract for one record kind.
pub trait Dao {
    type Entity: Entity<Id = i64>;

    /// Persists a new record and returns the generated identity.
    fn insert(&self, entity: &Self::Entity) -> DaoResult<i64>;
    /// Overwrites the stored row with the same identity.
    fn update(&self, entity: &Self::Entity) -> DaoResult<()>;
    fn delete_by_key(&self, id: i64) -> DaoResult<()>;
    fn find_by_key(&self, id: i64) -> DaoResult<Option<Self::Entity>>;
    /// Lists every stored record ordered by identity ascending.
    fn find_all(&self) -> DaoResult<Vec<Self::Entity>>;
}

/// Write-path check for `insert`: no identity, valid fields.
pub(crate) fn require_unsaved<E: Entity<Id = i64>>(entity: &E) -> DaoResult<()> {
    if let Some(id) = entity.id() {
        return Err(DaoError::IdentityAlreadySet { kind: E::KIND, id });
    }
    entity.validate()?;
    Ok(())
}

/// Write-path check for `update`: identity present, valid fields.
pub(crate) fn require_saved<E: Entity<Id = i64>>(entity: &E) -> DaoResult<i64> {
    let id = entity
        .id()
        .ok_or(DaoError::MissingIdentity { kind: E::KIND })?;
    entity.validate()?;
    Ok(id)
}

/// Read-path check for a row rebuilt from storage.
pub(crate) fn checked_row<E: Entity<Id = i64>>(entity: E) -> DaoResult<E> {
    entity.validate().map_err(|err| {
        let id = entity
            .id()
            .map_or_else(|| "?".to_string(), |id| id.to_string());
        DaoError::InvalidData(format!("{err} in stored row {id}"))
    })?;
    Ok(entity)
}

/// Maps a failed `DELETE` to `Integrity` when a foreign key blocked it.
pub(crate) fn classify_delete_error(
    kind: &'static str,
    id: i64,
    err: rusqlite::Error,
) -> DaoError {
    let err = DbError::Sqlite(err);
    if err.is_foreign_key_violation() {
        DaoError::Integrity(format!(
            "cannot delete {kind} {id}: it is still referenced by other records"
        ))
    } else {
        DaoError::Storage(err)
    }
}
