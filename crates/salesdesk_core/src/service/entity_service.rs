//! Generic record service over one DAO.
//!
//! # Responsibility
//! - Apply the save rule: no identity inserts, identity updates.
//! - Surface referential delete failures separately from other storage
//!   failures.
//!
//! # Invariants
//! - The service holds no state besides its DAO.
//! - A failed call never leaves a partial mutation behind.
//! - Failures are returned to the caller, never retried.

use crate::dao::department_dao::SqliteDepartmentDao;
use crate::dao::seller_dao::SqliteSellerDao;
use crate::dao::{Dao, DaoError};
use crate::model::Entity;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Delete refused because other records reference this one.
    Integrity(String),
    /// Any other persistence failure, carrying the DAO message unchanged.
    Persistence(DaoError),
    /// `remove` was called on a record that was never persisted.
    ///
    /// This is a caller bug, not a user-recoverable condition.
    MissingIdentity { kind: &'static str },
}

impl ServiceError {
    /// Returns whether the targeted record no longer exists in the store.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Persistence(DaoError::NotFound { .. }))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integrity(message) => write!(f, "{message}"),
            Self::Persistence(err) => write!(f, "{err}"),
            Self::MissingIdentity { kind } => {
                write!(f, "cannot remove {kind} without identity")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persistence(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DaoError> for ServiceError {
    fn from(value: DaoError) -> Self {
        match value {
            DaoError::Integrity(message) => Self::Integrity(message),
            other => Self::Persistence(other),
        }
    }
}

/// Use-case service for one record kind.
pub struct EntityService<D: Dao> {
    dao: D,
}

pub type DepartmentService<'conn> = EntityService<SqliteDepartmentDao<'conn>>;
pub type SellerService<'conn> = EntityService<SqliteSellerDao<'conn>>;

impl<D: Dao> EntityService<D> {
    /// Creates a service bound to one DAO implementation.
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    /// Returns the DAO for kind-specific queries.
    pub fn dao(&self) -> &D {
        &self.dao
    }

    /// Lists all records ordered by identity ascending.
    pub fn find_all(&self) -> ServiceResult<Vec<D::Entity>> {
        Ok(self.dao.find_all()?)
    }

    pub fn find_by_key(&self, id: i64) -> ServiceResult<Option<D::Entity>> {
        Ok(self.dao.find_by_key(id)?)
    }

    /// Inserts a record without identity, or updates one that has it.
    ///
    /// # Contract
    /// - After a successful insert, `entity.id()` holds the generated id.
    /// - After a successful update, the record count is unchanged.
    ///
    /// # Errors
    /// - `Persistence` for any DAO failure, including a stale identity.
    pub fn save_or_update(&self, entity: &mut D::Entity) -> ServiceResult<()> {
        let started_at = Instant::now();
        let kind = <D::Entity as Entity>::KIND;

        let result = match entity.id() {
            None => self.insert(entity).map(|id| ("insert", id)),
            Some(id) => self.dao.update(entity).map(|()| ("update", id)),
        };

        match result {
            Ok((mode, id)) => {
                info!(
                    "event=entity_save module=service status=ok entity={kind} mode={mode} id={id} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=entity_save module=service status=error entity={kind} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(ServiceError::Persistence(err))
            }
        }
    }

    /// Deletes a persisted record.
    ///
    /// # Errors
    /// - `MissingIdentity` when `entity` was never saved.
    /// - `Integrity` when other records still reference it; nothing is
    ///   deleted.
    /// - `Persistence` for other failures, including a stale identity.
    pub fn remove(&self, entity: &D::Entity) -> ServiceResult<()> {
        let kind = <D::Entity as Entity>::KIND;
        let Some(id) = entity.id() else {
            error!(
                "event=entity_remove module=service status=error entity={kind} error_code=missing_identity"
            );
            return Err(ServiceError::MissingIdentity { kind });
        };

        match self.dao.delete_by_key(id) {
            Ok(()) => {
                info!("event=entity_remove module=service status=ok entity={kind} id={id}");
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=entity_remove module=service status=error entity={kind} id={id} error={err}"
                );
                Err(err.into())
            }
        }
    }

    fn insert(&self, entity: &mut D::Entity) -> Result<i64, DaoError> {
        let id = self.dao.insert(entity)?;
        entity
            .assign_id(id)
            .map_err(|existing| DaoError::IdentityAlreadySet {
                kind: <D::Entity as Entity>::KIND,
                id: existing,
            })?;
        Ok(id)
    }
}
