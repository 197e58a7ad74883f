//! Edit session: validate, persist, then notify.
//!
//! One session backs one mutation dialog. It owns the subscriber list for
//! that dialog, so list views are wired per session rather than through any
//! global registry.
//!
//! # Invariants
//! - Subscribers are notified only after a successful save or remove.
//! - `submit` and `remove` take `&mut self`: a subscriber cannot start a new
//!   mutation on the session that is notifying it.

use crate::dao::Dao;
use crate::notify::{ChangeNotifier, DataChangeListener};
use crate::service::entity_service::{EntityService, ServiceError, ServiceResult};
use crate::validation::{FormInput, ValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Why a form submission was not applied.
#[derive(Debug)]
pub enum SubmitError {
    /// Form input was rejected; nothing was persisted.
    Validation(ValidationError),
    /// Input was valid but the store refused the change.
    Service(ServiceError),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ValidationError> for SubmitError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ServiceError> for SubmitError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Mutation session for one record kind.
pub struct EditSession<'a, D: Dao> {
    service: &'a EntityService<D>,
    notifier: ChangeNotifier<'a>,
}

impl<'a, D: Dao> EditSession<'a, D> {
    pub fn new(service: &'a EntityService<D>) -> Self {
        Self {
            service,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Registers a view to refresh after each successful mutation.
    pub fn subscribe(&mut self, listener: Rc<dyn DataChangeListener + 'a>) {
        self.notifier.subscribe(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.notifier.len()
    }

    /// Validates `form`, saves the record and notifies subscribers.
    ///
    /// Returns the saved record, carrying its identity.
    ///
    /// # Errors
    /// - `Validation` with every field violation; the store is not touched.
    /// - `Service` when persistence fails.
    ///
    /// No subscriber is notified on error.
    pub fn submit<F>(&mut self, form: &F) -> Result<D::Entity, SubmitError>
    where
        F: FormInput<Entity = D::Entity>,
    {
        let mut entity = form.validate()?;
        self.service.save_or_update(&mut entity)?;
        self.notifier.notify_all();
        Ok(entity)
    }

    /// Removes a persisted record and notifies subscribers.
    pub fn remove(&mut self, entity: &D::Entity) -> ServiceResult<()> {
        self.service.remove(entity)?;
        self.notifier.notify_all();
        Ok(())
    }
}

