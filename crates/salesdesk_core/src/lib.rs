//! Persistence and service core for department and seller records.
//!
//! Layers, leaf first: `model` records, `validation` of raw form input,
//! `dao` storage access, `service` business rules, and `notify`/`session`
//! for telling list views that data changed.

pub mod config;
pub mod dao;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod service;
pub mod session;
pub mod validation;

pub use config::{ConfigError, CoreConfig, StoreConfig};
pub use dao::department_dao::SqliteDepartmentDao;
pub use dao::factory::DaoFactory;
pub use dao::seller_dao::SqliteSellerDao;
pub use dao::{Dao, DaoError, DaoResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::{Department, DepartmentId};
pub use model::seller::{Seller, SellerId};
pub use model::Entity;
pub use notify::{ChangeNotifier, DataChangeListener, RecordList};
pub use service::entity_service::{
    DepartmentService, EntityService, SellerService, ServiceError, ServiceResult,
};
pub use session::{EditSession, SubmitError};
pub use validation::department_form::DepartmentForm;
pub use validation::seller_form::SellerForm;
pub use validation::{FormInput, ValidationError, Violations};

/// Minimal health-check API for collaborator wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
