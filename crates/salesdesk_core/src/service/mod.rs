//! Record use-case services.
//!
//! # Responsibility
//! - Decide insert versus update from record identity.
//! - Translate DAO failures into the errors callers present to users.

pub mod entity_service;
