//! Department record.

use super::{assign_once, require_filled, Entity, RecordError};
use serde::{Deserialize, Serialize};

/// Store-generated department key.
pub type DepartmentId = i64;

/// Organizational unit that sellers belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    id: Option<DepartmentId>,
    pub name: String,
}

impl Department {
    /// Creates an unsaved department.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Creates a department that mirrors an existing stored row.
    pub fn with_id(id: DepartmentId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

impl Entity for Department {
    type Id = DepartmentId;

    const KIND: &'static str = "department";

    fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    fn assign_id(&mut self, id: DepartmentId) -> Result<(), DepartmentId> {
        assign_once(&mut self.id, id)
    }

    fn validate(&self) -> Result<(), RecordError> {
        require_filled(Self::KIND, "name", &self.name)
    }
}
