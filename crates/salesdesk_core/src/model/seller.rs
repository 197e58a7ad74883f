//! Seller record.
//!
//! # Invariants
//! - `department_id` must reference a stored department; the store rejects
//!   the row otherwise.

use super::department::DepartmentId;
use super::{assign_once, require_filled, Entity, RecordError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-generated seller key.
pub type SellerId = i64;

/// Salesperson assigned to exactly one department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    id: Option<SellerId>,
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub base_salary: f64,
    pub department_id: DepartmentId,
}

impl Seller {
    /// Creates an unsaved seller.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        birth_date: NaiveDate,
        base_salary: f64,
        department_id: DepartmentId,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            birth_date,
            base_salary,
            department_id,
        }
    }

    /// Returns this seller carrying a known stored identity.
    ///
    /// Used when rebuilding rows read from the store or edited in a form.
    pub fn with_id(mut self, id: SellerId) -> Self {
        self.id = Some(id);
        self
    }
}

impl Entity for Seller {
    type Id = SellerId;

    const KIND: &'static str = "seller";

    fn id(&self) -> Option<SellerId> {
        self.id
    }

    fn assign_id(&mut self, id: SellerId) -> Result<(), SellerId> {
        assign_once(&mut self.id, id)
    }

    fn validate(&self) -> Result<(), RecordError> {
        require_filled(Self::KIND, "name", &self.name)?;
        require_filled(Self::KIND, "email", &self.email)?;
        if !self.base_salary.is_finite() {
            return Err(RecordError::NonFiniteValue {
                kind: Self::KIND,
                field: "baseSalary",
            });
        }
        Ok(())
    }
}
