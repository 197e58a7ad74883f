//! Seller form input.
//!
//! Text inputs arrive as raw strings so unparsable content can be reported
//! per field instead of being rejected by the caller.

use super::{parse_decimal, FormInput, ValidationError, Violations};
use crate::model::department::DepartmentId;
use crate::model::seller::{Seller, SellerId};
use crate::model::Entity;
use chrono::NaiveDate;

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_BIRTH_DATE: &str = "birthDate";
pub const FIELD_BASE_SALARY: &str = "baseSalary";
pub const FIELD_DEPARTMENT: &str = "department";

/// Display format of birth dates in forms.
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw seller form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellerForm {
    /// Identity of the row being edited; `None` creates a new seller.
    pub id: Option<SellerId>,
    pub name: String,
    pub email: String,
    /// `dd/mm/yyyy` or ISO `yyyy-mm-dd`.
    pub birth_date: String,
    pub base_salary: String,
    pub department_id: Option<DepartmentId>,
}

impl SellerForm {
    /// Prefills the form from a stored seller.
    pub fn from_seller(seller: &Seller) -> Self {
        Self {
            id: seller.id(),
            name: seller.name.clone(),
            email: seller.email.clone(),
            birth_date: seller.birth_date.format(BIRTH_DATE_FORMAT).to_string(),
            base_salary: format!("{:.2}", seller.base_salary),
            department_id: Some(seller.department_id),
        }
    }
}

impl FormInput for SellerForm {
    type Entity = Seller;

    fn validate(&self) -> Result<Seller, ValidationError> {
        let mut violations = Violations::new();

        let name = violations.require_text(FIELD_NAME, &self.name);
        let email = violations.require_text(FIELD_EMAIL, &self.email);
        let birth_date = violations.require_parsed(
            FIELD_BIRTH_DATE,
            &self.birth_date,
            "Invalid date, expected dd/mm/yyyy",
            parse_form_date,
        );
        let base_salary = violations.require_parsed(
            FIELD_BASE_SALARY,
            &self.base_salary,
            "Invalid number",
            parse_decimal,
        );
        let department_id = violations.require_some(FIELD_DEPARTMENT, self.department_id);

        violations.finish(|| {
            let seller = Seller::new(name?, email?, birth_date?, base_salary?, department_id?);
            Some(match self.id {
                Some(id) => seller.with_id(id),
                None => seller,
            })
        })
    }
}

fn parse_form_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, BIRTH_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, ISO_DATE_FORMAT))
        .ok()
}
