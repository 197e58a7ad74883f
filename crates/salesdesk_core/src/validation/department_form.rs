//! Department form input.

use super::{FormInput, ValidationError, Violations};
use crate::model::department::{Department, DepartmentId};
use crate::model::Entity;

pub const FIELD_NAME: &str = "name";

/// Raw department form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    /// Identity of the row being edited; `None` creates a new department.
    pub id: Option<DepartmentId>,
    pub name: String,
}

impl DepartmentForm {
    /// Prefills the form from a stored department.
    pub fn from_department(department: &Department) -> Self {
        Self {
            id: department.id(),
            name: department.name.clone(),
        }
    }
}

impl FormInput for DepartmentForm {
    type Entity = Department;

    fn validate(&self) -> Result<Department, ValidationError> {
        let mut violations = Violations::new();
        let name = violations.require_text(FIELD_NAME, &self.name);

        violations.finish(|| {
            let name = name?;
            Some(match self.id {
                Some(id) => Department::with_id(id, name),
                None => Department::new(name),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DepartmentForm, FIELD_NAME};
    use crate::model::Entity;
    use crate::validation::{FormInput, REQUIRED_MESSAGE};

    #[test]
    fn blank_name_is_rejected() {
        let form = DepartmentForm {
            id: None,
            name: "   ".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.message(FIELD_NAME), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn valid_form_keeps_identity_and_trims_name() {
        let form = DepartmentForm {
            id: Some(4),
            name: "  Books ".to_string(),
        };
        let department = form.validate().unwrap();
        assert_eq!(department.id(), Some(4));
        assert_eq!(department.name, "Books");
    }
}
