use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use super::validation::{FieldError, ValidationError};

const CONTAIN_LETTERS_MESSAGE: &str = "Field must contain only letters";
const NOT_BLANK_MESSAGE: &str = "must not be blank";
const DATE_REQUIRED_MESSAGE: &str = "Date cannot be null or empty";
const DATE_IN_FUTURE_MESSAGE: &str = "Date of employment cannot be in the future";

/// Public representation of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "John Doe",
        "department": "Engineering",
        "employment_date": "2020-01-01"
    })
)]
pub struct Employee {
    /// Assigned by the store; never supplied on creation.
    #[schema(example = 1, nullable = true)]
    pub id: Option<u64>,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = "Engineering")]
    pub department: String,

    #[schema(example = "2020-01-01", value_type = String, format = "date")]
    pub employment_date: NaiveDate,
}

/// An employee that passed the creation checks and has no id yet.
///
/// The only way to obtain one is [`NewEmployee::new`], so every value that
/// reaches the store satisfies the name, department and date invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    name: String,
    department: String,
    employment_date: NaiveDate,
}

impl NewEmployee {
    /// Checks every field against `today` and reports all failures at once.
    pub fn new(
        name: impl Into<String>,
        department: impl Into<String>,
        employment_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let department = department.into();
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(FieldError::new("name", NOT_BLANK_MESSAGE));
        } else if !is_letters_only(&name) {
            errors.push(FieldError::new("name", CONTAIN_LETTERS_MESSAGE));
        }

        if department.trim().is_empty() {
            errors.push(FieldError::new("department", NOT_BLANK_MESSAGE));
        }

        match employment_date {
            None => errors.push(FieldError::new("employment_date", DATE_REQUIRED_MESSAGE)),
            Some(date) if date > today => {
                errors.push(FieldError::new("employment_date", DATE_IN_FUTURE_MESSAGE))
            }
            Some(_) => {}
        }

        match employment_date {
            Some(employment_date) if errors.is_empty() => Ok(Self {
                name,
                department,
                employment_date,
            }),
            _ => Err(ValidationError::new(errors)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn employment_date(&self) -> NaiveDate {
        self.employment_date
    }
}

impl From<NewEmployee> for Employee {
    fn from(value: NewEmployee) -> Self {
        Employee {
            id: None,
            name: value.name,
            department: value.department,
            employment_date: value.employment_date,
        }
    }
}

// [A-Za-z\s-]+ where \s is ASCII only, vertical tab included
fn is_letters_only(value: &str) -> bool {
    value.chars().all(|c| {
        c.is_ascii_alphabetic() || c.is_ascii_whitespace() || c == '\x0B' || c == '-'
    })
}
