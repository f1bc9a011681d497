use chrono::NaiveDate;
use sqlx::FromRow;

/// Storage-layer shape of an employee, one row of the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct EmployeeRecord {
    pub id: Option<u64>, // BIGINT UNSIGNED, None until saved
    pub name: String,
    pub department: String,
    pub year_of_employment: NaiveDate,
}
