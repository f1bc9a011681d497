//! Employee persistence.
//!
//! The service layer only talks to [`EmployeeStore`]; the MySQL and
//! in-memory adapters are picked at startup.

pub mod memory;
pub mod mysql;
pub mod record;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use memory::InMemoryEmployeeStore;
pub use mysql::MySqlEmployeeStore;
pub use record::EmployeeRecord;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Query contract over stored employee records.
///
/// `find_by_*_after` use a strict comparison: a record hired exactly on
/// `date` is not returned.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, StoreError>;

    async fn find_by_department(&self, department: &str)
        -> Result<Vec<EmployeeRecord>, StoreError>;

    async fn find_by_employment_date_after(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError>;

    async fn find_by_department_and_employment_date_after(
        &self,
        department: &str,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<EmployeeRecord>, StoreError>;

    async fn exists_by_id(&self, id: u64) -> Result<bool, StoreError>;

    /// Inserts the record and returns it with the assigned id.
    async fn save(&self, record: EmployeeRecord) -> Result<EmployeeRecord, StoreError>;

    /// Missing ids are a no-op.
    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;
}
