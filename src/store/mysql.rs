use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::MySqlPool;
use tracing::debug;

use super::{EmployeeRecord, EmployeeStore, StoreError};

const SELECT_EMPLOYEES: &str =
    "SELECT id, name, department, year_of_employment FROM employees";

pub struct MySqlEmployeeStore {
    pool: MySqlPool,
}

impl MySqlEmployeeStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_where(
        &self,
        clause: &str,
        department: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        let sql = format!("{SELECT_EMPLOYEES} {clause} ORDER BY id");
        debug!(sql = %sql, ?department, ?date, "Fetching employees");

        let mut query = sqlx::query_as::<_, EmployeeRecord>(&sql);
        if let Some(department) = department {
            query = query.bind(department);
        }
        if let Some(date) = date {
            query = query.bind(date);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl EmployeeStore for MySqlEmployeeStore {
    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.fetch_where("", None, None).await
    }

    async fn find_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.fetch_where("WHERE department = ?", Some(department), None)
            .await
    }

    async fn find_by_employment_date_after(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.fetch_where("WHERE year_of_employment > ?", None, Some(date))
            .await
    }

    async fn find_by_department_and_employment_date_after(
        &self,
        department: &str,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.fetch_where(
            "WHERE department = ? AND year_of_employment > ?",
            Some(department),
            Some(date),
        )
        .await
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<EmployeeRecord>, StoreError> {
        let sql = format!("{SELECT_EMPLOYEES} WHERE id = ?");
        let record = sqlx::query_as::<_, EmployeeRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn exists_by_id(&self, id: u64) -> Result<bool, StoreError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(total > 0)
    }

    async fn save(&self, record: EmployeeRecord) -> Result<EmployeeRecord, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, department, year_of_employment)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&record.name)
        .bind(&record.department)
        .bind(record.year_of_employment)
        .execute(&self.pool)
        .await?;

        Ok(EmployeeRecord {
            id: Some(result.last_insert_id()),
            ..record
        })
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, rows = result.rows_affected(), "Deleted employee rows");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    const CREATE_EMPLOYEES: &str =
        include_str!("../../migrations/20240101000000_create_employees.sql");

    #[test]
    fn department_column_compares_exactly() {
        assert!(CREATE_EMPLOYEES.contains("department VARCHAR(255) COLLATE utf8mb4_bin NOT NULL"));
    }
}
