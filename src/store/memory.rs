use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{EmployeeRecord, EmployeeStore, StoreError};

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    records: BTreeMap<u64, EmployeeRecord>,
}

/// Process-local store keyed by id, iterated in id order.
#[derive(Debug, Default)]
pub struct InMemoryEmployeeStore {
    state: RwLock<State>,
}

impl InMemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("employee store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("employee store lock poisoned".to_string()))
    }

    fn select<F>(&self, predicate: F) -> Result<Vec<EmployeeRecord>, StoreError>
    where
        F: Fn(&EmployeeRecord) -> bool,
    {
        Ok(self
            .read()?
            .records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn find_all(&self) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.select(|_| true)
    }

    async fn find_by_department(
        &self,
        department: &str,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.select(|record| record.department == department)
    }

    async fn find_by_employment_date_after(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.select(|record| record.year_of_employment > date)
    }

    async fn find_by_department_and_employment_date_after(
        &self,
        department: &str,
        date: NaiveDate,
    ) -> Result<Vec<EmployeeRecord>, StoreError> {
        self.select(|record| record.department == department && record.year_of_employment > date)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<EmployeeRecord>, StoreError> {
        Ok(self.read()?.records.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: u64) -> Result<bool, StoreError> {
        Ok(self.read()?.records.contains_key(&id))
    }

    async fn save(&self, record: EmployeeRecord) -> Result<EmployeeRecord, StoreError> {
        let mut state = self.write()?;
        state.last_id += 1;
        let id = state.last_id;
        let saved = EmployeeRecord {
            id: Some(id),
            ..record
        };
        state.records.insert(id, saved.clone());
        Ok(saved)
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        self.write()?.records.remove(&id);
        Ok(())
    }
}
