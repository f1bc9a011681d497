use std::sync::Arc;

use chrono::NaiveDate;
use strum_macros::IntoStaticStr;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::export::{self, ExportFormat, ExportSink};
use crate::mapper::EmployeeMapper;
use crate::model::employee::{Employee, NewEmployee};
use crate::store::{EmployeeRecord, EmployeeStore};

/// Optional predicates for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    /// Exclusive lower bound on the employment date.
    pub employed_after: Option<NaiveDate>,
}

impl EmployeeFilter {
    pub fn new(department: Option<String>, employed_after: Option<NaiveDate>) -> Self {
        Self {
            department,
            employed_after,
        }
    }

    pub fn query(&self) -> FilterQuery<'_> {
        match (self.department.as_deref(), self.employed_after) {
            (Some(department), Some(date)) => FilterQuery::DepartmentAndEmployedAfter(department, date),
            (Some(department), None) => FilterQuery::Department(department),
            (None, Some(date)) => FilterQuery::EmployedAfter(date),
            (None, None) => FilterQuery::All,
        }
    }
}

/// The store query a filter resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum FilterQuery<'a> {
    DepartmentAndEmployedAfter(&'a str, NaiveDate),
    Department(&'a str),
    EmployedAfter(NaiveDate),
    All,
}

pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
    mapper: Arc<dyn EmployeeMapper>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>, mapper: Arc<dyn EmployeeMapper>) -> Self {
        Self { store, mapper }
    }

    pub async fn get_employee_by_id(&self, id: u64) -> Result<Employee, ServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|record| self.mapper.to_employee(record))
            .ok_or(ServiceError::NotFound { id })
    }

    /// Runs the one store query matching the filter. No match is not an error.
    pub async fn get_employees(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, ServiceError> {
        let query = filter.query();
        let records = match query {
            FilterQuery::DepartmentAndEmployedAfter(department, date) => {
                self.store
                    .find_by_department_and_employment_date_after(department, date)
                    .await?
            }
            FilterQuery::Department(department) => {
                self.store.find_by_department(department).await?
            }
            FilterQuery::EmployedAfter(date) => {
                self.store.find_by_employment_date_after(date).await?
            }
            FilterQuery::All => self.store.find_all().await?,
        };

        let strategy: &'static str = query.into();
        info!(strategy, count = records.len(), "Resolved employee filter");

        Ok(self.to_employees(records))
    }

    pub async fn add_employee(&self, employee: NewEmployee) -> Result<Employee, ServiceError> {
        debug!(
            name = employee.name(),
            department = employee.department(),
            employment_date = %employee.employment_date(),
            "Saving employee"
        );
        let record = self.mapper.to_record(employee.into());
        let saved = self.store.save(record).await?;
        info!(employee_id = ?saved.id, "Employee saved");

        Ok(self.mapper.to_employee(saved))
    }

    /// Forwards the delete; a missing id is not an error here.
    pub async fn delete_employee(&self, id: u64) -> Result<(), ServiceError> {
        self.store.delete_by_id(id).await?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    pub async fn exists_by_id(&self, id: u64) -> Result<bool, ServiceError> {
        Ok(self.store.exists_by_id(id).await?)
    }

    pub fn export_employees(
        &self,
        format: ExportFormat,
        employees: &[Employee],
        sink: &mut dyn ExportSink,
    ) -> Result<(), ServiceError> {
        export::export(format, employees, sink)?;
        info!(%format, count = employees.len(), "Employees exported");
        Ok(())
    }

    fn to_employees(&self, records: Vec<EmployeeRecord>) -> Vec<Employee> {
        records
            .into_iter()
            .map(|record| self.mapper.to_employee(record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::BufferSink;
    use crate::mapper::RecordMapper;
    use crate::store::InMemoryEmployeeStore;

    fn date(value: &str) -> NaiveDate {
        value.parse().unwrap()
    }

    fn service() -> EmployeeService {
        EmployeeService::new(
            Arc::new(InMemoryEmployeeStore::new()),
            Arc::new(RecordMapper),
        )
    }

    async fn seed(service: &EmployeeService, name: &str, department: &str, hired: &str) -> Employee {
        let employee =
            NewEmployee::new(name, department, Some(date(hired)), date("2024-01-01")).unwrap();
        service.add_employee(employee).await.unwrap()
    }

    async fn seeded() -> EmployeeService {
        let service = service();
        seed(&service, "Alice", "Engineering", "2020-01-01").await;
        seed(&service, "Bob", "HR", "2021-01-01").await;
        seed(&service, "Carol", "Engineering", "2021-01-01").await;
        service
    }

    fn names(employees: &[Employee]) -> Vec<&str> {
        employees.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn filter_picks_query_variant() {
        let after = date("2020-01-01");

        assert_eq!(
            EmployeeFilter::new(Some("HR".into()), Some(after)).query(),
            FilterQuery::DepartmentAndEmployedAfter("HR", after)
        );
        assert_eq!(
            EmployeeFilter::new(Some("HR".into()), None).query(),
            FilterQuery::Department("HR")
        );
        assert_eq!(
            EmployeeFilter::new(None, Some(after)).query(),
            FilterQuery::EmployedAfter(after)
        );
        assert_eq!(EmployeeFilter::default().query(), FilterQuery::All);

        let label: &'static str = FilterQuery::All.into();
        assert_eq!(label, "all");
    }

    #[actix_web::test]
    async fn department_and_date_is_a_conjunction() {
        let service = seeded().await;

        let filter = EmployeeFilter::new(Some("Engineering".into()), Some(date("2020-01-01")));
        let found = service.get_employees(&filter).await.unwrap();

        assert_eq!(names(&found), vec!["Carol"]);
        assert_eq!(found[0].id, Some(3));
    }

    #[actix_web::test]
    async fn department_only_ignores_date() {
        let service = seeded().await;

        let filter = EmployeeFilter::new(Some("Engineering".into()), None);
        let found = service.get_employees(&filter).await.unwrap();

        assert_eq!(names(&found), vec!["Alice", "Carol"]);
    }

    #[actix_web::test]
    async fn date_only_is_strictly_after() {
        let service = seeded().await;

        let found = service
            .get_employees(&EmployeeFilter::new(None, Some(date("2020-01-01"))))
            .await
            .unwrap();
        assert_eq!(names(&found), vec!["Bob", "Carol"]);

        let none = service
            .get_employees(&EmployeeFilter::new(None, Some(date("2021-01-01"))))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[actix_web::test]
    async fn no_filter_returns_everyone() {
        let service = seeded().await;

        let found = service.get_employees(&EmployeeFilter::default()).await.unwrap();

        assert_eq!(names(&found), vec!["Alice", "Bob", "Carol"]);
    }

    #[actix_web::test]
    async fn unknown_department_is_empty_not_error() {
        let service = seeded().await;

        let found = service
            .get_employees(&EmployeeFilter::new(Some("Sales".into()), None))
            .await
            .unwrap();

        assert!(found.is_empty());
    }

    #[actix_web::test]
    async fn get_by_id_returns_saved_employee() {
        let service = service();
        let saved = seed(&service, "John Doe", "Engineering", "2020-01-01").await;

        let found = service.get_employee_by_id(1).await.unwrap();

        assert_eq!(found, saved);
        assert_eq!(found.employment_date, date("2020-01-01"));
    }

    #[actix_web::test]
    async fn get_by_missing_id_is_not_found() {
        let service = service();

        let err = service.get_employee_by_id(99).await.unwrap_err();

        assert!(matches!(err, ServiceError::NotFound { id: 99 }));
        assert_eq!(
            err.to_string(),
            "Employee is not found or has left the organization."
        );
    }

    #[actix_web::test]
    async fn delete_removes_employee() {
        let service = seeded().await;
        assert!(service.exists_by_id(2).await.unwrap());

        service.delete_employee(2).await.unwrap();

        assert!(!service.exists_by_id(2).await.unwrap());
        service.delete_employee(2).await.unwrap();
    }

    #[actix_web::test]
    async fn exports_resolved_employees() {
        let service = seeded().await;
        let employees = service
            .get_employees(&EmployeeFilter::new(Some("HR".into()), None))
            .await
            .unwrap();

        let mut sink = BufferSink::default();
        service
            .export_employees(ExportFormat::Csv, &employees, &mut sink)
            .unwrap();

        assert_eq!(
            String::from_utf8(sink.body).unwrap(),
            "\"ID\",\"Name\",\"Department\",\"YearOfEmployment\"\n\
             \"2\",\"Bob\",\"HR\",\"2021-01-01\"\n"
        );
    }
}
