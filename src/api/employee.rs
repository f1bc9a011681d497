use std::str::FromStr;

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::{debug, info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::export::{BufferSink, ExportFormat};
use crate::model::employee::{Employee, NewEmployee};
use crate::service::{EmployeeFilter, EmployeeService};

const INVALID_FORMAT_MESSAGE: &str = "Invalid format. Please specify 'csv' or 'xlsx'.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployee {
    /// Must be absent; the id is assigned on save.
    #[schema(nullable = true)]
    pub id: Option<u64>,
    #[serde(default)]
    #[schema(example = "John Doe")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "Engineering")]
    pub department: String,
    #[serde(default, alias = "yearOfEmployment")]
    #[schema(example = "2020-01-01", value_type = String, format = "date")]
    pub employment_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Department name to filter employees by
    pub department: Option<String>,
    /// Only employees hired strictly after this date (yyyy-MM-dd)
    #[serde(rename = "yearAfter", alias = "year_after", alias = "year")]
    pub year_after: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    /// Department name to filter employees by
    pub department: Option<String>,
    /// Only employees hired strictly after this date (yyyy-MM-dd)
    #[serde(rename = "yearAfter", alias = "year_after", alias = "year")]
    pub year_after: Option<NaiveDate>,
    /// File format for export, `csv` (default) or `xlsx`
    pub format: Option<String>,
}

fn filter_from(department: Option<String>, year_after: Option<NaiveDate>) -> EmployeeFilter {
    let department = department.filter(|d| !d.trim().is_empty());
    EmployeeFilter::new(department, year_after)
}

impl From<EmployeeQuery> for EmployeeFilter {
    fn from(query: EmployeeQuery) -> Self {
        filter_from(query.department, query.year_after)
    }
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Filtered employee list", body = [Employee]),
        (status = 400, description = "Malformed filter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    service: web::Data<EmployeeService>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    info!(
        department = ?query.department,
        year_after = ?query.year_after,
        "Retrieving a list of employees"
    );

    let employees = service.get_employees(&query.into()).await?;

    debug!(size = employees.len(), "A list of employees is found");
    Ok(HttpResponse::Ok().json(employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee is not found or has left the organization."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee = service.get_employee_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid employee or id supplied", body = Object, example = json!({
            "message": "Validation failed",
            "errors": ["name: Field must contain only letters"]
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeService>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();
    info!(name = %payload.name, department = %payload.department, "Saving a new employee");

    if payload.id.is_some() {
        return Err(ApiError::InvalidArgument(
            "ID must not be included in the request for a new entity".to_string(),
        ));
    }

    let employee = NewEmployee::new(
        payload.name,
        payload.department,
        payload.employment_date,
        Local::now().date_naive(),
    )?;

    let saved = service.add_employee(employee).await?;
    debug!(employee_id = ?saved.id, "New employee is saved");
    Ok(HttpResponse::Created().json(saved))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeService>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();
    info!(employee_id, "Delete employee by ID");

    if employee_id == 0 {
        warn!(employee_id, "Received request with invalid ID");
        return Err(ApiError::InvalidArgument(format!(
            "ID must be a positive number, provide ID is: {employee_id}"
        )));
    }

    if !service.exists_by_id(employee_id).await? {
        warn!(employee_id, "Employee not found");
        return Ok(HttpResponse::NotFound().finish());
    }

    service.delete_employee(employee_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Export employees
#[utoipa::path(
    get,
    path = "/api/employees/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Export successful", content_type = "text/csv"),
        (status = 204, description = "No employees found for the given criteria"),
        (status = 400, description = "Invalid format or other bad request", body = Object, example = json!({
            "message": INVALID_FORMAT_MESSAGE
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn export_employees(
    service: web::Data<EmployeeService>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();

    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => ExportFormat::from_str(raw.trim())
            .map_err(|_| ApiError::InvalidArgument(INVALID_FORMAT_MESSAGE.to_string()))?,
    };

    let filter = filter_from(query.department, query.year_after);
    let employees = service.get_employees(&filter).await?;

    if employees.is_empty() {
        info!(?filter, "No employees found for the given criteria");
        return Ok(HttpResponse::NoContent().finish());
    }

    let mut sink = BufferSink::default();
    service.export_employees(format, &employees, &mut sink)?;

    Ok(attachment(sink))
}

fn attachment(sink: BufferSink) -> HttpResponse {
    let mut response = HttpResponse::Ok();
    if let Some(content_type) = sink.content_type {
        response.content_type(content_type);
    }
    if let Some(disposition) = sink.content_disposition {
        response.insert_header((header::CONTENT_DISPOSITION, disposition));
    }
    response.body(sink.body)
}
