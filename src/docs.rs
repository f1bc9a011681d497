use crate::api::employee::CreateEmployee;
use crate::model::employee::Employee;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Records API",
        version = "1.0.0",
        description = r#"
## Employee Records

Create, look up, filter, delete and export employee records.

### Filtering
- `department`: exact match
- `yearAfter`: employment date strictly after the given `yyyy-MM-dd` date

Both filters are optional and combine with AND.

### Export
`GET /api/employees/export?format=csv|xlsx` returns an attachment with the columns
`ID, Name, Department, YearOfEmployment`.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::export_employees
    ),
    components(
        schemas(
            Employee,
            CreateEmployee
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_employee_route() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/employees"));
        assert!(
            doc.paths
                .paths
                .contains_key(&format!("/api/employees{}", crate::routes::EMPLOYEE_PATH))
        );
        assert!(doc.paths.paths.contains_key("/api/employees/export"));
    }
}
