use crate::model::employee::Employee;
use crate::store::EmployeeRecord;

/// Converts between the stored and the public employee shape.
///
/// Pure and total; no validation happens here.
pub trait EmployeeMapper: Send + Sync {
    fn to_employee(&self, record: EmployeeRecord) -> Employee;

    fn to_record(&self, employee: Employee) -> EmployeeRecord;
}

/// Field-for-field mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordMapper;

impl EmployeeMapper for RecordMapper {
    fn to_employee(&self, record: EmployeeRecord) -> Employee {
        Employee {
            id: record.id,
            name: record.name,
            department: record.department,
            employment_date: record.year_of_employment,
        }
    }

    fn to_record(&self, employee: Employee) -> EmployeeRecord {
        EmployeeRecord {
            id: employee.id,
            name: employee.name,
            department: employee.department,
            year_of_employment: employee.employment_date,
        }
    }
}
