pub mod employee;

pub use employee::{EmployeeFilter, EmployeeService};
