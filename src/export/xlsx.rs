use std::io::Write;

use rust_xlsxwriter::{Workbook, XlsxError};

use super::{COLUMNS, ExportError, ExportFormat};
use crate::model::employee::Employee;

pub const SHEET_NAME: &str = "Employees";

/// Single-sheet workbook: header on row 0, one employee per row after it.
pub fn write_xlsx<W: Write>(employees: &[Employee], mut writer: W) -> Result<(), ExportError> {
    let buffer = build_workbook(employees).map_err(ExportError::Spreadsheet)?;

    writer
        .write_all(&buffer)
        .map_err(|source| ExportError::Io {
            format: ExportFormat::Xlsx,
            source,
        })
}

fn build_workbook(employees: &[Employee]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string(0, col as u16, *title)?;
    }

    for (index, employee) in employees.iter().enumerate() {
        let row = index as u32 + 1;

        if let Some(id) = employee.id {
            sheet.write_number(row, 0, id as f64)?;
        }
        sheet.write_string(row, 1, employee.name.as_str())?;
        sheet.write_string(row, 2, employee.department.as_str())?;
        sheet.write_string(
            row,
            3,
            employee.employment_date.format("%Y-%m-%d").to_string(),
        )?;
    }

    workbook.save_to_buffer()
}
