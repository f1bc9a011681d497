use std::io::Write;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{COLUMNS, ExportError};
use crate::model::employee::Employee;

/// Every field quoted, `\n` line endings, header first.
pub fn write_csv<W: Write>(employees: &[Employee], writer: W) -> Result<(), ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    writer.write_record(COLUMNS).map_err(ExportError::Csv)?;

    for employee in employees {
        let id = employee.id.map(|id| id.to_string()).unwrap_or_default();
        let employment_date = employee.employment_date.format("%Y-%m-%d").to_string();

        writer
            .write_record([
                id.as_str(),
                employee.name.as_str(),
                employee.department.as_str(),
                employment_date.as_str(),
            ])
            .map_err(ExportError::Csv)?;
    }

    writer.flush().map_err(|err| ExportError::Csv(err.into()))
}
