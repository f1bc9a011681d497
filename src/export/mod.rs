//! Tabular export of employee lists.
//!
//! Both formats share one column layout: `ID, Name, Department,
//! YearOfEmployment`. The last column carries the full ISO-8601 date.

pub mod csv;
pub mod xlsx;

use std::io::{self, Write};

use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::model::employee::Employee;

pub const COLUMNS: [&str; 4] = ["ID", "Name", "Department", "YearOfEmployment"];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => "employees.csv",
            ExportFormat::Xlsx => "employees.xlsx",
        }
    }

    pub fn content_disposition(self) -> String {
        format!("attachment; filename={}", self.file_name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to export to CSV")]
    Csv(#[source] ::csv::Error),
    #[error("Failed to export to Excel")]
    Spreadsheet(#[source] rust_xlsxwriter::XlsxError),
    #[error("Failed to write {format} export")]
    Io {
        format: ExportFormat,
        #[source]
        source: io::Error,
    },
}

/// Destination of an export: response headers plus a body writer.
pub trait ExportSink {
    fn set_content_type(&mut self, content_type: &str);

    fn set_content_disposition(&mut self, disposition: &str);

    fn body(&mut self) -> &mut dyn Write;
}

/// Writes the headers and the encoded employees into `sink`.
///
/// The body writer is flushed on every exit path. Bytes that reached the
/// sink before a failure stay there.
pub fn export(
    format: ExportFormat,
    employees: &[Employee],
    sink: &mut dyn ExportSink,
) -> Result<(), ExportError> {
    sink.set_content_type(format.content_type());
    sink.set_content_disposition(&format.content_disposition());

    let mut body = FlushOnDrop::new(sink.body());
    match format {
        ExportFormat::Csv => self::csv::write_csv(employees, &mut body)?,
        ExportFormat::Xlsx => self::xlsx::write_xlsx(employees, &mut body)?,
    }

    body.finish()
        .map_err(|source| ExportError::Io { format, source })
}

struct FlushOnDrop<'a> {
    inner: &'a mut dyn Write,
    released: bool,
}

impl<'a> FlushOnDrop<'a> {
    fn new(inner: &'a mut dyn Write) -> Self {
        Self {
            inner,
            released: false,
        }
    }

    fn finish(mut self) -> io::Result<()> {
        self.released = true;
        self.inner.flush()
    }
}

impl Write for FlushOnDrop<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Drop for FlushOnDrop<'_> {
    fn drop(&mut self) {
        if !self.released {
            // the encoder error is what gets reported
            let _ = self.inner.flush();
        }
    }
}

/// In-memory sink used to build HTTP responses.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl ExportSink for BufferSink {
    fn set_content_type(&mut self, content_type: &str) {
        self.content_type = Some(content_type.to_string());
    }

    fn set_content_disposition(&mut self, disposition: &str) {
        self.content_disposition = Some(disposition.to_string());
    }

    fn body(&mut self) -> &mut dyn Write {
        &mut self.body
    }
}
