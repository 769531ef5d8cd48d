pub mod csv_sink;
pub mod xlsx_sink;

pub use csv_sink::CsvSink;
pub use xlsx_sink::XlsxSink;

use std::path::Path;

use thiserror::Error;

use crate::pipeline::structuring::{Periods, Record};

/// Fixed leading columns; one column per period follows.
pub const CONTEXT_COLUMNS: [&str; 4] = ["Category", "Institution", "SubUnit", "Label"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet packaging error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for the final, de-duplicated record set.
pub trait RecordSink {
    /// Short format name for logs ("csv", "xlsx").
    fn format(&self) -> &'static str;

    /// Where the sink writes.
    fn path(&self) -> &Path;

    fn write(&self, records: &[Record], periods: &Periods) -> Result<(), ExportError>;
}

/// Column headers: context columns, then the period labels.
pub fn header(periods: &Periods) -> Vec<String> {
    CONTEXT_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(periods.labels().iter().cloned())
        .collect()
}
