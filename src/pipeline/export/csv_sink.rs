use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use super::{header, ExportError, RecordSink};
use crate::pipeline::structuring::{Periods, Record, Score};

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Comma-separated output, UTF-8 with BOM.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for CsvSink {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[Record], periods: &Periods) -> Result<(), ExportError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        write_csv(&mut writer, records, periods)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write the BOM, the header and one row per record. Absent values are empty cells.
pub fn write_csv<W: Write>(
    mut writer: W,
    records: &[Record],
    periods: &Periods,
) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv = WriterBuilder::new().from_writer(writer);
    csv.write_record(header(periods))?;

    for record in records {
        let mut row = vec![
            record.category.as_deref().unwrap_or(""),
            record.institution.as_deref().unwrap_or(""),
            record.sub_unit.as_deref().unwrap_or(""),
            record.label.as_str(),
        ];
        row.extend(record.scores.iter().map(|s| s.map(Score::as_str).unwrap_or("")));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}
