//! Document processing orchestrator.
//!
//! Drives one document through the pipeline:
//! read pages → classify and aggregate lines → de-duplicate → write sinks.
//!
//! The page source and the sinks are injected as trait objects so the
//! orchestrator runs in tests without touching PDFs or the filesystem.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::{ConfigError, RunConfig};
use crate::pipeline::export::{CsvSink, ExportError, RecordSink, XlsxSink};
use crate::pipeline::extraction::{source_for_path, ExtractionError, PageSource};
use crate::pipeline::structuring::{AggregationStats, Periods, Record, RecordAggregator};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during document processing.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Summary of one processed document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub pages_read: usize,
    /// Pages with no text at all. Usually scanned images without a text layer.
    pub pages_skipped: usize,
    pub lines_seen: usize,
    pub stats: AggregationStats,
    /// Final records, de-duplicated, in first-seen order.
    pub records: Vec<Record>,
}

impl ProcessingOutcome {
    /// Write the outcome as pretty-printed JSON.
    pub fn write_summary(&self, path: &Path) -> Result<(), ExportError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

pub struct DocumentProcessor {
    source: Box<dyn PageSource>,
    sinks: Vec<Box<dyn RecordSink>>,
    periods: Periods,
}

impl DocumentProcessor {
    pub fn new(source: Box<dyn PageSource>) -> Self {
        Self {
            source,
            sinks: Vec::new(),
            periods: Periods::default(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn RecordSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn with_periods(mut self, periods: Periods) -> Self {
        self.periods = periods;
        self
    }

    /// Run the whole document through one aggregator, then hand the final
    /// record set to every sink in order. The first failing sink aborts.
    pub fn process(&self) -> Result<ProcessingOutcome, ProcessingError> {
        let pages = self.source.pages()?;
        if pages.is_empty() {
            return Err(ExtractionError::EmptyDocument.into());
        }

        tracing::info!(pages = pages.len(), "Processing: starting aggregation");

        let mut aggregator = RecordAggregator::new();
        let mut pages_skipped = 0;

        for page in &pages {
            if page.is_blank() {
                pages_skipped += 1;
                tracing::warn!(page = page.page_number, "Page has no text layer, skipping");
                continue;
            }
            aggregator.push_page(page);
        }

        let (records, stats) = aggregator.finish();

        if records.is_empty() {
            tracing::warn!(lines = stats.lines_seen, "No score rows found in document");
        }

        for sink in &self.sinks {
            sink.write(&records, &self.periods)?;
            tracing::info!(
                format = sink.format(),
                path = %sink.path().display(),
                records = records.len(),
                "Wrote records"
            );
        }

        tracing::info!(
            records = records.len(),
            data_rows = stats.data_rows,
            duplicates = stats.duplicates_removed,
            "Processing complete"
        );

        Ok(ProcessingOutcome {
            pages_read: pages.len(),
            pages_skipped,
            lines_seen: stats.lines_seen,
            stats,
            records,
        })
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Build a `DocumentProcessor` for a run: source chosen by file extension,
/// one sink per enabled output format.
pub fn build_processor(config: &RunConfig) -> DocumentProcessor {
    let mut processor = DocumentProcessor::new(source_for_path(&config.document))
        .with_periods(config.periods.clone());

    if config.write_csv {
        processor = processor.with_sink(Box::new(CsvSink::new(config.csv_path())));
    }
    if config.write_xlsx {
        processor = processor.with_sink(Box::new(XlsxSink::new(config.xlsx_path())));
    }
    if processor.sinks.is_empty() {
        tracing::warn!("All outputs disabled, records will not be written");
    }

    processor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
