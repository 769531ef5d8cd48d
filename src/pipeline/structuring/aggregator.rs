//! Line-by-line record assembly for one document.
//!
//! A `RecordAggregator` owns the heading context and the record buffer for
//! a single pass over a document. Lines must be pushed in document order;
//! build a fresh aggregator for every document.

use std::collections::HashSet;

use serde::Serialize;

use super::classify::{classify, LineRole};
use super::context::HeadingContext;
use super::scores::extract_scores;
use super::types::Record;
use crate::pipeline::extraction::{maybe_reorder, PageText};

/// Counters for one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregationStats {
    pub lines_seen: usize,
    pub categories: usize,
    pub institutions: usize,
    pub sub_units: usize,
    pub data_rows: usize,
    pub ignored: usize,
    /// Data rows whose label was empty once numbers were stripped.
    pub discarded_empty_label: usize,
    pub duplicates_removed: usize,
}

/// Stateful pass: classifies lines, tracks headings, collects records.
#[derive(Debug, Default)]
pub struct RecordAggregator {
    context: HeadingContext,
    records: Vec<Record>,
    stats: AggregationStats,
}

impl RecordAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed every line of a page, in storage order.
    pub fn push_page(&mut self, page: &PageText) {
        for line in page.lines() {
            self.push_line(line);
        }
    }

    /// Classify one raw line and apply it. Returns the role assigned.
    pub fn push_line(&mut self, raw_line: &str) -> LineRole {
        self.stats.lines_seen += 1;

        let canonical = maybe_reorder(raw_line);
        let role = classify(raw_line, &canonical);

        match &role {
            LineRole::Category(_) => self.stats.categories += 1,
            LineRole::Institution(_) => self.stats.institutions += 1,
            LineRole::SubUnit(_) => self.stats.sub_units += 1,
            LineRole::DataRow { label } => {
                self.stats.data_rows += 1;
                self.push_record(raw_line, label);
            }
            LineRole::Ignorable => self.stats.ignored += 1,
        }

        if self.context.apply(&role) {
            tracing::debug!(role = %role, context = ?self.context, "Heading updated");
        }

        role
    }

    fn push_record(&mut self, raw_line: &str, label: &str) {
        if label.is_empty() {
            self.stats.discarded_empty_label += 1;
            tracing::trace!(raw_line, "Dropped data row without label");
            return;
        }

        let scores = extract_scores(raw_line);
        self.records.push(Record::new(&self.context, label, scores));
    }

    /// Headings currently in force.
    pub fn context(&self) -> &HeadingContext {
        &self.context
    }

    /// Records collected so far, before de-duplication.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn stats(&self) -> &AggregationStats {
        &self.stats
    }

    /// End the pass: de-duplicate records and return them with the final stats.
    pub fn finish(self) -> (Vec<Record>, AggregationStats) {
        let Self { records, mut stats, .. } = self;

        let before = records.len();
        let records = dedup_records(records);
        stats.duplicates_removed = before - records.len();

        (records, stats)
    }
}

/// Drop records equal to an earlier one, keeping first-occurrence order.
pub fn dedup_records(records: Vec<Record>) -> Vec<Record> {
    let mut seen: HashSet<Record> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}
