use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::structuring::{Periods, PERIOD_COUNT};

/// Application-level constants
pub const APP_NAME: &str = "orientation-scores";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Booklet read when no document is named.
pub const DEFAULT_DOCUMENT: &str = "orientation_book.pdf";

/// File stem shared by the CSV and spreadsheet outputs.
pub const DEFAULT_OUTPUT_STEM: &str = "university_scores";

/// Score column labels, oldest period first.
pub const DEFAULT_PERIODS: [&str; PERIOD_COUNT] = ["2022", "2023", "2024"];

/// Log filter used when `RUST_LOG` is unset. Targets match by prefix,
/// so this covers both the library and the binary.
pub fn default_log_filter() -> &'static str {
    "orientation_scores=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings for one extraction run. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub document: PathBuf,
    pub output_dir: PathBuf,
    pub output_stem: String,
    pub periods: Periods,
    pub write_csv: bool,
    pub write_xlsx: bool,
    /// JSON run summary (counters and records). Not written when unset.
    pub summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            document: PathBuf::from(DEFAULT_DOCUMENT),
            output_dir: PathBuf::from("."),
            output_stem: DEFAULT_OUTPUT_STEM.to_string(),
            periods: Periods::default(),
            write_csv: true,
            write_xlsx: true,
            summary: None,
        }
    }
}

impl RunConfig {
    /// Load a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.csv", self.output_stem))
    }

    pub fn xlsx_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.xlsx", self.output_stem))
    }
}
