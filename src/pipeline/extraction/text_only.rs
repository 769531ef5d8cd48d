//! Pre-extracted text dumps.
//!
//! A dump is one UTF-8 file holding the raw text layer of a whole document,
//! pages separated by form feed (`\x0C`), the separator `pdftotext` and
//! similar tools emit. Lines are kept byte for byte: no reversal, no folding.

use std::path::{Path, PathBuf};

use super::types::{PageSource, PageText};
use super::ExtractionError;

/// Page separator in text dumps.
pub const PAGE_BREAK: char = '\x0C';

/// Text-dump source: reads a UTF-8 file and splits it into pages.
pub struct TextDumpSource {
    path: PathBuf,
}

impl TextDumpSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for TextDumpSource {
    fn pages(&self) -> Result<Vec<PageText>, ExtractionError> {
        let bytes = std::fs::read(&self.path)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ExtractionError::EncodingError(e.to_string()))?;

        let pages = split_pages(&text);
        tracing::debug!(
            path = %self.path.display(),
            pages = pages.len(),
            "Read text dump"
        );
        Ok(pages)
    }
}

/// Split a dump into pages on form feed. A trailing form feed does not
/// produce an extra empty page.
pub fn split_pages(text: &str) -> Vec<PageText> {
    let body = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
    body.split(PAGE_BREAK)
        .enumerate()
        .map(|(i, page)| PageText::new(i + 1, page))
        .collect()
}
