use std::path::{Path, PathBuf};

use super::types::{PageSource, PageText};
use super::ExtractionError;

/// PDF text-layer source using the pdf-extract crate.
/// Reads the embedded text of every page; no rendering, no OCR.
pub struct PdfPageSource {
    path: PathBuf,
}

impl PdfPageSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfPageSource {
    fn pages(&self) -> Result<Vec<PageText>, ExtractionError> {
        let pdf_bytes = std::fs::read(&self.path)?;
        let pages = pages_from_pdf_bytes(&pdf_bytes)?;

        tracing::debug!(
            path = %self.path.display(),
            pages = pages.len(),
            "Read PDF text layer"
        );

        Ok(pages)
    }
}

/// Split an in-memory PDF into per-page raw text.
pub fn pages_from_pdf_bytes(pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
    let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

    Ok(page_texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| PageText::new(i + 1, text))
        .collect())
}
