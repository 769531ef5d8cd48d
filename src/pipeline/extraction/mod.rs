pub mod types;
pub mod pdf;
pub mod text_only;
pub mod glyphs;
pub mod reorder;

pub use types::*;
pub use pdf::PdfPageSource;
pub use text_only::TextDumpSource;
pub use glyphs::normalize;
pub use reorder::{contains_arabic, maybe_reorder};

use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Text encoding error: {0}")]
    EncodingError(String),

    #[error("Document has no pages")]
    EmptyDocument,
}

/// Pick a page source by file extension: `.pdf` reads the PDF text layer,
/// anything else is treated as a form-feed separated text dump.
pub fn source_for_path(path: &Path) -> Box<dyn PageSource> {
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        Box::new(PdfPageSource::new(path))
    } else {
        Box::new(TextDumpSource::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_file_uses_dump_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("booklet.txt");
        std::fs::write(&path, "one\x0Ctwo").unwrap();

        let pages = source_for_path(&path).pages().unwrap();
        assert_eq!(pages.len(), 2);
    }

    #[test]
    fn pdf_extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BOOKLET.PDF");
        std::fs::write(&path, pdf::tests::make_test_pdf("Upper 10.5")).unwrap();

        let pages = source_for_path(&path).pages().unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn garbage_with_pdf_extension_fails_as_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, "plain text").unwrap();

        let result = source_for_path(&path).pages();
        assert!(matches!(result, Err(ExtractionError::PdfParsing(_))));
    }
}
