use super::ExtractionError;

/// Raw text of one page, exactly as the text layer produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number in the source document.
    pub page_number: usize,
    pub text: String,
}

impl PageText {
    pub fn new(page_number: usize, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    /// Raw lines in storage order. Splits on `'\n'` only; a trailing `'\r'`
    /// stays on the line and is removed later by trimming.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// True if the page has no text worth classifying.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Page-by-page text source for a document (allows mocking for tests).
pub trait PageSource {
    /// All pages of the document, in document order.
    fn pages(&self) -> Result<Vec<PageText>, ExtractionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_keep_storage_order() {
        let page = PageText::new(1, "first\nsecond\nthird");
        let lines: Vec<&str> = page.lines().collect();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn carriage_return_stays_on_line() {
        let page = PageText::new(1, "a\r\nb");
        let lines: Vec<&str> = page.lines().collect();
        assert_eq!(lines, vec!["a\r", "b"]);
    }

    #[test]
    fn whitespace_page_is_blank() {
        assert!(PageText::new(3, "  \n\t\n").is_blank());
        assert!(PageText::new(3, "").is_blank());
        assert!(!PageText::new(3, " x ").is_blank());
    }

    #[test]
    fn trait_is_object_safe() {
        fn _assert_source(_: &dyn PageSource) {}
    }
}
