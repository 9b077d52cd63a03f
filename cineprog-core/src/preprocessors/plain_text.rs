use super::preprocessor::{has_extension, PagePreprocessor};
use crate::error::PreprocessError;
use crate::types::PageText;
use anyhow::Result;
use std::path::Path;

/// Page break in plain-text OCR dumps
pub const PAGE_SEPARATOR: char = '\u{0C}';

/// Reads a UTF-8 text dump, one page per form-feed separated chunk
pub struct PlainTextPreprocessor;

impl PlainTextPreprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn split_pages(&self, text: &str) -> Vec<PageText> {
        text.split(PAGE_SEPARATOR)
            .filter(|page| !page.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for PlainTextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePreprocessor for PlainTextPreprocessor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>> {
        let text = std::str::from_utf8(bytes).map_err(PreprocessError::from)?;
        Ok(self.split_pages(text))
    }

    fn name(&self) -> &str {
        "PlainText"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "md", "markdown"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_form_feed() {
        let pages = PlainTextPreprocessor::new().split_pages("one\n\u{0C}two\n\u{0C}\n");
        assert_eq!(pages, vec!["one\n", "two\n"]);
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let result = PlainTextPreprocessor::new().extract_pages(&[0xff, 0xfe, 0x00]);
        assert!(result.is_err());
    }
}
