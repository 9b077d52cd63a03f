// Page source abstraction
//
// This module defines the boundary between OCR output (whatever document the
// OCR service produced) and the interpretation engine, which only ever sees
// an ordered list of page texts.

use crate::types::PageText;
use anyhow::{Context, Result};
use std::path::Path;

/// Converts an input document into ordered page texts.
///
/// Running OCR itself is out of scope: implementations read what an OCR
/// service already returned (a JSON response, a text dump).
pub trait PagePreprocessor {
    /// Convert raw document bytes into page texts, in source order
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>>;

    /// Convenience method: read the file and extract its pages
    fn process_file(&self, input: &Path) -> Result<Vec<PageText>> {
        let bytes = std::fs::read(input)
            .with_context(|| format!("Failed to read input file: {}", input.display()))?;
        self.extract_pages(&bytes)
            .with_context(|| format!("{} could not read {}", self.name(), input.display()))
    }

    /// Get preprocessor name for debugging/logging
    fn name(&self) -> &str;

    /// Check if preprocessor supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
