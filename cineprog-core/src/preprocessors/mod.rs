//! Page Preprocessors
//!
//! This module turns whatever the OCR service produced into the ordered page
//! texts the interpretation engine scans.
//!
//! ## Architecture
//!
//! ```text
//! OCR output (JSON response, text dump)
//!     ↓
//! [Format-specific PagePreprocessor]
//!     ↓
//! Vec<PageText>
//!     ↓
//! [ProgramScanner]
//! ```
//!
//! ## Available Preprocessors
//!
//! - `OcrJsonPreprocessor` - OCR service JSON responses (`pages[].markdown`)
//! - `PlainTextPreprocessor` - form-feed separated text dumps

pub mod ocr_json;
pub mod plain_text;
pub mod preprocessor;

// Re-export main types
pub use ocr_json::OcrJsonPreprocessor;
pub use plain_text::PlainTextPreprocessor;
pub use preprocessor::PagePreprocessor;

use std::path::Path;

/// Pick a preprocessor from the input's extension; unknown extensions are
/// read as plain text.
pub fn preprocessor_for(path: &Path) -> Box<dyn PagePreprocessor + Send + Sync> {
    let json = OcrJsonPreprocessor::new();
    if json.supports_file_type(path) {
        Box::new(json)
    } else {
        Box::new(PlainTextPreprocessor::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preprocessor_for_extension() {
        assert_eq!(preprocessor_for(Path::new("ocr.json")).name(), "OcrJson");
        assert_eq!(preprocessor_for(Path::new("ocr.txt")).name(), "PlainText");
        assert_eq!(preprocessor_for(Path::new("ocr")).name(), "PlainText");
    }
}
