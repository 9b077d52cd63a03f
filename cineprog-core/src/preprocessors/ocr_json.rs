use super::preprocessor::{has_extension, PagePreprocessor};
use crate::error::PreprocessError;
use crate::types::PageText;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

/// Reads the JSON response of a document OCR service.
///
/// Each entry of `pages` contributes its first non-empty `markdown`, `text`
/// or `content` field. A response whose pages carry no text at all falls
/// back to a top-level `document_annotation` string, as a single page.
pub struct OcrJsonPreprocessor;

#[derive(Debug, Default, Deserialize)]
struct OcrResponse {
    #[serde(default)]
    pages: Vec<OcrPage>,
    #[serde(default)]
    document_annotation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct OcrPage {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl OcrPage {
    fn into_text(self) -> Option<String> {
        [self.markdown, self.text, self.content]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
    }
}

impl OcrJsonPreprocessor {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_response(&self, json: &str) -> Result<Vec<PageText>, PreprocessError> {
        let response: OcrResponse = serde_json::from_str(json)?;
        let page_count = response.pages.len();

        let pages: Vec<PageText> = response
            .pages
            .into_iter()
            .filter_map(OcrPage::into_text)
            .collect();

        if !pages.is_empty() {
            tracing::debug!(pages = pages.len(), listed = page_count, "Read OCR pages");
            return Ok(pages);
        }

        match response.document_annotation {
            Some(annotation) if !annotation.trim().is_empty() => {
                tracing::debug!("OCR pages empty, using document annotation");
                Ok(vec![annotation])
            }
            _ => Err(PreprocessError::NoPages),
        }
    }
}

impl Default for OcrJsonPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl PagePreprocessor for OcrJsonPreprocessor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageText>> {
        let json = std::str::from_utf8(bytes).map_err(PreprocessError::from)?;
        Ok(self.parse_response(json)?)
    }

    fn name(&self) -> &str {
        "OcrJson"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["json"])
    }
}
