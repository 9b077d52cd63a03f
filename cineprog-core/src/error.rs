use thiserror::Error;

/// Failure talking to the movie metadata catalog.
///
/// Never fatal for a run: the enrichment cache records the title as
/// unenriched and moves on.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("metadata request failed: {0}")]
    Transport(String),

    #[error("metadata service returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed metadata payload: {0}")]
    Payload(String),

    #[error("metadata provider is not configured: {0}")]
    NotConfigured(String),
}

/// Failure turning an input document into page texts
#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("input is not valid UTF-8")]
    NotUtf8(#[from] std::str::Utf8Error),

    #[error("OCR payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("OCR payload contains no page text")]
    NoPages,
}
