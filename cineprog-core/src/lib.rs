// Cineprog Core Library
//
// Turns the OCR text of a weekly cinema program into a normalized list of
// screenings and a movie catalog. Main interface is `ProgramProcessor`.

pub mod types;
pub mod config;
pub mod error;
pub mod parsing;
pub mod dedup;
pub mod rules;
pub mod enrichment;
pub mod cache;
pub mod storage;
pub mod movies;
pub mod typography;
pub mod preprocessors;
pub mod processor;
pub mod output;

// Re-export main types and functions for easy use
pub use types::*;
pub use config::{CinemaTrigger, ProgramConfig, RuleSet};
pub use error::{EnrichmentError, PreprocessError};
pub use parsing::ProgramScanner;
pub use dedup::deduplicate;
pub use rules::{apply_rules, RuleEngine};
pub use enrichment::{apply_enrichment, EnrichmentCache, MetadataProvider, TmdbProvider};
pub use storage::{EnrichmentStorage, FileStorage, NoOpStorage};
pub use preprocessors::{OcrJsonPreprocessor, PagePreprocessor, PlainTextPreprocessor};
pub use processor::{PipelineStages, ProgramProcessor, StepProfiler};
