use crate::types::{ScreeningRecord, Version};
use std::collections::HashMap;

use super::engine::RecordRule;

// CinemaAliasRule - maps raw cinema names onto their canonical display name
pub struct CinemaAliasRule<'a> {
    aliases: &'a HashMap<String, String>,
}

impl<'a> CinemaAliasRule<'a> {
    pub fn new(aliases: &'a HashMap<String, String>) -> Self {
        Self { aliases }
    }
}

impl RecordRule for CinemaAliasRule<'_> {
    fn apply(&self, mut record: ScreeningRecord) -> ScreeningRecord {
        if let Some(canonical) = self.aliases.get(&record.cinema) {
            record.cinema = canonical.clone();
        }
        record
    }

    fn name(&self) -> &str {
        "CinemaAlias"
    }
}

// TitleFixRule - replaces known OCR-mangled titles
pub struct TitleFixRule<'a> {
    fixes: &'a HashMap<String, String>,
}

impl<'a> TitleFixRule<'a> {
    pub fn new(fixes: &'a HashMap<String, String>) -> Self {
        Self { fixes }
    }
}

impl RecordRule for TitleFixRule<'_> {
    fn apply(&self, mut record: ScreeningRecord) -> ScreeningRecord {
        if let Some(fixed) = self.fixes.get(&record.movie_title) {
            record.movie_title = fixed.clone();
        }
        record
    }

    fn name(&self) -> &str {
        "TitleFix"
    }
}

// VersionInferenceRule - a foreign-language film not tagged VOST is shown dubbed
pub struct VersionInferenceRule;

impl RecordRule for VersionInferenceRule {
    fn apply(&self, mut record: ScreeningRecord) -> ScreeningRecord {
        let foreign = record
            .original_language
            .as_deref()
            .map(|lang| !lang.is_empty() && !lang.eq_ignore_ascii_case("fr"))
            .unwrap_or(false);

        if foreign && record.version != Some(Version::Vost) {
            record.version = Some(Version::Vf);
        }
        record
    }

    fn name(&self) -> &str {
        "VersionInference"
    }
}
