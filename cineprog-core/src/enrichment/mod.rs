// Movie metadata enrichment
// - provider.rs: the MetadataProvider collaborator boundary
// - tmdb.rs: The Movie Database client
// - lookup_cache.rs: per-run memo with parallel prefetch and persistent backing

pub mod lookup_cache;
pub mod provider;
pub mod tmdb;

pub use lookup_cache::EnrichmentCache;
pub use provider::MetadataProvider;
pub use tmdb::TmdbProvider;

use crate::types::ScreeningRecord;

/// Copy original title, original language and trailer onto every record
/// whose title the catalog knows. Unknown titles pass through untouched.
pub fn apply_enrichment(records: Vec<ScreeningRecord>, cache: &mut EnrichmentCache<'_>) -> Vec<ScreeningRecord> {
    cache.prefetch(records.iter().map(|r| r.movie_title.as_str()));

    records
        .into_iter()
        .map(|mut record| {
            if let Some(enrichment) = cache.get(&record.movie_title) {
                record.original_title = enrichment.original_title.clone();
                record.original_language = enrichment.original_language.clone();
                record.trailer_url = enrichment.trailer_url.clone();
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnrichmentError;
    use crate::storage::NoOpStorage;
    use crate::types::Enrichment;
    use chrono::NaiveDate;

    struct FixedProvider;

    impl MetadataProvider for FixedProvider {
        fn lookup(&self, title: &str) -> Result<Option<Enrichment>, EnrichmentError> {
            if title == "Zootopie 2" {
                Ok(Some(Enrichment {
                    original_title: Some("Zootopia 2".to_string()),
                    original_language: Some("en".to_string()),
                    trailer_url: Some("https://www.youtube.com/watch?v=abc".to_string()),
                    ..Enrichment::default()
                }))
            } else {
                Ok(None)
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn record(title: &str) -> ScreeningRecord {
        ScreeningRecord {
            cinema: "LUZY – Le Vox".to_string(),
            movie_title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
            time: "14h".to_string(),
            version: None,
            original_title: None,
            original_language: None,
            trailer_url: None,
        }
    }

    #[test]
    fn test_apply_enrichment_copies_fields() {
        let provider = FixedProvider;
        let storage = NoOpStorage::new();
        let mut cache = EnrichmentCache::new(&provider, &storage, "fr-FR");

        let records = apply_enrichment(vec![record("Zootopie 2"), record("Inconnu")], &mut cache);
        assert_eq!(records[0].original_title.as_deref(), Some("Zootopia 2"));
        assert_eq!(records[0].original_language.as_deref(), Some("en"));
        assert_eq!(
            records[0].trailer_url.as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
        assert_eq!(records[1], record("Inconnu"));
    }
}
