use crate::types::Enrichment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version constants for cache invalidation
pub mod versions {
    pub const CINEPROG_VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const ENRICHMENT_VERSION: &str = "1.0.0";
}

/// Persistent enrichment cache key (title + provider + locale -> lookup)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EnrichmentCacheKey {
    pub title: String,
    pub provider: String,
    pub language: String,
    pub cineprog_version: String,
    pub enrichment_version: String,
}

impl EnrichmentCacheKey {
    pub fn new(title: &str, provider: &str, language: &str) -> Self {
        Self {
            title: title.to_string(),
            provider: provider.to_string(),
            language: language.to_string(),
            cineprog_version: versions::CINEPROG_VERSION.to_string(),
            enrichment_version: versions::ENRICHMENT_VERSION.to_string(),
        }
    }

    /// Compute cache key hash for storage
    pub fn to_cache_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        // Separators keep ("ab", "c") and ("a", "bc") apart
        for part in [
            &self.title,
            &self.provider,
            &self.language,
            &self.cineprog_version,
            &self.enrichment_version,
        ] {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

/// Cached lookup result. `enrichment: None` records a confirmed catalog miss,
/// so known-unknown titles are not queried again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentCacheValue {
    pub enrichment: Option<Enrichment>,
    pub created_at: DateTime<Utc>,
    pub cache_version: String,
}

impl EnrichmentCacheValue {
    pub fn new(enrichment: Option<Enrichment>) -> Self {
        Self {
            enrichment,
            created_at: Utc::now(),
            cache_version: versions::CINEPROG_VERSION.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hash_is_stable() {
        let a = EnrichmentCacheKey::new("Zootopie 2", "tmdb", "fr-FR");
        let b = EnrichmentCacheKey::new("Zootopie 2", "tmdb", "fr-FR");
        assert_eq!(a.to_cache_hash(), b.to_cache_hash());
        assert_eq!(a.to_cache_hash().len(), 64);
    }

    #[test]
    fn test_cache_hash_depends_on_every_part() {
        let base = EnrichmentCacheKey::new("Zootopie 2", "tmdb", "fr-FR");
        let other_lang = EnrichmentCacheKey::new("Zootopie 2", "tmdb", "en-US");
        let other_title = EnrichmentCacheKey::new("Zootopie", "tmdb", "fr-FR");
        assert_ne!(base.to_cache_hash(), other_lang.to_cache_hash());
        assert_ne!(base.to_cache_hash(), other_title.to_cache_hash());
    }
}
