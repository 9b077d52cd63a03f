use crate::cache::{EnrichmentCacheKey, EnrichmentCacheValue};
use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

/// Storage abstraction for caching metadata lookups across runs
pub trait EnrichmentStorage: Send + Sync {
    fn get_enrichment(&self, cache_key: &EnrichmentCacheKey) -> Result<Option<EnrichmentCacheValue>>;
    fn store_enrichment(&self, cache_key: &EnrichmentCacheKey, cache_value: &EnrichmentCacheValue) -> Result<()>;
}

/// File-based storage implementation using local cache directory
pub struct FileStorage {
    cache_dir: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref().to_path_buf();
        fs::create_dir_all(cache_dir.join("enrichment"))?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn enrichment_path(&self, cache_key: &EnrichmentCacheKey) -> PathBuf {
        self.cache_dir
            .join("enrichment")
            .join(format!("{}.json", cache_key.to_cache_hash()))
    }
}

impl EnrichmentStorage for FileStorage {
    fn get_enrichment(&self, cache_key: &EnrichmentCacheKey) -> Result<Option<EnrichmentCacheValue>> {
        let path = self.enrichment_path(cache_key);
        if path.exists() {
            let json_str = fs::read_to_string(path)?;
            let cache_value: EnrichmentCacheValue = serde_json::from_str(&json_str)
                .map_err(|e| anyhow!("Failed to deserialize cached EnrichmentCacheValue: {}", e))?;
            Ok(Some(cache_value))
        } else {
            Ok(None)
        }
    }

    fn store_enrichment(&self, cache_key: &EnrichmentCacheKey, cache_value: &EnrichmentCacheValue) -> Result<()> {
        let path = self.enrichment_path(cache_key);
        let json_str = serde_json::to_string_pretty(cache_value)
            .map_err(|e| anyhow!("Failed to serialize EnrichmentCacheValue: {}", e))?;
        fs::write(path, json_str)?;
        Ok(())
    }
}

/// Calculate hash for the text of an input document
pub fn calculate_text_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// No-op storage implementation that disables all caching
pub struct NoOpStorage;

impl Default for NoOpStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl NoOpStorage {
    pub fn new() -> Self {
        Self
    }
}

impl EnrichmentStorage for NoOpStorage {
    fn get_enrichment(&self, _cache_key: &EnrichmentCacheKey) -> Result<Option<EnrichmentCacheValue>> {
        Ok(None) // Always cache miss
    }

    fn store_enrichment(&self, _cache_key: &EnrichmentCacheKey, _cache_value: &EnrichmentCacheValue) -> Result<()> {
        Ok(()) // No-op
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Enrichment;

    #[test]
    fn test_text_hash_consistency() {
        assert_eq!(calculate_text_hash("| MER 24 |"), calculate_text_hash("| MER 24 |"));
        assert_ne!(calculate_text_hash("| MER 24 |"), calculate_text_hash("| JEU 25 |"));
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        let key = EnrichmentCacheKey::new("Zootopie 2", "tmdb", "fr-FR");

        assert!(storage.get_enrichment(&key).unwrap().is_none());

        let enrichment = Enrichment {
            original_title: Some("Zootopia 2".to_string()),
            original_language: Some("en".to_string()),
            ..Enrichment::default()
        };
        storage
            .store_enrichment(&key, &EnrichmentCacheValue::new(Some(enrichment.clone())))
            .unwrap();

        let cached = storage.get_enrichment(&key).unwrap().unwrap();
        assert_eq!(cached.enrichment, Some(enrichment));
        assert!(temp_dir.path().join("enrichment").is_dir());
    }

    #[test]
    fn test_noop_storage_always_misses() {
        let storage = NoOpStorage::new();
        let key = EnrichmentCacheKey::new("Film", "tmdb", "fr-FR");
        storage.store_enrichment(&key, &EnrichmentCacheValue::new(None)).unwrap();
        assert!(storage.get_enrichment(&key).unwrap().is_none());
    }
}
