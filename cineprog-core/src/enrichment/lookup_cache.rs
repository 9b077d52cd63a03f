use super::provider::MetadataProvider;
use crate::cache::{EnrichmentCacheKey, EnrichmentCacheValue};
use crate::storage::EnrichmentStorage;
use crate::types::Enrichment;
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Per-run memo of metadata lookups, keyed by program title.
///
/// Each title reaches the provider at most once per run. A provider fault
/// is remembered as "unenriched" for that title only; the rest of the run
/// is unaffected. Persistent storage, when configured, is consulted before
/// the provider and fed with every clean answer (hit or miss).
pub struct EnrichmentCache<'a> {
    provider: &'a dyn MetadataProvider,
    storage: &'a dyn EnrichmentStorage,
    language: String,
    entries: HashMap<String, Option<Enrichment>>,
}

impl<'a> EnrichmentCache<'a> {
    pub fn new(provider: &'a dyn MetadataProvider, storage: &'a dyn EnrichmentStorage, language: &str) -> Self {
        Self {
            provider,
            storage,
            language: language.to_string(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every distinct, not yet cached title in parallel
    pub fn prefetch<'t, I>(&mut self, titles: I)
    where
        I: IntoIterator<Item = &'t str>,
    {
        let pending: Vec<&str> = titles
            .into_iter()
            .filter(|title| !self.entries.contains_key(*title))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if pending.is_empty() {
            return;
        }

        tracing::info!(titles = pending.len(), provider = self.provider.name(), "Fetching movie metadata");

        let resolved: Vec<(String, Option<Enrichment>)> = {
            let this = &*self;
            pending
                .par_iter()
                .map(|title| (title.to_string(), this.resolve(title)))
                .collect()
        };
        self.entries.extend(resolved);
    }

    /// Cached lookup, resolving on first use
    pub fn get(&mut self, title: &str) -> Option<&Enrichment> {
        if !self.entries.contains_key(title) {
            let resolved = self.resolve(title);
            self.entries.insert(title.to_string(), resolved);
        }
        self.entries.get(title).and_then(Option::as_ref)
    }

    /// Consume the memo, keeping only titles that were actually enriched
    pub fn into_resolved(self) -> HashMap<String, Enrichment> {
        self.entries
            .into_iter()
            .filter_map(|(title, enrichment)| enrichment.map(|e| (title, e)))
            .collect()
    }

    fn resolve(&self, title: &str) -> Option<Enrichment> {
        if title.trim().is_empty() {
            return None;
        }

        let key = EnrichmentCacheKey::new(title, self.provider.name(), &self.language);
        match self.storage.get_enrichment(&key) {
            Ok(Some(cached)) => {
                tracing::debug!(title, "Enrichment cache hit");
                return cached.enrichment;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(title, error = %e, "Enrichment cache read failed"),
        }

        match self.provider.lookup(title) {
            Ok(found) => {
                let value = EnrichmentCacheValue::new(found.clone());
                if let Err(e) = self.storage.store_enrichment(&key, &value) {
                    tracing::warn!(title, error = %e, "Enrichment cache write failed");
                }
                found
            }
            Err(e) => {
                tracing::warn!(
                    title,
                    provider = self.provider.name(),
                    error = %e,
                    "Metadata lookup failed, leaving title unenriched"
                );
                None
            }
        }
    }
}
