// Metadata provider abstraction
//
// The movie catalog lives outside this crate. Anything able to answer
// "what do you know about this title" can enrich a program.

use crate::error::EnrichmentError;
use crate::types::Enrichment;

/// Looks movie titles up in an external catalog.
///
/// `Ok(None)` is a clean miss (the catalog has no such title). `Err` is a
/// collaborator fault; callers degrade it to "unenriched" for that title.
pub trait MetadataProvider: Send + Sync {
    fn lookup(&self, title: &str) -> Result<Option<Enrichment>, EnrichmentError>;

    /// Provider name, part of the persistent cache key
    fn name(&self) -> &str;
}
