//! Cache location for enrichment lookups shared across CLI invocations

use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Default cache directory (~/.cache/cineprog on all Unix platforms)
pub fn default_cache_dir() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        // On Windows, use the standard local app data location
        let base = dirs::data_local_dir()
            .ok_or_else(|| anyhow!("Could not determine local data directory"))?;
        Ok(base.join("cineprog").join("cache"))
    }

    #[cfg(not(windows))]
    {
        // ~/.cache rather than platform-specific paths like ~/Library/Caches
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home.join(".cache").join("cineprog"))
    }
}

/// Explicit directory wins, otherwise the default one
pub fn resolve_cache_dir(explicit: Option<&str>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => default_cache_dir(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_cache_dir_wins() {
        assert_eq!(
            resolve_cache_dir(Some("/tmp/cineprog-cache")).unwrap(),
            PathBuf::from("/tmp/cineprog-cache")
        );
    }

    #[test]
    fn test_default_cache_dir_is_app_specific() {
        if let Ok(dir) = default_cache_dir() {
            assert!(dir.to_string_lossy().contains("cineprog"));
        }
    }
}
