// All core functionality is in cineprog-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod paths;
pub mod settings;

// Re-export core types for convenience
pub use cineprog_core::*;

// Re-export CLI utilities
pub use paths::{default_cache_dir, resolve_cache_dir};
pub use settings::{load_config, load_rules};
