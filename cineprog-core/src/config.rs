use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "fr-FR".to_string()
}

fn default_max_cast() -> usize {
    5
}

fn default_match_threshold() -> f64 {
    0.85
}

fn default_cinemas() -> Vec<CinemaTrigger> {
    vec![
        CinemaTrigger::new("LUZY – Le Vox", &["LUZY"]),
        CinemaTrigger::new("CHÂTEAU-CHINON – L’Étoile", &["CHATEAU"]),
        CinemaTrigger::new("OUROUX-EN-MORVAN – Le Clap", &["OUROUX", "MORVAN"]),
        CinemaTrigger::new("SAINT-HONORÉ-LES-BAINS – Le Sélect", &["BAINS"]),
    ]
}

fn default_ignored_headings() -> Vec<String> {
    [
        "DOCUMENTAIRES",
        "ÉVÉNEMENTS",
        "EVENEMENTS",
        "JEUNE PUBLIC & EN FAMILLE",
        "JEUNE PUBLIC",
        "CIN'ESPIÈGLE",
        "CIN'ESPIEGLE",
        "CINÉ-CONCERT",
        "CINE-CONCERT",
        "LES PIONNIERS DU CINEMA",
        "LES PIONNIERS DU CINÉMA",
        "CLAP CLASSIC",
        "SEANCE PATRIMOINE",
        "SÉANCE PATRIMOINE",
        "FAITS DIVERS",
        "AVANT PREMIERE",
        "AVANT PREMIÈRE",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Run parameters for one extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramConfig {
    /// Fixed target year used to build every calendar date of the run.
    /// Required in config files: nothing in a program page states the year.
    pub year: i32,
    /// Cinema detector table, checked in order; first match wins
    #[serde(default = "default_cinemas")]
    pub cinemas: Vec<CinemaTrigger>,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// One canonical cinema and the substrings that identify it on a line.
/// Triggers are compared against the line after uppercasing and folding
/// accents, so `"CHATEAU"` also matches `"Château"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaTrigger {
    pub display_name: String,
    pub triggers: Vec<String>,
}

impl CinemaTrigger {
    pub fn new(display_name: &str, triggers: &[&str]) -> Self {
        Self {
            display_name: display_name.to_string(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Whether to query the metadata catalog at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
    /// Catalog locale for titles and overviews
    #[serde(default = "default_language")]
    pub language: String,
    /// Number of top-billed cast members to keep
    #[serde(default = "default_max_cast")]
    pub max_cast: usize,
    /// Directory for the persistent lookup cache (None disables it)
    #[serde(default)]
    pub cache_dir: Option<String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: default_api_base(),
            image_base: default_image_base(),
            language: default_language(),
            max_cast: default_max_cast(),
            cache_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Minimum similarity for a program title to claim a printed blurb
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// Section headings that look like titles but never are
    #[serde(default = "default_ignored_headings")]
    pub ignored_headings: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            ignored_headings: default_ignored_headings(),
        }
    }
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::for_year(2025)
    }
}

impl ProgramConfig {
    /// Built-in cinema table and enrichment settings for the given year
    pub fn for_year(year: i32) -> Self {
        Self {
            year,
            cinemas: default_cinemas(),
            enrichment: EnrichmentConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }

    /// Load config from file path (YAML or JSON)
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: ProgramConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }
}

// ===== RULE SET =====
// Declarative post-processing rules, kept as data so the file can evolve
// independently of the interpretation engine.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRules {
    /// Force `VF` when the catalog reports a non-French original language
    /// and the program did not tag the screening `VOST`
    #[serde(default)]
    pub set_vf_if_original_language_not_fr_and_not_vost: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Raw cinema name -> canonical name
    #[serde(default)]
    pub cinema_aliases: HashMap<String, String>,
    /// Raw title -> corrected title
    #[serde(default)]
    pub title_fixes: HashMap<String, String>,
    #[serde(default)]
    pub version_rules: VersionRules,
}

impl RuleSet {
    /// Load a rule file (YAML or JSON). A missing file is an error here:
    /// the caller decides whether running without rules is acceptable.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file: {}", path.display()))?;
        // A `null` document means "no rules"
        let rules: Option<RuleSet> = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid rules file: {}", path.display()))?;
        Ok(rules.unwrap_or_default())
    }
}
