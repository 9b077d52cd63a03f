use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ===== SCAN INPUT TYPES =====
// A program arrives as one text blob per source page. Pages and the lines
// inside them are order-significant: the scan carries context forward.

/// One page of OCR output, newline-delimited
pub type PageText = String;

/// Ordered, trimmed cells of a pipe-delimited table line (always >= 2 cells)
pub type Row = Vec<String>;

// ===== SCREENING TYPES =====

/// Language version of a screening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Version {
    /// Dubbed in French
    #[serde(rename = "VF")]
    Vf,
    /// Original version with French subtitles
    #[serde(rename = "VOST")]
    Vost,
}

impl Version {
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::Vf => "VF",
            Version::Vost => "VOST",
        }
    }

    /// Parse a version token, case-insensitive
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_uppercase().as_str() {
            "VF" => Some(Version::Vf),
            "VOST" => Some(Version::Vost),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single screening event. All five fields form the identity key:
/// two screenings comparing equal are the same event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Screening {
    pub cinema: String,
    pub movie_title: String,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    /// Display time, e.g. `20h30` or `20h`
    pub time: String,
    pub version: Option<Version>,
}

/// A screening plus the enrichment fields exposed in the program output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningRecord {
    pub cinema: String,
    pub movie_title: String,
    pub date: NaiveDate,
    pub time: String,
    pub version: Option<Version>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

impl From<Screening> for ScreeningRecord {
    fn from(screening: Screening) -> Self {
        Self {
            cinema: screening.cinema,
            movie_title: screening.movie_title,
            date: screening.date,
            time: screening.time,
            version: screening.version,
            original_title: None,
            original_language: None,
            trailer_url: None,
        }
    }
}

// ===== ENRICHMENT TYPES =====

/// Movie metadata from an external catalog. Fixed shape: a field the
/// catalog did not provide is `None`, never a missing key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrichment {
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub trailer_url: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub poster_url_w780: Option<String>,
    pub backdrop_url: Option<String>,
}

// ===== CATALOG TYPES =====

/// Where the descriptive fields of a catalog entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieSource {
    Pdf,
    Tmdb,
}

/// Descriptive text printed in the program next to a movie title
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieBlurb {
    pub title: String,
    pub meta_raw: String,
    pub blurb: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
}

/// One entry of the movie catalog, keyed by program title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    pub movie_title: String,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub blurb: Option<String>,
    pub source: Option<MovieSource>,
    pub trailer_url: Option<String>,
    pub release_date: Option<String>,
    pub poster_url: Option<String>,
    pub poster_url_w780: Option<String>,
    pub backdrop_url: Option<String>,
}

impl MovieEntry {
    pub fn new(movie_title: &str) -> Self {
        Self {
            movie_title: movie_title.to_string(),
            original_title: None,
            original_language: None,
            director: None,
            cast: None,
            genre: None,
            duration: None,
            blurb: None,
            source: None,
            trailer_url: None,
            release_date: None,
            poster_url: None,
            poster_url_w780: None,
            backdrop_url: None,
        }
    }
}

// ===== RUN OUTPUT =====

/// Everything a run produces: the screening list and the movie catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramOutput {
    pub screenings: Vec<ScreeningRecord>,
    pub movies: Vec<MovieEntry>,
}
