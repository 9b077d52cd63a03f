use super::provider::MetadataProvider;
use crate::config::EnrichmentConfig;
use crate::error::EnrichmentError;
use crate::types::Enrichment;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const API_KEY_ENV: &str = "TMDB_API_KEY";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Blocking client for The Movie Database
pub struct TmdbProvider {
    agent: ureq::Agent,
    api_key: String,
    api_base: String,
    image_base: String,
    language: String,
    max_cast: usize,
}

// ===== WIRE TYPES =====

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<SearchResult>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchResult {
    id: Option<u64>,
    original_title: Option<String>,
    original_language: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MovieDetails {
    runtime: Option<u32>,
    release_date: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    genres: Option<Vec<Named>>,
    credits: Option<Credits>,
    videos: Option<Videos>,
}

#[derive(Debug, Default, Deserialize)]
struct Named {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Credits {
    cast: Option<Vec<Named>>,
    crew: Option<Vec<CrewMember>>,
}

#[derive(Debug, Default, Deserialize)]
struct CrewMember {
    name: Option<String>,
    job: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Videos {
    results: Option<Vec<Video>>,
}

#[derive(Debug, Default, Deserialize)]
struct Video {
    site: Option<String>,
    key: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

// ===== FIELD MAPPING =====

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn join_names<'a, I: Iterator<Item = &'a str>>(names: I) -> Option<String> {
    let names: Vec<&str> = names.filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        None
    } else {
        Some(names.join(", "))
    }
}

/// Runtime in minutes -> "1h45" / "2h"; zero or unknown runtime is no duration
fn format_duration(minutes: Option<u32>) -> Option<String> {
    let minutes = minutes.filter(|m| *m > 0)?;
    let (hours, rest) = (minutes / 60, minutes % 60);
    if rest > 0 {
        Some(format!("{hours}h{rest:02}"))
    } else {
        Some(format!("{hours}h"))
    }
}

/// YouTube videos only: trailers first, then teasers, then anything else.
/// Ties keep catalog order.
fn pick_trailer_url(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .filter(|v| v.site.as_deref() == Some("YouTube"))
        .filter_map(|v| {
            let key = v.key.as_deref().filter(|k| !k.is_empty())?;
            let rank = match v.kind.as_deref().map(str::to_lowercase).as_deref() {
                Some("trailer") => 0,
                Some("teaser") => 1,
                _ => 2,
            };
            Some((rank, key))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, key)| format!("{YOUTUBE_WATCH_URL}{key}"))
}

fn build_enrichment(
    search: SearchResult,
    details: Option<MovieDetails>,
    image_base: &str,
    max_cast: usize,
) -> Enrichment {
    let mut enrichment = Enrichment {
        original_title: non_empty(search.original_title),
        original_language: non_empty(search.original_language),
        overview: non_empty(search.overview),
        release_date: non_empty(search.release_date),
        ..Enrichment::default()
    };

    let Some(details) = details else {
        return enrichment;
    };

    let videos = details.videos.and_then(|v| v.results).unwrap_or_default();
    enrichment.trailer_url = pick_trailer_url(&videos);
    enrichment.duration = format_duration(details.runtime);
    if let Some(release_date) = non_empty(details.release_date) {
        enrichment.release_date = Some(release_date);
    }
    if let Some(poster) = non_empty(details.poster_path) {
        enrichment.poster_url = Some(format!("{image_base}/w342{poster}"));
        enrichment.poster_url_w780 = Some(format!("{image_base}/w780{poster}"));
    }
    if let Some(backdrop) = non_empty(details.backdrop_path) {
        enrichment.backdrop_url = Some(format!("{image_base}/w780{backdrop}"));
    }

    let genres = details.genres.unwrap_or_default();
    enrichment.genre = join_names(genres.iter().filter_map(|g| g.name.as_deref()));

    let credits = details.credits.unwrap_or_default();
    let crew = credits.crew.unwrap_or_default();
    enrichment.director = join_names(
        crew.iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
            .filter_map(|c| c.name.as_deref()),
    );
    let cast = credits.cast.unwrap_or_default();
    enrichment.cast = join_names(cast.iter().take(max_cast).filter_map(|c| c.name.as_deref()));

    enrichment
}

// ===== CLIENT =====

impl TmdbProvider {
    pub fn new(api_key: &str, config: &EnrichmentConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            api_key: api_key.to_string(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            image_base: config.image_base.trim_end_matches('/').to_string(),
            language: config.language.clone(),
            max_cast: config.max_cast,
        }
    }

    /// Build a client from the `TMDB_API_KEY` environment variable
    pub fn from_env(config: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(EnrichmentError::NotConfigured(format!("{API_KEY_ENV} is not set")));
        }
        Ok(Self::new(api_key, config))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, EnrichmentError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self
            .agent
            .get(&url)
            .query("api_key", &self.api_key)
            .query("language", &self.language);
        for (name, value) in query {
            request = request.query(name, value);
        }

        match request.call() {
            Ok(response) => response
                .into_json::<T>()
                .map_err(|e| EnrichmentError::Payload(e.to_string())),
            Err(ureq::Error::Status(status, _)) => Err(EnrichmentError::Status { status, url }),
            Err(e) => Err(EnrichmentError::Transport(e.to_string())),
        }
    }

    fn search(&self, title: &str) -> Result<Option<SearchResult>, EnrichmentError> {
        let response: SearchResponse = self.get_json(
            "/search/movie",
            &[("query", title), ("include_adult", "false")],
        )?;
        Ok(response.results.unwrap_or_default().into_iter().next())
    }

    fn details(&self, movie_id: u64) -> Result<MovieDetails, EnrichmentError> {
        self.get_json(
            &format!("/movie/{movie_id}"),
            &[("append_to_response", "credits,videos")],
        )
    }
}

impl MetadataProvider for TmdbProvider {
    fn lookup(&self, title: &str) -> Result<Option<Enrichment>, EnrichmentError> {
        if title.trim().is_empty() {
            return Ok(None);
        }

        let Some(first) = self.search(title)? else {
            tracing::debug!(title, "No catalog match");
            return Ok(None);
        };

        // A failed details call keeps what the search already told us
        let details = match first.id {
            Some(id) => match self.details(id) {
                Ok(details) => Some(details),
                Err(e) => {
                    tracing::warn!(title, movie_id = id, error = %e, "Movie details unavailable");
                    None
                }
            },
            None => None,
        };

        Ok(Some(build_enrichment(first, details, &self.image_base, self.max_cast)))
    }

    fn name(&self) -> &str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

    fn details_fixture() -> MovieDetails {
        serde_json::from_str(
            r#"{
                "runtime": 108,
                "release_date": "2025-11-26",
                "poster_path": "/poster.jpg",
                "backdrop_path": "/backdrop.jpg",
                "genres": [{"name": "Animation"}, {"name": "Comédie"}],
                "credits": {
                    "cast": [
                        {"name": "A"}, {"name": "B"}, {"name": "C"},
                        {"name": "D"}, {"name": "E"}, {"name": "F"}
                    ],
                    "crew": [
                        {"name": "Jared Bush", "job": "Director"},
                        {"name": "Someone", "job": "Producer"},
                        {"name": "Byron Howard", "job": "Director"}
                    ]
                },
                "videos": {"results": [
                    {"site": "Vimeo", "key": "v1", "type": "Trailer"},
                    {"site": "YouTube", "key": "teaser1", "type": "Teaser"},
                    {"site": "YouTube", "key": "trailer1", "type": "Trailer"},
                    {"site": "YouTube", "key": "trailer2", "type": "Trailer"}
                ]}
            }"#,
        )
        .unwrap()
    }

    fn search_fixture() -> SearchResult {
        SearchResult {
            id: Some(1084242),
            original_title: Some("Zootopia 2".to_string()),
            original_language: Some("en".to_string()),
            overview: Some("Judy et Nick...".to_string()),
            release_date: Some("".to_string()),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(108)), Some("1h48".to_string()));
        assert_eq!(format_duration(Some(120)), Some("2h".to_string()));
        assert_eq!(format_duration(Some(65)), Some("1h05".to_string()));
        assert_eq!(format_duration(Some(0)), None);
        assert_eq!(format_duration(None), None);
    }

    #[test]
    fn test_trailer_ranking() {
        let details = details_fixture();
        let videos = details.videos.and_then(|v| v.results).unwrap();
        assert_eq!(
            pick_trailer_url(&videos),
            Some("https://www.youtube.com/watch?v=trailer1".to_string())
        );
        assert_eq!(pick_trailer_url(&[]), None);
    }

    #[test]
    fn test_build_enrichment_from_details() {
        let enrichment = build_enrichment(search_fixture(), Some(details_fixture()), IMAGE_BASE, 5);
        assert_eq!(enrichment.original_title.as_deref(), Some("Zootopia 2"));
        assert_eq!(enrichment.original_language.as_deref(), Some("en"));
        assert_eq!(enrichment.duration.as_deref(), Some("1h48"));
        assert_eq!(enrichment.release_date.as_deref(), Some("2025-11-26"));
        assert_eq!(enrichment.genre.as_deref(), Some("Animation, Comédie"));
        assert_eq!(enrichment.director.as_deref(), Some("Jared Bush, Byron Howard"));
        assert_eq!(enrichment.cast.as_deref(), Some("A, B, C, D, E"));
        assert_eq!(
            enrichment.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w342/poster.jpg")
        );
        assert_eq!(
            enrichment.poster_url_w780.as_deref(),
            Some("https://image.tmdb.org/t/p/w780/poster.jpg")
        );
        assert_eq!(
            enrichment.backdrop_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w780/backdrop.jpg")
        );
    }

    #[test]
    fn test_build_enrichment_without_details_keeps_search_fields() {
        let enrichment = build_enrichment(search_fixture(), None, IMAGE_BASE, 5);
        assert_eq!(enrichment.original_title.as_deref(), Some("Zootopia 2"));
        assert_eq!(enrichment.overview.as_deref(), Some("Judy et Nick..."));
        assert_eq!(enrichment.release_date, None);
        assert_eq!(enrichment.trailer_url, None);
        assert_eq!(enrichment.director, None);
    }

    #[test]
    fn test_search_response_tolerates_null_results() {
        let response: SearchResponse = serde_json::from_str(r#"{"results": null}"#).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_from_env_without_key_is_not_configured() {
        if std::env::var(API_KEY_ENV).is_ok() {
            return;
        }
        let result = TmdbProvider::from_env(&EnrichmentConfig::default());
        assert!(matches!(result, Err(EnrichmentError::NotConfigured(_))));
    }
}
