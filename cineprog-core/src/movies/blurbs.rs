// Descriptive blurbs printed on the non-tabular pages of a program:
//
//   ZOOTOPIE 2
//   De Jared Bush - Avec ... - 1h48 - Animation
//   Judy et Nick reprennent du service...

use crate::typography::normalize_french_typography;
use crate::types::{MovieBlurb, PageText};
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+h(\d{2})?\b").expect("duration pattern is valid"));

const MIN_TITLE_CHARS: usize = 3;
const MIN_UPPERCASE_RATIO: f64 = 0.6;

fn strip_heading_marks(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c| c == '#' || c == ' ')
        .trim()
}

fn is_title_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, 'À'..='Ö' | 'Ø'..='ö' | 'ø'..='ÿ')
}

/// Recognizes movie title lines among the free text of a blurb page
pub struct TitleDetector {
    ignored_headings: Vec<String>,
}

impl TitleDetector {
    pub fn new(ignored_headings: &[String]) -> Self {
        Self {
            ignored_headings: ignored_headings.iter().map(|h| h.to_uppercase()).collect(),
        }
    }

    /// Mostly-uppercase short lines that are not credits, prices, links or
    /// section headings
    pub fn is_title_candidate(&self, line: &str) -> bool {
        let stripped = strip_heading_marks(line);
        if stripped.chars().count() < MIN_TITLE_CHARS {
            return false;
        }
        if stripped.contains('|') || stripped.starts_with("![") {
            return false;
        }

        let lower = stripped.to_lowercase();
        if lower.starts_with("de ") || lower.starts_with("avec ") {
            return false;
        }
        if lower.contains("http") || lower.contains("www.") || stripped.contains('€') {
            return false;
        }

        let upper = stripped.to_uppercase();
        if upper.starts_with("AVANT PREMI") || self.ignored_headings.iter().any(|h| *h == upper) {
            return false;
        }

        let letters: Vec<char> = stripped.chars().filter(|c| is_title_letter(*c)).collect();
        if letters.is_empty() {
            return false;
        }
        let uppercase = letters.iter().filter(|c| c.is_uppercase()).count();
        uppercase as f64 / letters.len() as f64 >= MIN_UPPERCASE_RATIO
    }
}

/// Credits parsed out of a meta line such as
/// `De Jared Bush - Avec Ginnifer Goodwin - 1h48 - Animation`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaFields {
    pub director: Option<String>,
    pub cast: Option<String>,
    pub genre: Option<String>,
    pub duration: Option<String>,
}

pub fn parse_meta_line(line: &str) -> MetaFields {
    let parts: Vec<&str> = line
        .split(" - ")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    let mut meta = MetaFields::default();
    for part in &parts {
        if let Some(director) = part.strip_prefix("De ") {
            meta.director = Some(director.trim().to_string());
        } else if let Some(cast) = part.strip_prefix("Avec ") {
            meta.cast = Some(cast.trim().to_string());
        } else if let Some(m) = DURATION_RE.find(part) {
            meta.duration = Some(m.as_str().to_string());
        }
    }

    // Genre is the last part that is neither a credit nor a duration
    meta.genre = parts
        .iter()
        .rev()
        .find(|p| !p.starts_with("De ") && !p.starts_with("Avec ") && !DURATION_RE.is_match(p))
        .map(|p| p.to_string());

    meta
}

struct PendingBlurb<'a> {
    title: &'a str,
    meta: Option<&'a str>,
    body: Vec<&'a str>,
}

impl PendingBlurb<'_> {
    fn finish(self) -> Option<MovieBlurb> {
        let meta_raw = self.meta?;
        let fields = parse_meta_line(meta_raw);
        let body = self.body.join(" ");
        let body = body.trim();
        Some(MovieBlurb {
            title: self.title.to_string(),
            meta_raw: meta_raw.to_string(),
            blurb: (!body.is_empty()).then(|| normalize_french_typography(body)),
            director: fields.director,
            cast: fields.cast,
            genre: fields.genre,
            duration: fields.duration,
        })
    }
}

fn push_blurb(blurbs: &mut Vec<MovieBlurb>, blurb: MovieBlurb) {
    // A title printed twice keeps its first position and its latest text
    match blurbs.iter_mut().find(|b| b.title == blurb.title) {
        Some(existing) => *existing = blurb,
        None => blurbs.push(blurb),
    }
}

/// Collect blurbs from every page that carries no table. A title only
/// yields a blurb once a meta line follows it.
pub fn extract_movie_blurbs(pages: &[PageText], detector: &TitleDetector) -> Vec<MovieBlurb> {
    let mut blurbs = Vec::new();

    for page in pages.iter().filter(|p| !p.trim().is_empty() && !p.contains('|')) {
        let mut pending: Option<PendingBlurb> = None;

        for line in page.lines().map(str::trim) {
            if line.is_empty() || line.starts_with("![") {
                continue;
            }

            if detector.is_title_candidate(line) {
                if let Some(blurb) = pending.take().and_then(PendingBlurb::finish) {
                    push_blurb(&mut blurbs, blurb);
                }
                pending = Some(PendingBlurb {
                    title: strip_heading_marks(line),
                    meta: None,
                    body: Vec::new(),
                });
                continue;
            }

            if let Some(current) = pending.as_mut() {
                if current.meta.is_none() && (line.starts_with("De ") || line.contains(" - ")) {
                    current.meta = Some(line);
                } else {
                    current.body.push(line);
                }
            }
        }

        if let Some(blurb) = pending.take().and_then(PendingBlurb::finish) {
            push_blurb(&mut blurbs, blurb);
        }
    }

    tracing::debug!(blurbs = blurbs.len(), "Extracted movie blurbs");
    blurbs
}
