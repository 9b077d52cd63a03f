use super::matching::best_match_title;
use crate::types::{Enrichment, MovieBlurb, MovieEntry, MovieSource, ScreeningRecord};
use std::collections::{BTreeSet, HashMap};

/// One catalog entry per distinct screening title, sorted by title.
///
/// Descriptive fields come from the printed blurb when one matches the
/// title, otherwise from the metadata catalog. The metadata catalog always
/// supplies original title and language, trailer, release date and artwork.
pub fn build_movies(
    screenings: &[ScreeningRecord],
    blurbs: &[MovieBlurb],
    enrichments: &HashMap<String, Enrichment>,
    match_threshold: f64,
) -> Vec<MovieEntry> {
    let titles: BTreeSet<&str> = screenings
        .iter()
        .map(|s| s.movie_title.as_str())
        .filter(|t| !t.is_empty())
        .collect();

    titles
        .into_iter()
        .map(|title| {
            let blurb = best_match_title(title, blurbs.iter().map(|b| b.title.as_str()), match_threshold)
                .and_then(|matched| blurbs.iter().find(|b| b.title == matched));
            build_entry(title, blurb, enrichments.get(title))
        })
        .collect()
}

fn build_entry(title: &str, blurb: Option<&MovieBlurb>, enrichment: Option<&Enrichment>) -> MovieEntry {
    let mut entry = MovieEntry::new(title);

    if let Some(info) = enrichment {
        entry.original_title = info.original_title.clone();
        entry.original_language = info.original_language.clone();
        entry.trailer_url = info.trailer_url.clone();
        entry.release_date = info.release_date.clone();
        entry.poster_url = info.poster_url.clone();
        entry.poster_url_w780 = info.poster_url_w780.clone();
        entry.backdrop_url = info.backdrop_url.clone();
    }

    match (blurb, enrichment) {
        (Some(blurb), _) => {
            entry.director = blurb.director.clone();
            entry.cast = blurb.cast.clone();
            entry.genre = blurb.genre.clone();
            entry.duration = blurb.duration.clone();
            entry.blurb = blurb.blurb.clone();
            entry.source = Some(MovieSource::Pdf);
        }
        (None, Some(info)) => {
            entry.director = info.director.clone();
            entry.cast = info.cast.clone();
            entry.genre = info.genre.clone();
            entry.duration = info.duration.clone();
            entry.blurb = info.overview.clone();
            entry.source = Some(MovieSource::Tmdb);
        }
        (None, None) => {}
    }

    entry
}
