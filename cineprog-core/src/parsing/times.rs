// Time cell expander: one table cell -> ordered (time, version) pairs.

use crate::types::Version;
use once_cell::sync::Lazy;
use regex::Regex;

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})\s*H\s*(\d{2})?\b").expect("time pattern is valid")
});

static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(VOST|VF)\b").expect("version pattern is valid"));

/// Marker printed next to special screenings; treated as whitespace
const WILDCARD_MARKER: char = '*';

/// Characters inspected on each side of a time for a version tag
const VERSION_WINDOW: usize = 8;

fn format_time(hour: &str, minutes: Option<&str>) -> String {
    let hour = hour.parse::<u32>().map(|h| h.to_string()).unwrap_or_else(|_| hour.to_string());
    match minutes {
        Some(mm) => format!("{hour}h{mm}"),
        None => format!("{hour}h"),
    }
}

fn find_version(window: &str) -> Option<Version> {
    VERSION_RE
        .captures(window)
        .and_then(|c| c.get(1))
        .and_then(|m| Version::from_token(m.as_str()))
}

/// Extract every screening time in a cell, left to right.
///
/// Each time looks for a version tag in the few characters right after it,
/// then right before it. A tag is not consumed, so two adjacent times may
/// both pick it up.
pub fn parse_time_cell(cell_text: &str) -> Vec<(String, Option<Version>)> {
    if cell_text.is_empty() {
        return Vec::new();
    }

    let text = cell_text.to_uppercase().replace(WILDCARD_MARKER, " ");

    TIME_RE
        .captures_iter(&text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let time = format_time(captures.get(1)?.as_str(), captures.get(2).map(|m| m.as_str()));

            let after: String = text[whole.end()..].chars().take(VERSION_WINDOW).collect();
            let version = find_version(&after).or_else(|| {
                let preceding: Vec<char> = text[..whole.start()].chars().collect();
                let start = preceding.len().saturating_sub(VERSION_WINDOW);
                let before: String = preceding[start..].iter().collect();
                find_version(&before)
            });

            Some((time, version))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn times(cell: &str) -> Vec<(String, Option<Version>)> {
        parse_time_cell(cell)
    }

    #[test]
    fn test_two_times_with_trailing_version() {
        assert_eq!(
            times("16h30 / 20h VOST"),
            vec![("16h30".to_string(), None), ("20h".to_string(), Some(Version::Vost))]
        );
    }

    #[test]
    fn test_version_before_time() {
        assert_eq!(times("VF 14h"), vec![("14h".to_string(), Some(Version::Vf))]);
    }

    #[test]
    fn test_version_after_wins_over_before() {
        assert_eq!(times("VF 18h VOST"), vec![("18h".to_string(), Some(Version::Vost))]);
    }

    #[test]
    fn test_lowercase_and_spaced_time() {
        assert_eq!(times("20 h 45 vost"), vec![("20h45".to_string(), Some(Version::Vost))]);
    }

    #[test]
    fn test_leading_zero_hour_is_dropped() {
        assert_eq!(times("09h15"), vec![("9h15".to_string(), None)]);
    }

    #[test]
    fn test_wildcard_marker_is_ignored() {
        assert_eq!(times("20h30*"), vec![("20h30".to_string(), None)]);
        assert_eq!(times("*VOST*14h"), vec![("14h".to_string(), Some(Version::Vost))]);
    }

    #[test]
    fn test_version_token_is_not_consumed() {
        // the VOST sits within reach of both times
        assert_eq!(
            times("14h VOST 18h"),
            vec![("14h".to_string(), Some(Version::Vost)), ("18h".to_string(), Some(Version::Vost))]
        );
    }

    #[test]
    fn test_vostfr_is_not_a_version() {
        assert_eq!(times("20h VOSTFR"), vec![("20h".to_string(), None)]);
    }

    #[test]
    fn test_empty_or_timeless_cells() {
        assert!(times("").is_empty());
        assert!(times("Relâche").is_empty());
        assert!(times("-").is_empty());
    }

    #[test]
    fn test_accented_text_around_time() {
        assert_eq!(times("Séance 20h VF"), vec![("20h".to_string(), Some(Version::Vf))]);
    }
}
