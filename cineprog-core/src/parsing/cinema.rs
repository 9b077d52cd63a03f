// Cinema detector: table-driven substring triggers over a normalized line.

use crate::config::CinemaTrigger;
use deunicode::deunicode;

/// Uppercase, fold accents, replace anything that is not a letter or a
/// space with a space, then collapse whitespace.
///
/// Folding happens before the letter filter, so `"Château-Chinon"` and
/// `"CHATEAU CHINON"` normalize to the same string.
pub fn normalize_cinema_text(raw: &str) -> String {
    let folded = deunicode(&raw.to_uppercase()).to_uppercase();
    let letters: String = folded
        .chars()
        .map(|c| if c.is_ascii_uppercase() { c } else { ' ' })
        .collect();
    letters.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub struct CinemaDetector {
    entries: Vec<(String, Vec<String>)>,
}

impl CinemaDetector {
    pub fn new(cinemas: &[CinemaTrigger]) -> Self {
        let entries = cinemas
            .iter()
            .map(|cinema| {
                let triggers = cinema
                    .triggers
                    .iter()
                    .map(|t| normalize_cinema_text(t))
                    .filter(|t| !t.is_empty())
                    .collect();
                (cinema.display_name.clone(), triggers)
            })
            .collect();
        Self { entries }
    }

    /// Canonical display name of the first cinema whose trigger appears in
    /// the line, if any
    pub fn detect(&self, raw: &str) -> Option<&str> {
        if raw.is_empty() {
            return None;
        }
        let text = normalize_cinema_text(raw);
        if text.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(_, triggers)| triggers.iter().any(|t| text.contains(t.as_str())))
            .map(|(name, _)| name.as_str())
    }
}

impl Default for CinemaDetector {
    fn default() -> Self {
        Self::new(&crate::config::ProgramConfig::default().cinemas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_accents_and_punctuation() {
        assert_eq!(normalize_cinema_text("Château-Chinon – L’Étoile"), "CHATEAU CHINON L ETOILE");
        assert_eq!(normalize_cinema_text("  ## luzy  (58) "), "LUZY");
    }

    #[test]
    fn test_detects_luzy_in_any_case() {
        let detector = CinemaDetector::default();
        assert_eq!(detector.detect("## Cinéma de luzy"), Some("LUZY – Le Vox"));
        assert_eq!(detector.detect("LUZY"), Some("LUZY – Le Vox"));
        assert_eq!(detector.detect("| LuZy – le vox | |"), Some("LUZY – Le Vox"));
    }

    #[test]
    fn test_detects_accented_trigger() {
        let detector = CinemaDetector::default();
        assert_eq!(
            detector.detect("CHÂTEAU-CHINON"),
            Some("CHÂTEAU-CHINON – L’Étoile")
        );
        assert_eq!(
            detector.detect("Saint-Honoré-les-Bains"),
            Some("SAINT-HONORÉ-LES-BAINS – Le Sélect")
        );
        assert_eq!(
            detector.detect("Ouroux en Morvan"),
            Some("OUROUX-EN-MORVAN – Le Clap")
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        let detector = CinemaDetector::default();
        assert_eq!(detector.detect("| Film X | 20h |"), None);
        assert_eq!(detector.detect(""), None);
        assert_eq!(detector.detect("| 20h30 | 14h |"), None);
    }

    #[test]
    fn test_custom_table_is_data_only() {
        let detector = CinemaDetector::new(&[CinemaTrigger::new("Le Rex", &["rex"])]);
        assert_eq!(detector.detect("Cinéma Le Rex"), Some("Le Rex"));
        assert_eq!(detector.detect("LUZY"), None);
    }
}
