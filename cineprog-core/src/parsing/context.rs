// Scan-wide state and the month-range detector.

use chrono::NaiveDate;
use deunicode::deunicode;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// "DU 24 AU 30 DÉCEMBRE": captures the month word of a week range
static WEEK_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"DU\s+\d+\s+AU\s+\d+\s+(\p{Lu}+)").expect("week range pattern is valid")
});

/// Mutable state threaded through one extraction run. Owned by a single
/// scan; values persist across lines and pages until overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub current_cinema: Option<String>,
    /// 1..=12
    pub current_month: Option<u32>,
    /// Table column index -> calendar date, replaced by every header row
    pub column_dates: BTreeMap<usize, NaiveDate>,
}

impl ParseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when title rows can be attributed to a cinema and dates
    pub fn is_complete(&self) -> bool {
        self.current_cinema.is_some() && !self.column_dates.is_empty()
    }

    /// Record a month-range signal found in `text`; later signals win
    pub fn observe_month(&mut self, text: &str) -> Option<u32> {
        let month = infer_month_from_week_range(text)?;
        if self.current_month != Some(month) {
            tracing::debug!(month, "Month context updated");
        }
        self.current_month = Some(month);
        Some(month)
    }
}

/// Resolve a French month name or abbreviation (case and accent tolerant)
pub fn month_from_name(token: &str) -> Option<u32> {
    let folded = deunicode(token.trim()).to_uppercase();
    let folded = folded.trim_end_matches('.');
    let month = match folded {
        "JAN" | "JANV" | "JANVIER" => 1,
        "FEV" | "FEVR" | "FEVRIER" => 2,
        "MAR" | "MARS" => 3,
        "AVR" | "AVRIL" => 4,
        "MAI" => 5,
        "JUN" | "JUIN" => 6,
        "JUI" | "JUIL" | "JUILLET" => 7,
        "AOU" | "AOUT" => 8,
        "SEP" | "SEPT" | "SEPTEMBRE" => 9,
        "OCT" | "OCTOBRE" => 10,
        "NOV" | "NOVEMBRE" => 11,
        "DEC" | "DECEMBRE" => 12,
        _ => return None,
    };
    Some(month)
}

/// Find a "du N au M MOIS" range in `text` and return the month number
pub fn infer_month_from_week_range(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    let upper = text.to_uppercase();
    let captures = WEEK_RANGE_RE.captures(&upper)?;
    month_from_name(captures.get(1)?.as_str())
}
