// Date resolver: header rows -> column -> calendar date mapping.
//
// Headers only carry day numbers ("MER 24 | JEU 25 | ..."). The month comes
// from the scan context; a week straddling two months is detected by the
// presence of both late (>= 24) and early (<= 7) day numbers.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(MER|JEU|VEN|SAM|DIM|LUN|MAR)\b").expect("weekday pattern is valid")
});

static DAYNUM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([0-3]?\d)\b").expect("day number pattern is valid"));

const LATE_DAY_MIN: u32 = 24;
const EARLY_DAY_MAX: u32 = 7;

pub fn has_weekday_token(cell: &str) -> bool {
    WEEKDAY_RE.is_match(cell)
}

/// A header row has at least one cell carrying a weekday abbreviation
pub fn is_header_row(row: &[String]) -> bool {
    row.iter().any(|cell| has_weekday_token(cell))
}

/// Day-of-month per column; `None` for cells without a weekday token
pub fn parse_header_day_numbers(row: &[String]) -> Vec<Option<u32>> {
    row.iter()
        .map(|cell| {
            if cell.is_empty() || !has_weekday_token(cell) {
                return None;
            }
            DAYNUM_RE
                .captures(cell)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
        })
        .collect()
}

fn previous_month(month: u32) -> u32 {
    if month == 1 {
        12
    } else {
        month - 1
    }
}

/// Map each column with a day number to a date in `year`.
///
/// Without a known month the mapping is empty. Day/month combinations that
/// are not real calendar dates are dropped for their column only.
pub fn day_numbers_to_dates(
    day_numbers: &[Option<u32>],
    year: i32,
    month: Option<u32>,
) -> BTreeMap<usize, NaiveDate> {
    let mut column_dates = BTreeMap::new();

    let Some(month) = month else {
        return column_dates;
    };

    let days: Vec<u32> = day_numbers.iter().flatten().copied().collect();
    if days.is_empty() {
        return column_dates;
    }

    let has_late = days.iter().any(|&d| d >= LATE_DAY_MIN);
    let has_early = days.iter().any(|&d| d <= EARLY_DAY_MAX);
    let straddles_months = has_late && has_early;

    for (column, day) in day_numbers.iter().enumerate() {
        let Some(day) = *day else { continue };
        let resolved_month = if straddles_months && day >= LATE_DAY_MIN {
            previous_month(month)
        } else {
            month
        };

        match NaiveDate::from_ymd_opt(year, resolved_month, day) {
            Some(date) => {
                column_dates.insert(column, date);
            }
            None => {
                tracing::debug!(column, day, month = resolved_month, "Dropping invalid header date");
            }
        }
    }

    column_dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_header_detection_is_case_insensitive() {
        assert!(is_header_row(&row(&["", "mer 24", "Jeu 25"])));
        assert!(!is_header_row(&row(&["Film X", "20h"])));
        // weekday must be a whole token
        assert!(!is_header_row(&row(&["MERCREDI", "DIMANCHE"])));
    }

    #[test]
    fn test_day_numbers_per_column() {
        let days = parse_header_day_numbers(&row(&["", "MER 24", "JEU 25", "Notes 12"]));
        assert_eq!(days, vec![None, Some(24), Some(25), None]);
    }

    #[test]
    fn test_weekday_without_number() {
        assert_eq!(parse_header_day_numbers(&row(&["SAM", "DIM 3"])), vec![None, Some(3)]);
    }

    #[test]
    fn test_single_month_week() {
        let days = parse_header_day_numbers(&row(&[
            "MER 24", "JEU 25", "VEN 26", "SAM 27", "DIM 28", "LUN 29", "MAR 30", "MER 31",
        ]));
        let dates = day_numbers_to_dates(&days, 2025, Some(12));
        assert_eq!(dates.get(&0), Some(&date(2025, 12, 24)));
        assert_eq!(dates.get(&7), Some(&date(2025, 12, 31)));
        assert_eq!(dates.len(), 8);
    }

    #[test]
    fn test_straddling_week_assigns_late_days_to_previous_month() {
        let days: Vec<Option<u32>> = [28, 29, 30, 31, 1, 2, 3].iter().map(|d| Some(*d)).collect();
        let dates = day_numbers_to_dates(&days, 2025, Some(1));
        assert_eq!(dates.get(&0), Some(&date(2025, 12, 28)));
        assert_eq!(dates.get(&3), Some(&date(2025, 12, 31)));
        assert_eq!(dates.get(&4), Some(&date(2025, 1, 1)));
        assert_eq!(dates.get(&6), Some(&date(2025, 1, 3)));
    }

    #[test]
    fn test_straddling_week_with_month_mid_range() {
        let days: Vec<Option<u32>> =
            [24, 25, 26, 27, 28, 29, 30, 1, 2, 3].iter().map(|d| Some(*d)).collect();
        let dates = day_numbers_to_dates(&days, 2025, Some(12));
        assert_eq!(dates.get(&0), Some(&date(2025, 11, 24)));
        assert_eq!(dates.get(&6), Some(&date(2025, 11, 30)));
        assert_eq!(dates.get(&7), Some(&date(2025, 12, 1)));
    }

    #[test]
    fn test_invalid_dates_are_dropped_not_clamped() {
        // November has 30 days
        let days = vec![Some(29), Some(30), Some(31)];
        let dates = day_numbers_to_dates(&days, 2025, Some(11));
        assert_eq!(dates.len(), 2);
        assert_eq!(dates.get(&1), Some(&date(2025, 11, 30)));
        assert!(!dates.contains_key(&2));
    }

    #[test]
    fn test_day_zero_is_dropped() {
        let dates = day_numbers_to_dates(&[Some(0), Some(5)], 2025, Some(3));
        assert_eq!(dates.len(), 1);
        assert_eq!(dates.get(&1), Some(&date(2025, 3, 5)));
    }

    #[test]
    fn test_unknown_month_yields_empty_mapping() {
        assert!(day_numbers_to_dates(&[Some(24), Some(25)], 2025, None).is_empty());
        assert!(day_numbers_to_dates(&[None, None], 2025, Some(12)).is_empty());
    }
}
