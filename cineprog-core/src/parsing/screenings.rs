// Screening assembler and the single-pass program scan.

use super::cinema::CinemaDetector;
use super::context::ParseContext;
use super::dates::{day_numbers_to_dates, is_header_row, parse_header_day_numbers};
use super::tables::iter_lines_with_rows;
use super::times::parse_time_cell;
use crate::config::ProgramConfig;
use crate::types::{PageText, Screening};
use once_cell::sync::Lazy;
use regex::Regex;

/// A duration or time fragment glued after the title: "Titre - 1h45 ..."
static TITLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*\d+[hH]\d{2}\b.*$").expect("title suffix pattern is valid"));

/// Strip a trailing duration fragment and collapse whitespace
pub fn normalize_title(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = TITLE_SUFFIX_RE.replace(trimmed, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Emit one screening per (column, time) of a title row under the current
/// context. Rows arriving before cinema and dates are known yield nothing.
pub fn assemble_screenings(row: &[String], context: &ParseContext) -> Vec<Screening> {
    if !context.is_complete() {
        tracing::debug!(
            row = ?row,
            cinema = ?context.current_cinema,
            dated_columns = context.column_dates.len(),
            "Skipping row: no cinema or date context"
        );
        return Vec::new();
    }
    let Some(cinema) = context.current_cinema.as_deref() else {
        return Vec::new();
    };

    let title = row.first().map(|cell| normalize_title(cell)).unwrap_or_default();
    if title.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for (column, cell) in row.iter().enumerate().skip(1) {
        let Some(date) = context.column_dates.get(&column) else {
            continue;
        };
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        for (time, version) in parse_time_cell(cell) {
            results.push(Screening {
                cinema: cinema.to_string(),
                movie_title: title.clone(),
                date: *date,
                time,
                version,
            });
        }
    }
    results
}

/// Stateful interpreter of a weekly program. Holds only run parameters;
/// all scan state lives in the `ParseContext` passed to each step.
pub struct ProgramScanner {
    year: i32,
    cinemas: CinemaDetector,
}

impl ProgramScanner {
    pub fn new(year: i32, cinemas: CinemaDetector) -> Self {
        Self { year, cinemas }
    }

    pub fn from_config(config: &ProgramConfig) -> Self {
        Self::new(config.year, CinemaDetector::new(&config.cinemas))
    }

    /// Scan every page in order with a fresh context
    pub fn scan(&self, pages: &[PageText]) -> Vec<Screening> {
        let mut context = ParseContext::new();
        let mut results = Vec::new();
        for page in pages {
            results.extend(self.scan_page(page, &mut context));
        }
        tracing::info!(
            pages = pages.len(),
            screenings = results.len(),
            "Program scan complete"
        );
        results
    }

    /// Scan one page, carrying `context` forward
    pub fn scan_page(&self, page_text: &str, context: &mut ParseContext) -> Vec<Screening> {
        if page_text.trim().is_empty() {
            return Vec::new();
        }

        // Week range printed anywhere on the page applies from its top
        context.observe_month(page_text);

        let mut results = Vec::new();
        for (line, row) in iter_lines_with_rows(page_text) {
            results.extend(self.scan_line(line, row, context));
        }
        results
    }

    /// Apply one line to the context and return the screenings it yields
    pub fn scan_line(
        &self,
        line: &str,
        row: Option<Vec<String>>,
        context: &mut ParseContext,
    ) -> Vec<Screening> {
        // Cells may split a range like "| DU 24 | AU 30 DÉCEMBRE |", so rows
        // are checked on their joined cells instead of the raw line
        match &row {
            Some(cells) => context.observe_month(&cells.join(" ")),
            None => context.observe_month(line),
        };

        if let Some(cinema) = self.cinemas.detect(line) {
            context.current_cinema = Some(cinema.to_string());
            return Vec::new();
        }

        let Some(row) = row else {
            return Vec::new();
        };

        if is_header_row(&row) {
            let day_numbers = parse_header_day_numbers(&row);
            context.column_dates =
                day_numbers_to_dates(&day_numbers, self.year, context.current_month);
            if context.column_dates.is_empty() {
                tracing::debug!(row = ?row, "Header row resolved to no dates");
            }
            return Vec::new();
        }

        if let Some(cinema) = row.first().and_then(|cell| self.cinemas.detect(cell)) {
            context.current_cinema = Some(cinema.to_string());
            return Vec::new();
        }

        assemble_screenings(&row, context)
    }
}

impl Default for ProgramScanner {
    fn default() -> Self {
        Self::from_config(&ProgramConfig::default())
    }
}
