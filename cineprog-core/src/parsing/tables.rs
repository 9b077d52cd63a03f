// Line classifier: purely structural detection of pipe-delimited table rows.

use crate::types::Row;

const CELL_DELIMITER: char = '|';

/// A markdown table separator such as `|---|:---:|` (delimiters, dashes,
/// colons and whitespace only)
pub fn is_separator_line(line: &str) -> bool {
    line.chars()
        .all(|c| c == CELL_DELIMITER || c == '-' || c == ':' || c.is_whitespace())
}

pub fn is_table_line(line: &str) -> bool {
    line.contains(CELL_DELIMITER) && !is_separator_line(line)
}

/// Split a table line into trimmed cells. Returns `None` for non-table
/// lines and for rows with fewer than two cells.
pub fn parse_table_line(line: &str) -> Option<Row> {
    if !is_table_line(line) {
        return None;
    }

    let cells: Row = line
        .trim()
        .trim_matches(CELL_DELIMITER)
        .split(CELL_DELIMITER)
        .map(|cell| cell.trim().to_string())
        .collect();

    if cells.len() < 2 {
        return None;
    }
    Some(cells)
}

/// Iterate the non-empty trimmed lines of a page, each paired with its row
/// interpretation (if any)
pub fn iter_lines_with_rows(page_text: &str) -> impl Iterator<Item = (&str, Option<Row>)> {
    page_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| (line, parse_table_line(line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_markdown_row() {
        let row = parse_table_line("| Film X | 20h | | 14h30 VOST |").unwrap();
        assert_eq!(row, vec!["Film X", "20h", "", "14h30 VOST"]);
    }

    #[test]
    fn test_parses_row_without_outer_delimiters() {
        let row = parse_table_line("MER 24 | JEU 25").unwrap();
        assert_eq!(row, vec!["MER 24", "JEU 25"]);
    }

    #[test]
    fn test_rejects_separator_lines() {
        assert!(parse_table_line("|---|---|").is_none());
        assert!(parse_table_line("| :--- | :---: | ---: |").is_none());
        assert!(is_separator_line("|---|---|"));
    }

    #[test]
    fn test_rejects_lines_without_delimiter() {
        assert!(parse_table_line("# Programme du 24 au 30 décembre").is_none());
    }

    #[test]
    fn test_rejects_single_cell() {
        assert!(parse_table_line("| Film seul |").is_none());
    }

    #[test]
    fn test_iter_skips_blank_lines() {
        let page = "  \n| A | B |\n\nTexte libre\n";
        let lines: Vec<_> = iter_lines_with_rows(page).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].0, "| A | B |");
        assert!(lines[0].1.is_some());
        assert_eq!(lines[1], ("Texte libre", None));
    }
}
