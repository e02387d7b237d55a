use std::sync::OnceLock;

use regex::Regex;

/// Pipe separating table columns.
pub const PIPE: char = '|';

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"^\s*\|?\s*:?-{3,}[-\s|:]*\|?\s*$").expect("Invalid table separator regex")
    })
}

/// Whether `line` is a header/body divider such as `|---|:---:|`.
pub fn is_separator(line: &str) -> bool {
    separator_regex().is_match(line)
}

/// Whether `line` can belong to a table that is already open.
pub fn continues_table(line: &str) -> bool {
    !line.trim().is_empty() && (line.contains(PIPE) || is_separator(line))
}

/// Splits a row into trimmed cells, ignoring leading and trailing pipes.
pub fn parse_row(line: &str) -> Vec<String> {
    line.trim()
        .trim_matches(PIPE)
        .split(PIPE)
        .map(|cell| cell.trim().to_string())
        .collect()
}
