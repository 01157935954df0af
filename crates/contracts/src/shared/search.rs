//! Case-insensitive substring search over table rows.

/// Normalizes a raw search term: lower-cased and trimmed.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Row matches if any of `columns` contains the (already normalized) term.
/// Columns past the end of the row read as empty text.
pub fn row_matches<S: AsRef<str>>(cells: &[S], columns: &[usize], term: &str) -> bool {
    columns.iter().any(|&i| {
        let text = cells.get(i).map(|c| c.as_ref()).unwrap_or("");
        text.to_lowercase().contains(term)
    })
}

/// Visibility of every row after a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub visible: Vec<bool>,
    pub match_count: usize,
}

impl SearchOutcome {
    pub fn has_matches(&self) -> bool {
        self.match_count > 0
    }
}

/// Applies `raw_term` to every row. An empty term matches everything.
pub fn search_rows<S: AsRef<str>>(rows: &[Vec<S>], columns: &[usize], raw_term: &str) -> SearchOutcome {
    let term = normalize_term(raw_term);
    let visible: Vec<bool> = rows
        .iter()
        .map(|cells| row_matches(cells, columns, &term))
        .collect();
    let match_count = visible.iter().filter(|v| **v).count();
    SearchOutcome {
        visible,
        match_count,
    }
}

/// Text of the feedback row shown when nothing matched.
pub fn no_results_message(raw_term: &str) -> String {
    format!(
        "No students match your search for \"{}\". Try a different search term.",
        normalize_term(raw_term)
    )
}
