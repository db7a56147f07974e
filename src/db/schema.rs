//! SQL DDL and query fragments for the vacancy store.
//! SQLite dialect.

/// Both tables are created only when absent, so running this on every start is safe.
/// - `vacancies.id` INTEGER PRIMARY KEY AUTOINCREMENT, exposed to callers as text
/// - `search_history.timestamp` RFC3339 UTC text, filled in by SQLite on insert
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS vacancies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT NOT NULL,
    description TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS search_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    query TEXT NOT NULL,
    timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
"#;

/// Projection shared by every vacancy read.
pub const VACANCY_COLUMNS: &str =
    "CAST(id AS TEXT) AS id, title, company, location, description";

pub const HISTORY_COLUMNS: &str = "id, query, timestamp";

/// Case-insensitive substring match on `column`; bind the value from [`contains_pattern`].
pub fn contains_predicate(column: &str) -> String {
    format!(r"{column} LIKE ? ESCAPE '\'")
}

/// Wrap `term` in `%` wildcards, escaping LIKE metacharacters so it matches literally.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Unicode-aware counterpart of the LIKE predicate, for terms SQLite cannot case-fold.
pub fn title_contains(title: &str, term: &str) -> bool {
    title.to_lowercase().contains(&term.to_lowercase())
}

/// Row id for a caller-supplied vacancy id. Only the canonical decimal form is accepted,
/// so "01", " 1" or "1.0" never alias vacancy "1".
pub fn parse_vacancy_id(id: &str) -> Option<i64> {
    id.parse::<i64>()
        .ok()
        .filter(|parsed| parsed.to_string() == id)
}

/// Split the bundled DDL into individual statements; `sqlx::query` runs one at a time.
pub fn init_statements() -> impl Iterator<Item = &'static str> {
    SQLITE_INIT
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
