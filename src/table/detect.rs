/// Column names accepted as an email column when they match exactly
/// (after trimming and lowercasing).
pub const EMAIL_COLUMN_CANDIDATES: &[&str] = &[
    "email",
    "e-mail",
    "correo",
    "mail",
    "address",
    "dirección",
    "direccion",
];

/// Substrings that also mark a column as an email column.
const EMAIL_SUBSTRINGS: &[&str] = &["email", "correo", "e-mail"];

/// First column whose prepared name equals a candidate or contains one of
/// the email substrings. A single pass in declared order: an earlier
/// substring match wins over a later exact match.
pub fn detect_email_column(columns: &[String]) -> Option<usize> {
    columns.iter().position(|name| {
        let prepared = name.trim().to_lowercase();
        EMAIL_COLUMN_CANDIDATES.contains(&prepared.as_str())
            || EMAIL_SUBSTRINGS.iter().any(|s| prepared.contains(s))
    })
}

/// Resolve an explicitly named column, ignoring case and surrounding
/// whitespace. First match in declared order wins.
pub fn resolve_column(columns: &[String], requested: &str) -> Option<usize> {
    let wanted = requested.trim().to_lowercase();
    columns
        .iter()
        .position(|name| name.trim().to_lowercase() == wanted)
}

/// Email column of a bounce table: detected, or the first column when
/// nothing matches. `None` only for a table with no columns at all.
pub fn bounce_email_column(columns: &[String]) -> Option<usize> {
    detect_email_column(columns).or(if columns.is_empty() { None } else { Some(0) })
}
