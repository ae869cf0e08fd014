/// Canonical form of an email cell: trimmed and lowercased, with the
/// literal missing-value text "nan" mapped to empty. Two cells refer to
/// the same address exactly when their normalized forms are equal.
pub fn normalize_email(value: &str) -> String {
    let normalized = value.trim().to_lowercase();
    if normalized == "nan" {
        String::new()
    } else {
        normalized
    }
}
