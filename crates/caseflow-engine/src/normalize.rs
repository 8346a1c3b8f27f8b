/// Canonicalize a case-number-like string so matching survives formatting
/// noise: keep alphanumerics only, uppercased. Total; empty in, empty out.
///
/// # Examples
///
/// ```
/// use caseflow_engine::normalize::normalize_case_number;
///
/// assert_eq!(normalize_case_number(Some(" 123-45 ")), "12345");
/// assert_eq!(normalize_case_number(Some("ab.99/x")), "AB99X");
/// assert_eq!(normalize_case_number(Some("--- ")), "");
/// assert_eq!(normalize_case_number(None), "");
/// ```
pub fn normalize_case_number(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Case-insensitive, whitespace-trimmed folding for loose text comparison
/// (descriptions, configured order lists).
pub fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}
