//! Numeric normalization of statement cell text
//!
//! Statement figures arrive as display text: thousands separators, accounting
//! style negatives in parentheses, and "XXX" for redacted values. Anything that
//! cannot be read as a finite number becomes `None`; conversion never fails.

/// Normalize a raw cell token to a finite number or `None`
///
/// # Examples
///
/// ```
/// use statement_extractor::app::services::numeric_normalizer::normalize;
///
/// assert_eq!(normalize(Some("(1,234.5)")), Some(-1234.5));
/// assert_eq!(normalize(Some("XXX")), None);
/// ```
pub fn normalize(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim();

    if is_missing_marker(value) {
        return None;
    }

    let signed = match value
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
    {
        Some(inner) => format!("-{}", inner),
        None => value.to_string(),
    };

    let cleaned = signed.replace(',', "");

    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

fn is_missing_marker(value: &str) -> bool {
    value.is_empty() || value == "NA" || value.to_uppercase().contains("XXX")
}
