//! Declaration parts extraction.
//!
//! Matching is textual, not a CSS parser: every function assumes one
//! declaration per line. Multi-line values and nested `var()` fallbacks beyond
//! the first comma split are not handled.

use once_cell::sync::Lazy;
use regex::Regex;

static VAR_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"var\(([A-Za-z0-9,\s-]+)\)").expect("var() pattern compiles"));

/// The declared property name: text before the first `:`, trimmed.
///
/// A line with no colon yields the whole trimmed line, which matches no
/// property class and therefore produces no suggestions downstream.
pub fn extract_property(line: &str) -> &str {
    match line.split_once(':') {
        Some((property, _)) => property.trim(),
        None => line.trim(),
    }
}

/// The declared value: text after the first `:`, trailing `;` stripped,
/// trimmed. Empty when the line has no colon.
pub fn extract_value(line: &str) -> &str {
    let Some((_, value)) = line.split_once(':') else {
        return "";
    };
    let value = value.trim();
    let value = value.strip_suffix(';').unwrap_or(value);
    value.trim()
}

/// Every `var(--x, fallback)` reference on the line, left to right.
///
/// The fallback portion (anything after the first comma) is discarded. The
/// returned identifiers keep their `--` prefix; callers strip it before scale
/// lookup.
pub fn extract_token_refs(line: &str) -> Vec<&str> {
    VAR_REF
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .filter_map(|inner| inner.as_str().split(',').next())
        .map(str::trim)
        .filter(|identifier| !identifier.is_empty())
        .collect()
}
