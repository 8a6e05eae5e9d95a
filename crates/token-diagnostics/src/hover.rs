//! Hover support: locating and describing the token under a cursor.

use css_analyzer::{extract_token_refs, format_px, rem_magnitude};
use token_scale::TokenScale;

/// The token reference under the given column, if any.
///
/// The hit range covers the whole `var(...)` expression around each
/// reference, so hovering the wrapper counts as hovering the token.
pub fn token_at(line_text: &str, col: usize) -> Option<&str> {
    for token_ref in extract_token_refs(line_text) {
        let Some(position) = line_text.find(token_ref) else {
            continue;
        };
        let start = position.saturating_sub("var(".len());
        let end = position + token_ref.len() + ")".len();
        if (start..=end).contains(&col) {
            return Some(token_ref);
        }
    }
    None
}

/// A human-readable description of a token: its output (rem) value and its
/// pixel source value.
pub fn describe_token(tokens: &TokenScale, identifier: &str) -> Option<String> {
    let name = identifier.strip_prefix("--").unwrap_or(identifier);
    let value = tokens.all().get(name)?;
    let magnitude = rem_magnitude(value)?;

    Some(format!(
        "--{}\noutput value: {}, source value: {}",
        name,
        value,
        format_px(magnitude)
    ))
}
