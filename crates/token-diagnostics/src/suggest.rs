//! The suggestion engine.
//!
//! A pure function from (token scale, line text) to suggestions. Policy steps
//! run in a fixed order per line; absent data at any step silently skips that
//! branch rather than failing.

use css_analyzer::{extract_property, extract_token_refs, extract_value, format_px, rem_magnitude};
use token_scale::{Scale, TokenScale, REFERENCE_URL};

use crate::{DiagnosticCode, Replacement, Suggestion};

/// Literal marker that suppresses all suggestions for a line when it appears
/// anywhere in the value text.
pub const IGNORE_MARKER: &str = "ignore primer/primitives";

/// How many near-miss candidates a raw-value-off-scale suggestion offers.
const NEARBY_LIMIT: usize = 5;

const EMOJIS: [&str; 12] = [
    "👀", "😬", "😢", "😭", "🥲", "🤕", "😳", "😨", "😮", "🙈", "🙉", "😅",
];

/// Message decoration. Deterministic: the same offending text always picks
/// the same emoji, keeping output reproducible across runs.
fn emoji_for(text: &str) -> &'static str {
    let sum: usize = text.bytes().map(usize::from).sum();
    EMOJIS[sum % EMOJIS.len()]
}

/// Computes all suggestions for one line of stylesheet text.
///
/// A single line may accumulate several suggestions: one per offending token
/// reference, plus at most one for a bare value. They are returned in policy
/// order.
pub fn compute_suggestions(tokens: &TokenScale, line_text: &str) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let property = extract_property(line_text);
    let Some(scale) = tokens.scale_for(property) else {
        return suggestions;
    };

    let value = extract_value(line_text);
    if value.contains(IGNORE_MARKER) {
        return suggestions;
    }

    let token_refs = extract_token_refs(line_text);
    for token_ref in &token_refs {
        check_base_token(scale, token_ref, &mut suggestions);
        check_property_family(tokens, scale, property, token_ref, &mut suggestions);
    }

    // bare-value policies do not apply to var() usage
    if !token_refs.is_empty() {
        return suggestions;
    }

    if !check_exact_value(scale, value, &mut suggestions) {
        check_nearby_value(scale, value, &mut suggestions);
    }

    suggestions
}

/// A base token whose value also exists under a functional identifier on the
/// same scale should give way to the functional token.
fn check_base_token(scale: &Scale, token_ref: &str, suggestions: &mut Vec<Suggestion>) {
    if !token_ref.contains("base-size") {
        return;
    }

    let name = token_ref.strip_prefix("--").unwrap_or(token_ref);
    let Some(value) = scale.get(name) else {
        return;
    };

    let functional: Vec<(&str, &str)> = scale
        .iter()
        .filter(|(other, entry)| *entry == value && !other.contains("base"))
        .collect();

    let Some((example, _)) = functional.first() else {
        return;
    };

    let mut suggestion = Suggestion::new(
        DiagnosticCode::PreferFunctionalToken,
        token_ref,
        format!(
            "{} You're using {}, prefer using a functional token instead. Example: {}",
            emoji_for(token_ref),
            token_ref,
            example
        ),
    )
    .with_reference(REFERENCE_URL);

    for (other, entry) in &functional {
        suggestion = suggestion.with_replacement(Replacement {
            value: format!("--{}", other),
            description: format!("Replace with {} ({})", other, entry),
        });
    }
    suggestions.push(suggestion);
}

/// A token that belongs to some scale, just not this property's, is flagged
/// with same-valued candidates from the correct scale.
fn check_property_family(
    tokens: &TokenScale,
    scale: &Scale,
    property: &str,
    token_ref: &str,
    suggestions: &mut Vec<Suggestion>,
) {
    let name = token_ref.strip_prefix("--").unwrap_or(token_ref);
    if scale.contains(name) {
        return;
    }
    let Some(value) = tokens.all().get(name) else {
        return;
    };

    let candidates: Vec<&str> = scale.names_for_value(value).collect();
    let Some(example) = candidates.first() else {
        return;
    };

    let mut suggestion = Suggestion::new(
        DiagnosticCode::WrongPropertyToken,
        token_ref,
        format!(
            "{} Using {}, which is not recommended for {}, prefer using {} tokens. Example: {}",
            emoji_for(token_ref),
            token_ref,
            property,
            property,
            example
        ),
    )
    .with_reference(REFERENCE_URL);

    for candidate in &candidates {
        suggestion = suggestion.with_replacement(Replacement {
            value: format!("--{}", candidate),
            description: format!("Replace with {} ({})", candidate, value),
        });
    }
    suggestions.push(suggestion);
}

/// A bare value that sits exactly on the scale should be the token instead.
/// Returns true when a suggestion was emitted.
fn check_exact_value(scale: &Scale, value: &str, suggestions: &mut Vec<Suggestion>) -> bool {
    let Some(magnitude) = rem_magnitude(value) else {
        return false;
    };

    let matches: Vec<(&str, &str)> = scale
        .iter()
        .filter(|(_, entry)| rem_magnitude(entry) == Some(magnitude))
        .collect();

    let Some((example, _)) = matches.first() else {
        return false;
    };

    let mut suggestion = Suggestion::new(
        DiagnosticCode::RawValueOnScale,
        value,
        format!(
            "{} You're using a custom value, prefer using a token instead. Example: {}",
            emoji_for(value),
            example
        ),
    )
    .with_reference(REFERENCE_URL);

    for (name, entry) in &matches {
        suggestion = suggestion.with_replacement(Replacement {
            value: format!("var(--{})", name),
            description: format!("Replace with {} ({})", name, entry),
        });
    }
    suggestions.push(suggestion);
    true
}

/// A bare value off the scale gets the five nearest tokens, after an explicit
/// opt-out candidate. Zero is exempt.
fn check_nearby_value(scale: &Scale, value: &str, suggestions: &mut Vec<Suggestion>) {
    if matches!(value, "0" | "0px") {
        return;
    }
    let Some(magnitude) = rem_magnitude(value) else {
        return;
    };

    let mut nearby: Vec<(&str, &str, f64, f64)> = scale
        .iter()
        .filter_map(|(name, entry)| {
            rem_magnitude(entry).map(|m| (name, entry, m, (m - magnitude).abs()))
        })
        .collect();
    nearby.sort_by(|a, b| a.3.total_cmp(&b.3));
    nearby.truncate(NEARBY_LIMIT);

    let mut suggestion = Suggestion::new(
        DiagnosticCode::RawValueOffScale,
        value,
        format!(
            "{} You're using a custom value not on the scale, prefer using a token from the scale instead. \
             If this value is intentional, suppress this warning (see quick fix)",
            emoji_for(value)
        ),
    )
    .with_reference(REFERENCE_URL)
    .with_replacement(Replacement {
        value: format!("{}; /* {} */", value, IGNORE_MARKER),
        description: "Ignore token linting for this line".to_string(),
    });

    for (name, entry, entry_magnitude, _) in &nearby {
        suggestion = suggestion.with_replacement(Replacement {
            value: format!("var(--{})", name),
            description: format!(
                "Replace with nearby value {} = {} ({})",
                entry,
                format_px(*entry_magnitude),
                name
            ),
        });
    }
    suggestions.push(suggestion);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use pretty_assertions::assert_eq;

    fn tokens() -> TokenScale {
        TokenScale::builtin()
    }

    #[test]
    fn test_unclassified_property_yields_nothing() {
        assert!(compute_suggestions(&tokens(), "color: red;").is_empty());
        assert!(compute_suggestions(&tokens(), "color: 8px;").is_empty());
    }

    #[test]
    fn test_ignore_marker_suppresses_all() {
        let line = "margin: 13px; /* ignore primer/primitives */";
        assert!(compute_suggestions(&tokens(), line).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let tokens = tokens();
        let line = "margin: 10px;";
        assert_eq!(
            compute_suggestions(&tokens, line),
            compute_suggestions(&tokens, line)
        );
    }

    #[test]
    fn test_base_token_prefers_functional() {
        let suggestions = compute_suggestions(&tokens(), "margin: var(--base-size-8);");

        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.code, DiagnosticCode::PreferFunctionalToken);
        assert_eq!(suggestion.severity, Severity::Warning);
        assert_eq!(suggestion.original, "--base-size-8");
        assert!(suggestion
            .replacements
            .iter()
            .any(|r| r.value == "--stack-gap-condensed"));
        // padding tokens are off the margin scale, so never proposed
        assert!(suggestion
            .replacements
            .iter()
            .all(|r| !r.value.contains("padding")));
    }

    #[test]
    fn test_base_token_without_functional_equivalent_passes() {
        // no functional token shares 8rem
        let suggestions = compute_suggestions(&tokens(), "margin: var(--base-size-128);");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_wrong_property_family() {
        let suggestions = compute_suggestions(&tokens(), "margin: var(--stack-padding-normal);");

        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.code, DiagnosticCode::WrongPropertyToken);
        assert_eq!(suggestion.severity, Severity::Error);
        assert_eq!(suggestion.original, "--stack-padding-normal");
        // 1rem equivalents from the margin scale
        assert!(suggestion
            .replacements
            .iter()
            .any(|r| r.value == "--stack-gap-normal"));
        assert!(suggestion
            .replacements
            .iter()
            .any(|r| r.value == "--base-size-16"));
    }

    #[test]
    fn test_unknown_token_ref_yields_nothing() {
        let suggestions = compute_suggestions(&tokens(), "margin: var(--not-a-token);");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_token_refs_skip_bare_value_steps() {
        // the fallback value 10px must not trigger raw-value checks
        let suggestions = compute_suggestions(&tokens(), "margin: var(--not-a-token, 10px);");
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_exact_value_match_px() {
        let suggestions = compute_suggestions(&tokens(), "margin: 8px;");

        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.code, DiagnosticCode::RawValueOnScale);
        assert_eq!(suggestion.original, "8px");
        assert!(suggestion
            .replacements
            .iter()
            .any(|r| r.value == "var(--base-size-8)"));
    }

    #[test]
    fn test_px_and_rem_resolve_alike() {
        let from_px = compute_suggestions(&tokens(), "width: 16px;");
        let from_rem = compute_suggestions(&tokens(), "width: 1rem;");

        assert_eq!(from_px.len(), 1);
        assert_eq!(from_px[0].code, DiagnosticCode::RawValueOnScale);
        assert_eq!(from_rem[0].code, DiagnosticCode::RawValueOnScale);

        let values = |s: &Suggestion| {
            s.replacements
                .iter()
                .map(|r| r.value.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(values(&from_px[0]), values(&from_rem[0]));
    }

    #[test]
    fn test_near_miss_offers_ignore_then_nearest() {
        let suggestions = compute_suggestions(&tokens(), "margin: 10px;");

        assert_eq!(suggestions.len(), 1);
        let suggestion = &suggestions[0];
        assert_eq!(suggestion.code, DiagnosticCode::RawValueOffScale);
        assert_eq!(suggestion.replacements.len(), 1 + NEARBY_LIMIT);
        assert_eq!(
            suggestion.replacements[0].value,
            "10px; /* ignore primer/primitives */"
        );
        // 0.625rem sits closest to the 0.5rem and 0.75rem entries
        assert!(suggestion.replacements[1..]
            .iter()
            .any(|r| r.value == "var(--base-size-8)"));
        assert!(suggestion.replacements[1..]
            .iter()
            .any(|r| r.value == "var(--base-size-12)"));
    }

    #[test]
    fn test_near_miss_ranks_by_distance() {
        let suggestions = compute_suggestions(&tokens(), "width: 0.9rem;");

        assert_eq!(suggestions.len(), 1);
        let nearest = &suggestions[0].replacements[1];
        // 1rem is the closest entry to 0.9rem on the full scale
        assert!(nearest.description.contains("1rem"));
    }

    #[test]
    fn test_zero_is_exempt() {
        assert!(compute_suggestions(&tokens(), "width: 0;").is_empty());
        assert!(compute_suggestions(&tokens(), "width: 0px;").is_empty());
    }

    #[test]
    fn test_unsupported_unit_is_skipped() {
        assert!(compute_suggestions(&tokens(), "width: 50%;").is_empty());
        assert!(compute_suggestions(&tokens(), "width: auto;").is_empty());
    }

    #[test]
    fn test_line_without_colon_yields_nothing() {
        assert!(compute_suggestions(&tokens(), "}").is_empty());
        assert!(compute_suggestions(&tokens(), "").is_empty());
    }

    #[test]
    fn test_emoji_is_deterministic() {
        assert_eq!(emoji_for("10px"), emoji_for("10px"));
    }
}
