//! Design-token scales for token-diagnostics.
//!
//! This crate owns the token data model:
//! - flattening nested token trees into dash-joined identifiers
//! - the merged token scale (base tokens win on identifier collision)
//! - per-property filtered scales and the property classifier
//!
//! # Example
//!
//! ```
//! use token_scale::TokenScale;
//!
//! let tokens = TokenScale::builtin();
//! let scale = tokens.scale_for("margin").unwrap();
//!
//! assert_eq!(scale.get("base-size-8"), Some("0.5rem"));
//! assert!(tokens.scale_for("color").is_none());
//! ```

mod classify;
mod flatten;
mod scale;

pub use classify::PropertyClass;
pub use flatten::{flatten_tree, FlattenError};
pub use scale::Scale;

use serde_json::Value;

/// Documentation link attached to suggestions.
pub const REFERENCE_URL: &str = "https://primer.style/primitives/spacing";

const BASE_SIZE_SPACE: &str = include_str!("../data/base-size-space.json");
const FUNCTIONAL_SIZE_SPACE: &str = include_str!("../data/functional-size-space.json");

/// The immutable token scale, built once at startup and passed by reference
/// into the suggestion engine.
///
/// Holds the full merged token set plus the per-property-class subsets, all
/// precomputed at construction so `scale_for` is a cheap borrow.
#[derive(Debug, Clone)]
pub struct TokenScale {
    all: Scale,
    gap: Scale,
    padding: Scale,
}

impl TokenScale {
    /// Builds the scale from the embedded base and functional token trees.
    pub fn builtin() -> Self {
        let base: Value =
            serde_json::from_str(BASE_SIZE_SPACE).expect("embedded base token tree is valid JSON");
        let functional: Value = serde_json::from_str(FUNCTIONAL_SIZE_SPACE)
            .expect("embedded functional token tree is valid JSON");
        Self::from_trees(&base, &functional)
            .expect("embedded token trees flatten to string leaves")
    }

    /// Builds the scale from caller-supplied base and functional token trees.
    pub fn from_trees(base: &Value, functional: &Value) -> Result<Self, FlattenError> {
        let base = flatten_tree(base)?;
        let functional = flatten_tree(functional)?;
        Ok(Self::from_scales(base, functional))
    }

    /// Builds the scale from already-flattened base and functional scales.
    pub fn from_scales(base: Scale, functional: Scale) -> Self {
        // Base tokens win on identifier collision, matching the original
        // token pipeline's merge order.
        let all = functional.merged(&base);
        let gap = functional.filtered("gap").merged(&base);
        let padding = functional.filtered("padding").merged(&base);
        Self { all, gap, padding }
    }

    /// The complete merged token set, regardless of property.
    pub fn all(&self) -> &Scale {
        &self.all
    }

    /// The scale that applies to a CSS property, or `None` when the linter
    /// has no opinion about it.
    pub fn scale_for(&self, property: &str) -> Option<&Scale> {
        match PropertyClass::of(property)? {
            PropertyClass::Gap => Some(&self.gap),
            PropertyClass::Padding => Some(&self.padding),
            PropertyClass::Sizing => Some(&self.all),
        }
    }
}

impl Default for TokenScale {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_scale_has_base_tokens() {
        let tokens = TokenScale::builtin();
        assert_eq!(tokens.all().get("base-size-8"), Some("0.5rem"));
        assert_eq!(tokens.all().get("base-size-16"), Some("1rem"));
    }

    #[test]
    fn test_margin_scale_excludes_padding_tokens() {
        let tokens = TokenScale::builtin();
        let scale = tokens.scale_for("margin").unwrap();

        assert!(scale.contains("stack-gap-condensed"));
        assert!(scale.contains("base-size-8"));
        assert!(!scale.contains("stack-padding-normal"));
        assert!(!scale.contains("overlay-padding-condensed"));
    }

    #[test]
    fn test_padding_scale_excludes_gap_tokens() {
        let tokens = TokenScale::builtin();
        let scale = tokens.scale_for("padding-left").unwrap();

        assert!(scale.contains("stack-padding-normal"));
        assert!(scale.contains("base-size-8"));
        assert!(!scale.contains("stack-gap-condensed"));
    }

    #[test]
    fn test_sizing_scale_is_complete() {
        let tokens = TokenScale::builtin();
        let scale = tokens.scale_for("width").unwrap();

        assert_eq!(scale.len(), tokens.all().len());
        assert!(scale.contains("stack-gap-normal"));
        assert!(scale.contains("stack-padding-normal"));
    }

    #[test]
    fn test_unclassified_property_has_no_scale() {
        let tokens = TokenScale::builtin();
        assert!(tokens.scale_for("color").is_none());
        assert!(tokens.scale_for("display").is_none());
    }

    #[test]
    fn test_base_wins_on_collision() {
        let base = json!({"shared": {"key": "1rem"}});
        let functional = json!({"shared": {"key": "2rem"}, "stack": {"gap": {"normal": "1rem"}}});
        let tokens = TokenScale::from_trees(&base, &functional).unwrap();

        assert_eq!(tokens.all().get("shared-key"), Some("1rem"));
    }
}
