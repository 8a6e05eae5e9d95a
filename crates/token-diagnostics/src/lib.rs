//! Token-usage diagnostics for stylesheet text.
//!
//! This crate provides:
//! - the suggestion engine: token-usage policy checks with ranked
//!   replacement candidates
//! - the diagnostics driver: whole-document analysis with positioned results
//! - hover support for `var()` token references
//!
//! # Example
//!
//! ```
//! use token_diagnostics::analyze_document;
//! use token_scale::TokenScale;
//!
//! let tokens = TokenScale::builtin();
//! let diagnostics = analyze_document(&tokens, ".stack {\n  margin: 10px;\n}\n");
//!
//! for diagnostic in &diagnostics {
//!     println!("{}: {}", diagnostic.code, diagnostic.message);
//! }
//! assert_eq!(diagnostics.len(), 1);
//! ```

mod diagnostic;
mod hover;
mod suggest;

pub use diagnostic::{Diagnostic, DiagnosticCode, LineRange, Replacement, Severity, Suggestion};
pub use hover::{describe_token, token_at};
pub use suggest::{compute_suggestions, IGNORE_MARKER};

use token_scale::TokenScale;

/// Name under which the linter reports its diagnostics.
pub const DIAGNOSTIC_SOURCE: &str = "primer/primitives";

/// Runs the suggestion engine over every line of a document.
///
/// Each suggestion is bound to the first occurrence of its offending text on
/// the line that produced it. The returned set is complete: callers replace
/// any previous set wholesale rather than diffing.
pub fn analyze_document(tokens: &TokenScale, source: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (line_index, line_text) in source.lines().enumerate() {
        for suggestion in compute_suggestions(tokens, line_text) {
            if let Some(diagnostic) =
                Diagnostic::from_suggestion(line_index as u32, line_text, suggestion)
            {
                diagnostics.push(diagnostic);
            }
        }
    }

    diagnostics
}
