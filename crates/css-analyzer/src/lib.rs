//! Line-oriented CSS declaration analysis.
//!
//! Extracts the parts the suggestion engine needs from a single line of
//! stylesheet text: the declared property, the raw value, and any `var()`
//! token references. This is not a CSS parser: matching is regex-based and
//! assumes one declaration per line.
//!
//! # Example
//!
//! ```
//! use css_analyzer::{extract_property, extract_token_refs, extract_value};
//!
//! let line = "  margin: var(--base-size-8);";
//! assert_eq!(extract_property(line), "margin");
//! assert_eq!(extract_value(line), "var(--base-size-8)");
//! assert_eq!(extract_token_refs(line), vec!["--base-size-8"]);
//! ```

mod line;
mod units;

pub use line::{extract_property, extract_token_refs, extract_value};
pub use units::{format_px, rem_magnitude};
