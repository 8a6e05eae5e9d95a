//! Diagnostic and suggestion types.

/// The severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// A preference the author should consider.
    Warning,
    /// A policy violation that should be fixed.
    Error,
}

/// Diagnostic codes, one per policy step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// `prefer-functional-token`: a base token has a functional equivalent.
    PreferFunctionalToken,
    /// `wrong-property-token`: a token from another property's scale.
    WrongPropertyToken,
    /// `raw-value-on-scale`: a bare value that exactly matches a token.
    RawValueOnScale,
    /// `raw-value-off-scale`: a bare value with no exact token match.
    RawValueOffScale,
}

impl DiagnosticCode {
    /// Returns the default severity for this diagnostic code.
    pub fn default_severity(&self) -> Severity {
        match self {
            DiagnosticCode::PreferFunctionalToken => Severity::Warning,

            DiagnosticCode::WrongPropertyToken
            | DiagnosticCode::RawValueOnScale
            | DiagnosticCode::RawValueOffScale => Severity::Error,
        }
    }

    /// Returns the diagnostic code as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::PreferFunctionalToken => "prefer-functional-token",
            DiagnosticCode::WrongPropertyToken => "wrong-property-token",
            DiagnosticCode::RawValueOnScale => "raw-value-on-scale",
            DiagnosticCode::RawValueOffScale => "raw-value-off-scale",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A replacement candidate offered by a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// The text to replace the offending range with.
    pub value: String,
    /// A human-readable description of the fix.
    pub description: String,
}

/// A proposed fix for a detected policy violation.
///
/// Created fresh per analyzed line and consumed immediately; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    /// The offending substring as it appears on the line.
    pub original: String,
    /// The human-readable justification.
    pub message: String,
    /// The classification code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// Ranked replacement candidates, best first.
    pub replacements: Vec<Replacement>,
    /// Optional documentation link.
    pub reference: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion with the code's default severity and no
    /// replacements.
    pub fn new(
        code: DiagnosticCode,
        original: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: code.default_severity(),
            code,
            original: original.into(),
            message: message.into(),
            replacements: Vec::new(),
            reference: None,
        }
    }

    /// Adds a replacement candidate.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacements.push(replacement);
        self
    }

    /// Attaches a documentation link.
    pub fn with_reference(mut self, url: impl Into<String>) -> Self {
        self.reference = Some(url.into());
        self
    }
}

/// A line/column range within a document.
///
/// Lines and columns are 0-indexed; `end_col` is exclusive. Columns are byte
/// offsets within the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    /// 0-indexed line number.
    pub line: u32,
    /// Start column (inclusive).
    pub start_col: u32,
    /// End column (exclusive).
    pub end_col: u32,
}

impl LineRange {
    /// Creates a new range.
    pub fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            line,
            start_col,
            end_col,
        }
    }
}

/// A suggestion bound to a position in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// The classification code.
    pub code: DiagnosticCode,
    /// The severity level.
    pub severity: Severity,
    /// The diagnostic message.
    pub message: String,
    /// The range of the offending text.
    pub range: LineRange,
    /// Ranked replacement candidates, best first.
    pub replacements: Vec<Replacement>,
    /// Optional documentation link.
    pub reference: Option<String>,
}

impl Diagnostic {
    /// Binds a suggestion to the first occurrence of its offending text on
    /// the line. Returns `None` when the text is absent (cannot happen for
    /// suggestions derived from that same line).
    pub fn from_suggestion(line: u32, line_text: &str, suggestion: Suggestion) -> Option<Self> {
        let start = line_text.find(&suggestion.original)?;
        let range = LineRange::new(
            line,
            start as u32,
            (start + suggestion.original.len()) as u32,
        );

        Some(Self {
            code: suggestion.code,
            severity: suggestion.severity,
            message: suggestion.message,
            range,
            replacements: suggestion.replacements,
            reference: suggestion.reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_severity_defaults() {
        assert_eq!(
            DiagnosticCode::PreferFunctionalToken.default_severity(),
            Severity::Warning
        );
        assert_eq!(
            DiagnosticCode::RawValueOffScale.default_severity(),
            Severity::Error
        );
    }

    #[test]
    fn test_code_display() {
        assert_eq!(
            DiagnosticCode::WrongPropertyToken.to_string(),
            "wrong-property-token"
        );
    }

    #[test]
    fn test_from_suggestion_spans_first_occurrence() {
        let suggestion = Suggestion::new(DiagnosticCode::RawValueOnScale, "8px", "use a token");
        let diagnostic = Diagnostic::from_suggestion(3, "margin: 8px;", suggestion).unwrap();

        assert_eq!(diagnostic.range, LineRange::new(3, 8, 11));
        assert_eq!(diagnostic.severity, Severity::Error);
    }

    #[test]
    fn test_from_suggestion_missing_text() {
        let suggestion = Suggestion::new(DiagnosticCode::RawValueOnScale, "16px", "use a token");
        assert!(Diagnostic::from_suggestion(0, "margin: 8px;", suggestion).is_none());
    }
}
