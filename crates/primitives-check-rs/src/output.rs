//! Output formatting.

use crate::cli::OutputFormat;
use camino::Utf8Path;
use serde::Serialize;
use token_diagnostics::{Diagnostic, Severity, DIAGNOSTIC_SOURCE};

/// A formatted diagnostic for output.
#[derive(Debug, Serialize)]
pub struct FormattedDiagnostic {
    /// The diagnostic type (Error, Warning).
    #[serde(rename = "type")]
    pub diagnostic_type: String,
    /// The file path.
    pub filename: String,
    /// The start position.
    pub start: Position,
    /// The end position.
    pub end: Position,
    /// The message.
    pub message: String,
    /// The diagnostic code.
    pub code: String,
    /// The diagnostic source.
    pub source: String,
    /// Ranked replacement candidates, best first.
    pub replacements: Vec<FormattedReplacement>,
}

/// A position in the source.
#[derive(Debug, Serialize)]
pub struct Position {
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub column: u32,
}

/// A replacement candidate for output.
#[derive(Debug, Serialize)]
pub struct FormattedReplacement {
    /// The text to replace the offending range with.
    pub value: String,
    /// A human-readable description of the fix.
    pub description: String,
}

/// Formats diagnostics for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a collection of diagnostics.
    pub fn format(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path, source: &str) -> String {
        match self.format {
            OutputFormat::Human => self.format_human(diagnostics, file_path),
            OutputFormat::HumanVerbose => self.format_human_verbose(diagnostics, file_path, source),
            OutputFormat::Json => self.format_json(diagnostics, file_path),
            OutputFormat::Machine => self.format_machine(diagnostics, file_path),
        }
    }

    /// Formats as human-readable output.
    fn format_human(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n\n",
                file_path,
                diag.range.line + 1,
                diag.range.start_col + 1,
                severity_label(diag.severity),
                diag.message,
                diag.code
            ));
        }

        output
    }

    /// Formats as human-readable output with code snippets and replacement
    /// candidates.
    fn format_human_verbose(
        &self,
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
        source: &str,
    ) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let mut output = String::new();

        for diag in diagnostics {
            output.push_str(&format!(
                "{}:{}:{}\n{}: {} ({})\n",
                file_path,
                diag.range.line + 1,
                diag.range.start_col + 1,
                severity_label(diag.severity),
                diag.message,
                diag.code
            ));

            // Add code snippet with a marker under the offending range
            let line_num = diag.range.line as usize;
            if line_num < lines.len() {
                output.push_str(&format!("  {} | {}\n", line_num + 1, lines[line_num]));

                let padding = " ".repeat(diag.range.start_col as usize);
                let width = (diag.range.end_col - diag.range.start_col).max(1) as usize;
                output.push_str(&format!(
                    "  {} | {}{}\n",
                    " ".repeat((line_num + 1).to_string().len()),
                    padding,
                    "^".repeat(width)
                ));
            }

            for replacement in &diag.replacements {
                output.push_str(&format!(
                    "  fix: {} -> {}\n",
                    replacement.description, replacement.value
                ));
            }

            output.push('\n');
        }

        output
    }

    /// Formats as JSON output.
    fn format_json(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path) -> String {
        let formatted = Self::format_json_diagnostics(diagnostics, file_path);
        serde_json::to_string_pretty(&formatted).unwrap_or_default()
    }

    /// Formats diagnostics into JSON-ready structs.
    pub fn format_json_diagnostics(
        diagnostics: &[Diagnostic],
        file_path: &Utf8Path,
    ) -> Vec<FormattedDiagnostic> {
        diagnostics
            .iter()
            .map(|diag| FormattedDiagnostic {
                diagnostic_type: severity_label(diag.severity).to_string(),
                filename: file_path.to_string(),
                start: Position {
                    line: diag.range.line + 1,
                    column: diag.range.start_col + 1,
                },
                end: Position {
                    line: diag.range.line + 1,
                    column: diag.range.end_col + 1,
                },
                message: diag.message.clone(),
                code: diag.code.to_string(),
                source: DIAGNOSTIC_SOURCE.to_string(),
                replacements: diag
                    .replacements
                    .iter()
                    .map(|r| FormattedReplacement {
                        value: r.value.clone(),
                        description: r.description.clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Formats as machine-readable output.
    fn format_machine(&self, diagnostics: &[Diagnostic], file_path: &Utf8Path) -> String {
        let mut output = String::new();

        for diag in diagnostics {
            output.push_str(&format!(
                "{} {}:{}:{}:{} {} ({})\n",
                severity_label(diag.severity).to_uppercase(),
                file_path,
                diag.range.line + 1,
                diag.range.start_col + 1,
                diag.range.end_col + 1,
                diag.message,
                diag.code
            ));
        }

        output
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Error",
        Severity::Warning => "Warning",
    }
}

/// Summary of a check run.
#[derive(Debug, Default)]
pub struct CheckSummary {
    /// Number of files checked.
    pub file_count: usize,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
    /// Whether to fail on warnings.
    pub fail_on_warnings: bool,
}

impl CheckSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let error_word = if self.error_count == 1 {
            "error"
        } else {
            "errors"
        };
        let warning_word = if self.warning_count == 1 {
            "warning"
        } else {
            "warnings"
        };
        let file_word = if self.file_count == 1 {
            "file"
        } else {
            "files"
        };

        format!(
            "====================================\nprimitives-check found {} {} and {} {} in {} {}",
            self.error_count,
            error_word,
            self.warning_count,
            warning_word,
            self.file_count,
            file_word
        )
    }
}
