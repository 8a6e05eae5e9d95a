//! Main orchestration logic.

use crate::cli::{Args, OutputFormat, Threshold};
use crate::config::{ConfigError, ProjectConfig};
use crate::output::{CheckSummary, FormattedDiagnostic, Formatter};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use token_diagnostics::{analyze_document, Severity};
use token_scale::TokenScale;
use walkdir::WalkDir;

/// Orchestration errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    InvalidGlob(String),

    /// Watch error.
    #[error("watch error: {0}")]
    WatchFailed(String),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Runs the check on all stylesheet files under the workspace.
pub fn run(args: Args) -> Result<CheckSummary, OrchestratorError> {
    let workspace = if args.workspace.is_relative() {
        std::env::current_dir()
            .map(|p| Utf8PathBuf::try_from(p).unwrap_or_default())
            .unwrap_or_default()
            .join(&args.workspace)
    } else {
        args.workspace.clone()
    };

    let config = ProjectConfig::load(&workspace);
    let tokens = config.token_scale(&workspace)?;

    // Build ignore glob set
    let mut ignore_builder = GlobSetBuilder::new();
    for pattern in args.ignore.iter().chain(&config.ignore) {
        let glob = Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
        ignore_builder.add(glob);
    }

    // Add default ignores
    for pattern in ["**/node_modules/**", "**/dist/**", "**/build/**"] {
        if let Ok(glob) = Glob::new(pattern) {
            ignore_builder.add(glob);
        }
    }

    let ignore_set = ignore_builder
        .build()
        .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;

    let extensions: Vec<String> = args
        .extension_list()
        .unwrap_or_else(|| config.file_extensions())
        .into_iter()
        .map(str::to_string)
        .collect();

    let files = find_stylesheets(&workspace, &extensions, &ignore_set);

    if args.watch {
        run_watch_mode(&args, &workspace, &tokens, files, &extensions, &ignore_set)
    } else {
        run_single_check(&args, &workspace, &tokens, files)
    }
}

/// Finds stylesheet files under the workspace.
fn find_stylesheets(
    workspace: &Utf8Path,
    extensions: &[String],
    ignore_set: &GlobSet,
) -> Vec<Utf8PathBuf> {
    WalkDir::new(workspace)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
        .filter(|p| {
            let file_name = p.file_name().unwrap_or("");
            extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
        })
        .filter(|p| {
            let relative = p.strip_prefix(workspace).unwrap_or(p);
            !ignore_set.is_match(relative.as_str())
        })
        .collect()
}

/// Runs a single check pass.
fn run_single_check(
    args: &Args,
    workspace: &Utf8Path,
    tokens: &TokenScale,
    files: Vec<Utf8PathBuf>,
) -> Result<CheckSummary, OrchestratorError> {
    let formatter = Formatter::new(args.output);
    let output_json = matches!(args.output, OutputFormat::Json);
    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);

    struct FileOutput {
        text: Option<String>,
        json: Vec<FormattedDiagnostic>,
    }

    // Each file is an independent pure computation over the shared scale
    let outputs: Vec<FileOutput> = files
        .par_iter()
        .filter_map(|file_path| {
            let source = match fs::read_to_string(file_path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file_path, e);
                    return None;
                }
            };

            let mut diagnostics = analyze_document(tokens, &source);
            diagnostics.retain(|diag| include_severity(diag.severity, args.threshold));

            for diag in &diagnostics {
                match diag.severity {
                    Severity::Error => {
                        error_count.fetch_add(1, Ordering::Relaxed);
                    }
                    Severity::Warning => {
                        warning_count.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }

            if diagnostics.is_empty() {
                None
            } else {
                let relative_path = file_path.strip_prefix(workspace).unwrap_or(file_path);
                Some(FileOutput {
                    text: if output_json {
                        None
                    } else {
                        Some(formatter.format(&diagnostics, relative_path, &source))
                    },
                    json: if output_json {
                        Formatter::format_json_diagnostics(&diagnostics, relative_path)
                    } else {
                        Vec::new()
                    },
                })
            }
        })
        .collect();

    if output_json {
        let mut json_output = Vec::new();
        for output in outputs {
            json_output.extend(output.json);
        }
        let json = serde_json::to_string_pretty(&json_output).unwrap_or_else(|_| "[]".to_string());
        println!("{}", json);
    } else {
        for output in outputs {
            if let Some(text) = output.text {
                print!("{}", text);
            }
        }
    }

    let summary = CheckSummary {
        file_count: files.len(),
        error_count: error_count.load(Ordering::Relaxed),
        warning_count: warning_count.load(Ordering::Relaxed),
        fail_on_warnings: args.fail_on_warnings,
    };

    if !output_json {
        println!("{}", summary.format());
    }

    Ok(summary)
}

fn include_severity(severity: Severity, threshold: Threshold) -> bool {
    match threshold {
        Threshold::Error => matches!(severity, Severity::Error),
        Threshold::Warning => true,
    }
}

/// Runs in watch mode: a full re-check on every stylesheet change.
fn run_watch_mode(
    args: &Args,
    workspace: &Utf8Path,
    tokens: &TokenScale,
    initial_files: Vec<Utf8PathBuf>,
    extensions: &[String],
    ignore_set: &GlobSet,
) -> Result<CheckSummary, OrchestratorError> {
    use notify::{Config, RecommendedWatcher, RecursiveMode, Watcher};
    use std::sync::mpsc;
    use std::time::Duration;

    println!("Starting watch mode...\n");

    // Initial check
    let _summary = run_single_check(args, workspace, tokens, initial_files.clone())?;

    let (tx, rx) = mpsc::channel();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default().with_poll_interval(Duration::from_secs(1)),
    )
    .map_err(|e| OrchestratorError::WatchFailed(e.to_string()))?;

    watcher
        .watch(workspace.as_std_path(), RecursiveMode::Recursive)
        .map_err(|e| OrchestratorError::WatchFailed(e.to_string()))?;

    println!("Watching for changes... (Ctrl+C to stop)\n");

    while let Ok(event) = rx.recv() {
        let stylesheet_changed = event.paths.iter().any(|p| {
            p.file_name()
                .and_then(|name| name.to_str())
                .map(|name| extensions.iter().any(|ext| name.ends_with(ext.as_str())))
                .unwrap_or(false)
        });

        if stylesheet_changed {
            if !args.preserve_watch_output {
                // Clear screen
                print!("\x1B[2J\x1B[1;1H");
            }

            println!("File changed, re-checking...\n");

            let files = find_stylesheets(workspace, extensions, ignore_set);
            let _ = run_single_check(args, workspace, tokens, files);
        }
    }

    Err(OrchestratorError::WatchFailed(
        "watch channel closed unexpectedly".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    fn write_file(path: &Utf8Path, content: &str) {
        let mut file = fs::File::create(path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn temp_workspace() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_find_stylesheets_filters_by_extension() {
        let (_dir, workspace) = temp_workspace();
        write_file(&workspace.join("app.css"), ".a { margin: 8px; }");
        write_file(&workspace.join("app.scss"), ".a { margin: 8px; }");
        write_file(&workspace.join("app.js"), "let x = 1;");

        let extensions = vec![".css".to_string(), ".scss".to_string()];
        let mut files = find_stylesheets(&workspace, &extensions, &GlobSet::empty());
        files.sort();

        let names: Vec<_> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["app.css", "app.scss"]);
    }

    #[test]
    fn test_find_stylesheets_honors_ignores() {
        let (_dir, workspace) = temp_workspace();
        fs::create_dir_all(workspace.join("vendor")).unwrap();
        write_file(&workspace.join("app.css"), ".a {}");
        write_file(&workspace.join("vendor/lib.css"), ".b {}");

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new("**/vendor/**").unwrap());
        let ignore_set = builder.build().unwrap();

        let extensions = vec![".css".to_string()];
        let files = find_stylesheets(&workspace, &extensions, &ignore_set);

        let names: Vec<_> = files.iter().filter_map(|p| p.file_name()).collect();
        assert_eq!(names, vec!["app.css"]);
    }

    #[test]
    fn test_single_check_counts_severities() {
        let (_dir, workspace) = temp_workspace();
        write_file(
            &workspace.join("app.css"),
            ".stack {\n  margin: var(--base-size-8);\n  gap: 10px;\n}\n",
        );

        let args = Args::parse_from(["primitives-check-rs"]);
        let tokens = TokenScale::builtin();
        let files = find_stylesheets(&workspace, &[".css".to_string()], &GlobSet::empty());

        let summary = run_single_check(&args, &workspace, &tokens, files).unwrap();
        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.error_count, 1);
    }

    #[test]
    fn test_threshold_error_drops_warnings() {
        let (_dir, workspace) = temp_workspace();
        write_file(
            &workspace.join("app.css"),
            ".stack {\n  margin: var(--base-size-8);\n}\n",
        );

        let args = Args::parse_from(["primitives-check-rs", "--threshold", "error"]);
        let tokens = TokenScale::builtin();
        let files = find_stylesheets(&workspace, &[".css".to_string()], &GlobSet::empty());

        let summary = run_single_check(&args, &workspace, &tokens, files).unwrap();
        assert_eq!(summary.warning_count, 0);
        assert_eq!(summary.error_count, 0);
    }
}
