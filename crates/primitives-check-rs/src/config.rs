//! Configuration loading.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::fs;
use thiserror::Error;
use token_scale::TokenScale;

/// Name of the optional project configuration file.
pub const CONFIG_FILE: &str = "primitives-check.json";

const DEFAULT_EXTENSIONS: [&str; 4] = [".css", ".scss", ".less", ".sass"];

/// Project configuration, read from `primitives-check.json` at the workspace
/// root.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectConfig {
    /// Stylesheet extensions to lint.
    pub extensions: Vec<String>,

    /// Glob patterns to exclude.
    pub ignore: Vec<String>,

    /// Replacement token sources; the embedded trees are used when absent.
    pub tokens: Option<TokenSources>,
}

/// Paths to replacement base/functional token trees (JSON).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSources {
    /// Path to the base token tree, relative to the workspace root.
    pub base: Utf8PathBuf,
    /// Path to the functional token tree, relative to the workspace root.
    pub functional: Utf8PathBuf,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A token source file could not be read.
    #[error("failed to read token source {path}: {source}")]
    TokenRead {
        /// The offending path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A token source file was not a valid token tree.
    #[error("invalid token source {path}: {message}")]
    TokenParse {
        /// The offending path.
        path: Utf8PathBuf,
        /// What went wrong.
        message: String,
    },
}

impl ProjectConfig {
    /// Loads configuration from the workspace root. A missing file yields the
    /// defaults; a malformed file warns on stderr and yields the defaults.
    pub fn load(workspace: &Utf8Path) -> Self {
        let path = workspace.join(CONFIG_FILE);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// The stylesheet extensions to lint.
    pub fn file_extensions(&self) -> Vec<&str> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.to_vec()
        } else {
            self.extensions.iter().map(|s| s.as_str()).collect()
        }
    }

    /// Builds the token scale: the embedded trees, or the configured
    /// replacement sources.
    pub fn token_scale(&self, workspace: &Utf8Path) -> Result<TokenScale, ConfigError> {
        let Some(sources) = &self.tokens else {
            return Ok(TokenScale::builtin());
        };

        let base = load_scale(workspace, &sources.base)?;
        let functional = load_scale(workspace, &sources.functional)?;
        Ok(TokenScale::from_scales(base, functional))
    }
}

fn load_scale(workspace: &Utf8Path, path: &Utf8Path) -> Result<token_scale::Scale, ConfigError> {
    let full = if path.is_relative() {
        workspace.join(path)
    } else {
        path.to_owned()
    };

    let content = fs::read_to_string(&full).map_err(|source| ConfigError::TokenRead {
        path: full.clone(),
        source,
    })?;

    let tree: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| ConfigError::TokenParse {
            path: full.clone(),
            message: e.to_string(),
        })?;

    token_scale::flatten_tree(&tree).map_err(|e| ConfigError::TokenParse {
        path: full,
        message: e.to_string(),
    })
}
