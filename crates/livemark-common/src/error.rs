//! Error types for livemark hosts.
//!
//! The core never fails; these cover what a host does around it: reading
//! files, loading configuration, parsing user-supplied selections.

use miette::{Diagnostic, SourceSpan};
use std::path::{Path, PathBuf};

/// Main error type for livemark host operations
#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum LivemarkError {
    /// IO error
    #[error(transparent)]
    #[diagnostic(code(livemark::io))]
    Io(#[from] std::io::Error),

    /// Configuration file could not be used
    #[error("configuration error in {}: {reason}", path.display())]
    #[diagnostic(code(livemark::config))]
    Config {
        path: PathBuf,
        reason: String,
        #[help]
        advice: Option<String>,
    },

    /// Serialization/deserialization error
    #[error(transparent)]
    #[diagnostic_source]
    Serde(#[from] SerDeError),

    /// Malformed selection argument
    #[error(transparent)]
    #[diagnostic_source]
    InvalidSelection(#[from] SelectionError),
}

impl LivemarkError {
    pub fn config(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
            advice: None,
        }
    }

    pub fn unsupported_format(path: impl AsRef<Path>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            reason: "unsupported file format".into(),
            advice: Some("use a .json or .toml file".into()),
        }
    }
}

/// Serialization/deserialization errors
#[derive(thiserror::Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum SerDeError {
    #[error(transparent)]
    #[diagnostic(code(livemark::serde::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(livemark::serde::toml))]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    #[diagnostic(code(livemark::serde::toml))]
    TomlSer(#[from] toml::ser::Error),
}

impl From<serde_json::Error> for LivemarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(SerDeError::Json(err))
    }
}

impl From<toml::de::Error> for LivemarkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serde(SerDeError::TomlDe(err))
    }
}

impl From<toml::ser::Error> for LivemarkError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serde(SerDeError::TomlSer(err))
    }
}

/// Selection argument that is not `N` or `A:B`, pointing at the bad part.
#[derive(thiserror::Error, Debug, Diagnostic)]
#[error("invalid selection `{src}`: {reason}")]
#[diagnostic(
    code(livemark::selection),
    help("use `N` for a caret or `A:B` for a range, in char offsets")
)]
pub struct SelectionError {
    #[source_code]
    src: String,
    #[label("here")]
    location: SourceSpan,
    reason: String,
}

impl SelectionError {
    pub fn new(src: impl Into<String>, location: std::ops::Range<usize>, reason: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn input(&self) -> &str {
        &self.src
    }

    pub fn location(&self) -> SourceSpan {
        self.location
    }
}
