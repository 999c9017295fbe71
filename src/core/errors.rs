//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

use super::types::SourceLanguage;

/// Why a source text could not be turned into a syntax tree.
///
/// The detection engine never propagates this to its callers; it is
/// recovered as "no routes in this file".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    /// The tree-sitter grammar could not be loaded into the parser
    #[error("failed to load {language} grammar: {message}")]
    Grammar {
        language: SourceLanguage,
        message: String,
    },

    /// The parser gave up without producing a tree
    #[error("parser produced no tree for {language} source")]
    NoTree { language: SourceLanguage },

    /// The tree contains an ERROR or MISSING node
    #[error("syntax error in {language} source at line {line}")]
    Syntax { language: SourceLanguage, line: usize },

    /// The grammar accepted the tree but the language itself does not
    #[error("invalid {language} source at line {line}: {reason}")]
    Rejected {
        language: SourceLanguage,
        line: usize,
        reason: &'static str,
    },
}

/// Why a serialized route record was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("route record has an empty method")]
    EmptyMethod,

    #[error("route record has no citations")]
    NoCitations,
}

/// Main error type for routemap operations outside the detection engine
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error in {}: {message}", .path.display())]
    Configuration { path: PathBuf, message: String },

    /// A framework name with no registered matcher
    #[error("Unknown framework: {0}")]
    UnknownFramework(String),

    /// A language name the parser does not support
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Directory walking errors
    #[error(transparent)]
    Walk(#[from] ignore::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    /// Worker pool construction errors
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Create a configuration error for a specific file
    pub fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
