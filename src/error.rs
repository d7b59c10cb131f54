//! Unified error types for chatgraph.
//!
//! This module provides a single [`ChatgraphError`] enum that covers all
//! error cases in the library, from configuration mistakes to corrupt
//! archive contents.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **CLI users** get one clear, actionable message on stderr
//! - **Recoverable conditions** (a filter that matches nothing, a skip past
//!   the end of the ranking) are not errors at all — they surface as warning
//!   values from the functions that detect them and the run continues

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatgraph operations.
pub type Result<T> = std::result::Result<T, ChatgraphError>;

/// The error type for all chatgraph operations.
///
/// Each variant contains context about what went wrong and, where
/// applicable, the underlying source error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatgraphError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The export path doesn't exist or isn't readable
    /// - A conversation's message log can't be opened
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Invalid configuration, reported before any archive content is read.
    ///
    /// Examples: a non-positive `--top` value, or an export path that is
    /// neither a zip archive nor a directory.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the invalid option
        message: String,
    },

    /// The export archive could not be unpacked.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The export doesn't match the expected layout.
    ///
    /// This occurs when:
    /// - The export has no `messages/` entry
    /// - `messages/index.json` is missing
    #[error("Invalid export structure{}: {message}", path.as_ref().map(|p| format!(" ({})", p.display())).unwrap_or_default())]
    Structure {
        /// Description of what's wrong
        message: String,
        /// The offending path, if available
        path: Option<PathBuf>,
    },

    /// JSON parsing error in `index.json` or a channel descriptor.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reading error in a conversation's message log.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A message row carried a timestamp that doesn't parse as ISO-8601.
    ///
    /// Timestamps are load-bearing for the cumulative series, so a bad row
    /// aborts the whole run rather than silently desyncing the counts.
    #[error("Invalid timestamp '{value}' in conversation '{conversation}'")]
    Timestamp {
        /// The raw timestamp string from the log
        value: String,
        /// Display name of the conversation being read
        conversation: String,
    },

    /// A user-supplied phrase failed to compile as a pattern fragment.
    #[error("Invalid phrase pattern '{phrase}': {message}")]
    Phrase {
        /// The offending phrase
        phrase: String,
        /// The regex engine's complaint
        message: String,
    },

    /// Pattern breakdown was requested with more than one conversation
    /// selected.
    ///
    /// Overlaying several conversations' pattern lines is not a coherent
    /// chart; narrow the selection instead.
    #[error(
        "Pattern breakdown needs exactly one conversation, but {selected} are selected. \
         Narrow the selection with --top 1, --skip or --user."
    )]
    Selection {
        /// How many conversations survived ranking and windowing
        selected: usize,
    },

    /// Chart rendering failed.
    #[error("Render error: {message}")]
    Render {
        /// Description from the rendering backend
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatgraphError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ChatgraphError::Config {
            message: message.into(),
        }
    }

    /// Creates a structure error without a path.
    pub fn structure(message: impl Into<String>) -> Self {
        ChatgraphError::Structure {
            message: message.into(),
            path: None,
        }
    }

    /// Creates a structure error pointing at a path.
    pub fn structure_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ChatgraphError::Structure {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Creates a timestamp error.
    pub fn timestamp(value: impl Into<String>, conversation: impl Into<String>) -> Self {
        ChatgraphError::Timestamp {
            value: value.into(),
            conversation: conversation.into(),
        }
    }

    /// Creates a phrase compilation error.
    pub fn phrase(phrase: impl Into<String>, message: impl Into<String>) -> Self {
        ChatgraphError::Phrase {
            phrase: phrase.into(),
            message: message.into(),
        }
    }

    /// Creates a rendering error.
    pub fn render(message: impl Into<String>) -> Self {
        ChatgraphError::Render {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatgraphError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, ChatgraphError::Config { .. })
    }

    /// Returns `true` if this is an export structure error.
    pub fn is_structure(&self) -> bool {
        matches!(self, ChatgraphError::Structure { .. })
    }

    /// Returns `true` if this is a selection conflict.
    pub fn is_selection(&self) -> bool {
        matches!(self, ChatgraphError::Selection { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
