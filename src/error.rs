//! Application-wide error types.
//!
//! Queue and bridge operations never fail: out-of-range input is a no-op.
//! Errors only arise at the edges, catalog files and scripts, which use
//! [`Error`]. Config file failures have their own
//! [`ConfigError`](crate::config::ConfigError). The CLI layer uses `anyhow`
//! for convenient propagation.
//!
//! # Example
//!
//! ```ignore
//! use play_queue::error::{Result, ResultExt};
//!
//! fn read_catalog(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_context("reading catalog")
//! }
//! ```

use std::path::PathBuf;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or inconsistent track catalog
    #[error("Catalog error in {path}: {message}")]
    Catalog { path: PathBuf, message: String },

    /// Unparseable shell/script command
    #[error("Line {line}: {message}")]
    Script { line: usize, message: String },

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a catalog error.
    pub fn catalog(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Catalog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a script error.
    pub fn script(line: usize, message: impl Into<String>) -> Self {
        Self::Script {
            line,
            message: message.into(),
        }
    }

    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}
