//! Error types for lookups and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// A failed character lookup. The search controller treats every variant the
/// same way; the distinction only matters for logs and the one-shot CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
}

pub type LookupResult<T> = Result<T, LookupError>;

/// Errors from loading an explicitly requested config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}
