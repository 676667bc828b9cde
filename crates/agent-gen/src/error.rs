//! Error types
//!
//! Only configuration problems are errors. Soft gaps in optional pools or
//! lookups resolve to neutral defaults and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Problems with the vocab, priors or country documents.
#[derive(Debug, Error)]
pub enum VocabError {
    /// A required pool is absent or empty.
    #[error("vocab missing: {path}")]
    Missing { path: String },

    #[error("failed to parse {document}: {source}")]
    Parse {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl VocabError {
    pub fn missing(path: impl Into<String>) -> Self {
        VocabError::Missing { path: path.into() }
    }
}

/// Problems loading generator settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Failure of a single generation call.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Vocab(#[from] VocabError),

    #[error("failed to serialize trace: {0}")]
    Trace(#[source] serde_json::Error),
}
