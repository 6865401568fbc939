//! Error types for loading documents and engine configuration.

use std::path::PathBuf;

/// Failures while loading the Mirror Tantra document.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("Mirror Tantra JSON not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed Mirror Tantra document {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures while loading an engine configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {source}")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level engine error.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
