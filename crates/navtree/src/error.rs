//! CLI error types.

use std::path::PathBuf;

use navtree_config::ConfigError;
use navtree_site::VersionsBuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read content directory {}: {source}", path.display())]
    Content {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Build(#[from] VersionsBuildError),

    #[error("{0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
