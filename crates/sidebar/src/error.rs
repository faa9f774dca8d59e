//! CLI error types.

use sidebar_config::ConfigError;
use sidebar_content::ContentError;
use sidebar_nav::ResolveError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Content(#[from] ContentError),

    #[error("{0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize sidebar: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("{0} warning(s) reported and --deny-warnings is set")]
    Warnings(usize),
}
