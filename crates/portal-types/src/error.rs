//! Error types for portal.

use std::io;

/// Errors produced by the portal shell.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("config error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("script error on line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PortalError>;
