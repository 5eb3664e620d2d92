//! Error types for solas-core.

use std::io;

/// Error type for solas-core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal operation failed (mode change, size query, not a tty).
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Rendering or encoding failed.
    #[error("render error: {0}")]
    Render(String),
}

/// Result type alias for solas-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
