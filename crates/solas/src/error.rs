//! Error types for the solas framework.

use std::io;

use solas_core::CoreError;

/// Error type for solas operations.
#[derive(Debug, thiserror::Error)]
pub enum SolasError {
    /// Error from the rendering substrate.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Terminal precondition failed (not a tty, mode change refused).
    #[error("terminal error: {0}")]
    Terminal(String),

    /// A second `run` was attempted while the runtime is active.
    #[error("runtime is already running")]
    AlreadyRunning,

    /// The input source reached end of input or the terminal disconnected.
    #[error("input source closed")]
    Closed,
}

/// Result type alias for solas operations.
pub type Result<T> = std::result::Result<T, SolasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            SolasError::AlreadyRunning.to_string(),
            "runtime is already running"
        );
        assert_eq!(SolasError::Closed.to_string(), "input source closed");
    }

    #[test]
    fn core_error_converts() {
        let err: SolasError = CoreError::Terminal("bad".into()).into();
        assert!(matches!(err, SolasError::Core(_)));
    }
}
