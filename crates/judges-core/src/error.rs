//! Error types for the core library.

/// Errors raised by the factbase, impex and pack runner.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The factbase bytes could not be parsed.
    #[error("factbase import failed: {message}")]
    Import { message: String },

    /// The factbase could not be serialized.
    #[error("factbase export failed: {message}")]
    Export { message: String },

    /// A deletion query could not be parsed.
    #[error("malformed query: {message}")]
    Query { message: String },

    /// A judge pack exited with a non-zero status.
    #[error("pack '{name}' failed with exit code {code}")]
    Pack { name: String, code: i32 },

    /// Filesystem or subprocess failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
