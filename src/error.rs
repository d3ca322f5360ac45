//! Error types for chunklab.

/// Boxed error produced by an embedding backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during chunking.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk size (must be > 0).
    #[error("invalid chunk size: {0} (must be > 0)")]
    InvalidChunkSize(usize),

    /// Overlap exceeds chunk size.
    #[error("overlap {overlap} exceeds chunk size {size}")]
    OverlapExceedsSize {
        /// The chunk size.
        size: usize,
        /// The overlap that exceeded the size.
        overlap: usize,
    },

    /// A caller-supplied argument or an embedder result broke a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An embedding vector is all zeros or has a NaN or infinite component,
    /// so cosine similarity against it is undefined.
    #[error("degenerate embedding vector for unit {index}")]
    DegenerateVector {
        /// Position of the offending unit.
        index: usize,
    },

    /// The embedding backend failed. The backend's own error is kept as the
    /// source and can be recovered with `downcast_ref`.
    #[error("embedding error: {0}")]
    Embedding(#[source] BoxError),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type for chunklab operations.
pub type Result<T> = std::result::Result<T, Error>;
