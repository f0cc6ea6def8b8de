use thiserror::Error;

/// Store-level failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The verifier identity was already set for this deployment.
    #[error("verifier identity is already configured")]
    AlreadyConfigured,

    /// Backend failure (poisoned lock, corrupt state).
    #[error("store backend error: {0}")]
    Backend(String),

    /// Snapshot (de)serialization failure.
    #[error("snapshot serialization error: {0}")]
    Serialization(String),

    /// Snapshot file I/O failure.
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
