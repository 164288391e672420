//! Error types for Idoit storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
///
/// Infrastructure faults (`Database`, `Serialization`) are retryable by the
/// caller; `NotFound` and `InvalidAmount` are not — they reject the request
/// outright.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        entity: &'static str,
        /// The identifier that did not resolve.
        id: String,
    },

    /// Donation amount failed validation. Nothing was written.
    #[error("invalid donation amount: {amount}")]
    InvalidAmount {
        /// The rejected amount.
        amount: i64,
    },
}
