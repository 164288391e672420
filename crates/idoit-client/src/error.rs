//! Client error types.

/// Errors that can occur when using the idoit client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// The referenced challenge does not exist.
    #[error("challenge not found: {message}")]
    ChallengeNotFound {
        /// Server-provided detail.
        message: String,
    },

    /// The request was rejected as invalid (bad amount, malformed ID).
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Server-provided detail.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
