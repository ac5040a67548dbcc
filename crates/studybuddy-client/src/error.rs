//! Client error types.

use thiserror::Error;

/// Errors that can occur when talking to the generation backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The bearer credential was missing, invalid, or expired.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The document does not exist or belongs to another user.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// The backend returned an error response.
    #[error("service error (HTTP {status}): {message}")]
    ServiceError { status: u16, message: String },

    /// The request was rejected before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The response body did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}
