use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Non-2xx response. `detail` is the backend's own message when it sent one.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}
