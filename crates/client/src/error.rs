//! Error type shared by every endpoint wrapper.

/// Errors surfaced by the HTTP client adapter.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 401; the session has already been expired.
    #[error("authentication expired")]
    Unauthorized,

    /// Any other non-2xx answer, with whatever body text the server sent.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was 2xx but not in the shape the endpoint promises
    /// (e.g. an unparseable created-record id).
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
