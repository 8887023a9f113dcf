use thiserror::Error;

/// Client-side API error.
///
/// Every remote call surfaces exactly one of these. The client never
/// retries; callers decide whether a failure is worth reporting.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// No session, an expired session, or the server answered 401.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

impl ApiError {
    /// True when the failure means the session is no longer usable.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated(_) | ApiError::InvalidToken(_))
    }

    /// True when the server reported the resource as gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Server { status: 404, .. })
    }

    /// Map a non-2xx status to the matching variant.
    pub(crate) fn from_status(status: u16, message: String) -> Self {
        if status == 401 {
            ApiError::Unauthenticated(message)
        } else {
            ApiError::Server { status, message }
        }
    }
}
