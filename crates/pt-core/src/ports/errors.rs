use thiserror::Error;

/// Failure of a call into the remote data layer.
#[derive(Debug, Error)]
pub enum DataAccessError {
    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("identity stream failed: {0}")]
    Stream(String),

    #[error("credential store failed: {0}")]
    Store(String),

    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
