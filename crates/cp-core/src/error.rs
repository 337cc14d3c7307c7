use thiserror::Error;

/// Failure of one request against the card service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// Success status, but the payload reports a failure.
    #[error("{0}")]
    Application(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("local storage write failed: {0}")]
    Write(String),
}
