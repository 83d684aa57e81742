//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Best available message for surfacing to the user.
    ///
    /// For API rejections this is the server-provided error (or the generic
    /// status-keyed fallback built when the body was unparsable); transport
    /// errors render as-is.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
