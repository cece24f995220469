//! Client Errors
//!
//! One error type for every board operation, local or remote.

/// Common result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Request never completed
    #[error("Network failure: {0}")]
    Network(String),
    /// 401/403, or credentials rejected
    #[error("Authentication failed: {0}")]
    Auth(String),
    /// Rejected locally before any request was made
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },
    /// 2xx response with an unexpected body
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Logging setup failed: {0}")]
    Logging(#[from] rolling_logger::LoggerError),
}

impl ClientError {
    /// Map a non-2xx status and its body
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => {
                let reason = if body.trim().is_empty() {
                    format!("status {}", status)
                } else {
                    body
                };
                ClientError::Auth(reason)
            }
            _ => ClientError::Server { status, body },
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ClientError::Auth(_))
    }

    /// Failures that happened before anything reached the server
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::NotFound(_) | ClientError::Config(_)
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
