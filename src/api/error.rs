use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Normalized error for every call made through [`ApiClient`](super::ApiClient)
///
/// `Display` yields the human-readable message meant for users; the
/// underlying transport detail is kept separately for logs.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Server responded with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },
    /// Request was sent but no response arrived (connect failure, timeout)
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(String),
    /// Request could not be built, or the response could not be decoded
    #[error("{}", UNEXPECTED_ERROR_MESSAGE)]
    Unexpected(String),
}

impl ApiError {
    /// Classify a transport-level failure from reqwest
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            ApiError::Network(error.to_string())
        } else {
            ApiError::Unexpected(error.to_string())
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message suitable for showing to a user
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Technical detail for logging
    pub fn detail(&self) -> String {
        match self {
            ApiError::Status { status, message } => format!("HTTP {}: {}", status, message),
            ApiError::Network(detail) | ApiError::Unexpected(detail) => detail.clone(),
        }
    }
}
