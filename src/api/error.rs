use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("Request timeout")]
    Timeout(Duration),
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
    #[error("could not build request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    // Status-less failures count as transient.
    pub fn is_retryable(&self) -> bool {
        match self.status() {
            None => true,
            Some(status) => status >= 500,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Network error - please check your connection".to_string(),
            ApiError::Http { status: 401 } => "Authentication required".to_string(),
            ApiError::Http { status: 403 } => "Access denied".to_string(),
            ApiError::Http { status: 404 } => "Service not found".to_string(),
            ApiError::Http { status: 429 } => {
                "Too many requests - please try again later".to_string()
            }
            ApiError::Http { status } if *status >= 500 => {
                "Server error - please try again later".to_string()
            }
            other => other.to_string(),
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::Http {
                status: status.as_u16(),
            };
        }
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        ApiError::Network(err.to_string())
    }
}
