//! Error types for the Coinos client

use thiserror::Error;

/// Result type for Coinos client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`crate::SessionClient`]
#[derive(Debug, Error)]
pub enum Error {
    /// Login endpoint rejected the credentials
    #[error("Authentication failed ({status}): {message}")]
    Authentication {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Login succeeded but the response carried no token
    #[error("Login response did not contain a token")]
    MissingToken,

    /// A protected operation was called before a successful login
    #[error("Not authenticated, call login first")]
    NotAuthenticated,

    /// API returned an error response to an authenticated call
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Invoice amount must be positive
    #[error("Invalid invoice amount: {0}")]
    InvalidAmount(u64),

    /// Transport error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Token could not be used as a header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl Error {
    /// HTTP status of a rejected request, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_display() {
        let error = Error::Authentication {
            status: 401,
            message: "invalid login".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Authentication failed (401): invalid login"
        );
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_api_display() {
        let error = Error::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "API error (500): boom");
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_local_errors_have_no_status() {
        assert_eq!(Error::NotAuthenticated.status(), None);
        assert_eq!(Error::MissingToken.status(), None);
        assert_eq!(Error::InvalidAmount(0).status(), None);
        assert_eq!(
            Error::NotAuthenticated.to_string(),
            "Not authenticated, call login first"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let result: std::result::Result<String, _> = serde_json::from_str("not valid json");
        let json_error = result.expect_err("Invalid JSON should produce an error");
        let error: Error = json_error.into();

        assert!(matches!(error, Error::Serde(_)));
    }
}
