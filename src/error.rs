// src/error.rs
//! Application error types with structured error handling.
//!
//! None of these reach the edit form: the preload path turns every failure
//! into "leave the proposed text alone". They exist for the stores, the
//! configuration loader and the binary.

use std::fmt;
use thiserror::Error;

/// MediaWiki Action API error codes as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WikiErrorCode {
    /// Too many requests; the server asked us to slow down
    RateLimited,
    /// The wiki is in read-only mode or replication lag is too high
    Maxlag,
    /// The request was rejected as malformed
    BadRequest,
    /// The caller lacks read rights on this wiki
    PermissionDenied,
    /// Server-side exception while handling the request
    InternalError,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize
    Unknown(String),
}

impl WikiErrorCode {
    /// Parse an API `error.code` string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "ratelimited" => Self::RateLimited,
            "maxlag" | "readonly" => Self::Maxlag,
            "badvalue" | "missingparam" | "invalidtitle" | "unknown_action" => Self::BadRequest,
            "readapidenied" | "permissiondenied" => Self::PermissionDenied,
            "internal_api_error" => Self::InternalError,
            other if other.starts_with("internal_api_error_") => Self::InternalError,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited | Self::Maxlag | Self::InternalError => true,
            Self::HttpStatus(status) => matches!(*status, 408 | 429 | 500..=599),
            _ => false,
        }
    }
}

impl fmt::Display for WikiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "ratelimited"),
            Self::Maxlag => write!(f, "maxlag"),
            Self::BadRequest => write!(f, "badrequest"),
            Self::PermissionDenied => write!(f, "permissiondenied"),
            Self::InternalError => write!(f, "internal_api_error"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Invalid configuration in {origin}: {reason}")]
    InvalidConfiguration { origin: String, reason: String },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Wiki API returned an error ({code}): {message}")]
    WikiService { code: WikiErrorCode, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AppError {
    /// Whether a failed store read may succeed if simply tried again.
    pub fn is_transient(&self) -> bool {
        match self {
            AppError::NetworkFailure(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err
                        .status()
                        .map(|s| WikiErrorCode::from_http_status(s.as_u16()).is_retryable())
                        .unwrap_or(false)
            }
            AppError::WikiService { code, .. } => code.is_retryable(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_codes_map_to_vocabulary() {
        assert_eq!(
            WikiErrorCode::from_api_response("ratelimited"),
            WikiErrorCode::RateLimited
        );
        assert_eq!(
            WikiErrorCode::from_api_response("readapidenied"),
            WikiErrorCode::PermissionDenied
        );
        assert_eq!(
            WikiErrorCode::from_api_response("internal_api_error_DBQueryError"),
            WikiErrorCode::InternalError
        );
        assert_eq!(
            WikiErrorCode::from_api_response("nosuchthing"),
            WikiErrorCode::Unknown("nosuchthing".to_string())
        );
    }

    #[test]
    fn only_transient_codes_are_retryable() {
        assert!(WikiErrorCode::RateLimited.is_retryable());
        assert!(WikiErrorCode::HttpStatus(503).is_retryable());
        assert!(!WikiErrorCode::HttpStatus(404).is_retryable());
        assert!(!WikiErrorCode::PermissionDenied.is_retryable());
    }

    #[test]
    fn wiki_service_error_transience_follows_code() {
        let err = AppError::WikiService {
            code: WikiErrorCode::Maxlag,
            message: "Waiting for a database server".to_string(),
        };
        assert!(err.is_transient());
        assert!(!AppError::MalformedResponse("x".to_string()).is_transient());
    }
}
