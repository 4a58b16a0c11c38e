// src/error.rs
//! Application error types with structured error handling.
//!
//! The Notion API reports failures as a structured body with a `code` and a
//! `message`. That body is decoded exactly once, in the transport layer, into
//! the typed vocabulary below; everything downstream (in particular the
//! nesting-workaround recursion) dispatches on the typed kind.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"validation_error"`,
/// the domain vocabulary is encoded in the type system. Each variant
/// tells you exactly what the Notion API reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// The specific validation failure for content nested beyond the
    /// two-level write limit. The only error with a recovery path: the
    /// workaround layer retries with client-side splitting.
    NestingTooDeep,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error body into the typed vocabulary.
    ///
    /// The nesting limit is signaled as `validation_error` with a message of
    /// the shape `body.children[0].children[0].children should be not
    /// present...`; this is the one place that message shape is inspected.
    pub fn from_api_response(code: &str, message: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" if is_nesting_message(message) => Self::NestingTooDeep,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }
}

/// Recognizes the children-must-be-absent validation message.
fn is_nesting_message(message: &str) -> bool {
    message.contains("children") && message.contains("should be not present")
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::NestingTooDeep => write!(f, "validation_error (nesting too deep)"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{code}"),
            Self::Unknown(code) => write!(f, "{code}"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Name '{name}' resolved to {matches} objects, expected exactly one")]
    AmbiguousName { name: String, matches: usize },

    #[error("Operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether this is the nesting-limit rejection the workaround layer
    /// recovers from by splitting.
    pub fn is_nesting_too_deep(&self) -> bool {
        matches!(
            self,
            AppError::NotionService {
                code: NotionErrorCode::NestingTooDeep,
                ..
            }
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nesting_error_recognized_from_validation_body() {
        let code = NotionErrorCode::from_api_response(
            "validation_error",
            "body failed validation: body.children[0].children[0].children should be not present, instead was `[...]`.",
        );
        assert_eq!(code, NotionErrorCode::NestingTooDeep);
    }

    #[test]
    fn plain_validation_error_stays_generic() {
        let code = NotionErrorCode::from_api_response(
            "validation_error",
            "body failed validation: body.parent should be defined, instead was `undefined`.",
        );
        assert_eq!(code, NotionErrorCode::ValidationFailed);
    }

    #[test]
    fn unknown_codes_are_preserved() {
        let code = NotionErrorCode::from_api_response("brand_new_code", "whatever");
        assert_eq!(code, NotionErrorCode::Unknown("brand_new_code".to_string()));
    }

    #[test]
    fn is_nesting_too_deep_dispatch() {
        let err = AppError::NotionService {
            code: NotionErrorCode::NestingTooDeep,
            message: "too deep".into(),
            status: reqwest::StatusCode::BAD_REQUEST,
        };
        assert!(err.is_nesting_too_deep());

        let err = AppError::NotionService {
            code: NotionErrorCode::ValidationFailed,
            message: "something else".into(),
            status: reqwest::StatusCode::BAD_REQUEST,
        };
        assert!(!err.is_nesting_too_deep());
    }
}
