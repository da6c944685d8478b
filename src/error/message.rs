// src/error/message.rs
//
// ErrorMessage - the failure half of every module and endpoint result
//
// RULES:
// - Codes come from a closed, immutable catalog
// - Unknown codes still build a valid value (generic message, code kept)
// - Internal error detail is logged, never carried outward

use std::fmt;

use serde::Serialize;

use super::AppError;
use crate::domain::DomainError;

/// Result type returned by domain modules and the API handler
pub type ModuleResult<T> = Result<T, ErrorMessage>;

/// Catalog codes
pub mod codes {
    pub const UNKNOWN: u32 = 1000;
    pub const VALIDATION_FAILED: u32 = 2001;
    pub const NOT_FOUND: u32 = 2002;
    pub const UNRECOGNIZED_REQUEST: u32 = 2003;
    pub const UNSUPPORTED_VIDEO_URL: u32 = 2004;
    pub const INVALID_UPLOAD: u32 = 2005;
    pub const DATABASE_FAILURE: u32 = 5001;
    pub const STORAGE_FAILURE: u32 = 5002;
}

static CATALOG: &[(u32, &str)] = &[
    (codes::UNKNOWN, "unknown error"),
    (codes::VALIDATION_FAILED, "validation failed"),
    (codes::NOT_FOUND, "record not found"),
    (codes::UNRECOGNIZED_REQUEST, "request not recognized"),
    (codes::UNSUPPORTED_VIDEO_URL, "unsupported video url"),
    (codes::INVALID_UPLOAD, "image upload rejected"),
    (codes::DATABASE_FAILURE, "database operation failed"),
    (codes::STORAGE_FAILURE, "storage operation failed"),
];

/// Looks up the catalog message for a code
fn catalog_message(code: u32) -> Option<&'static str> {
    CATALOG
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// An immutable, recognised failure condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    code: u32,
    message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl ErrorMessage {
    pub fn new(code: u32) -> Self {
        let message = catalog_message(code).unwrap_or("unknown error");
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Error carrying structured details (field errors, offending values)
    pub fn with_details(code: u32, details: serde_json::Value) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code)
        }
    }

    pub fn unrecognized_request() -> Self {
        Self::new(codes::UNRECOGNIZED_REQUEST)
    }

    pub fn not_found() -> Self {
        Self::new(codes::NOT_FOUND)
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn message(&self) -> &'static str {
        self.message
    }

    pub fn details(&self) -> Option<&serde_json::Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorMessage {}

impl From<AppError> for ErrorMessage {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound => ErrorMessage::not_found(),
            AppError::Domain(domain_error) => ErrorMessage::with_details(
                codes::VALIDATION_FAILED,
                serde_json::json!({ "message": domain_error.to_string() }),
            ),
            AppError::Database(_) | AppError::Pool(_) | AppError::Serialization(_) => {
                log::error!("persistence failure: {}", err);
                ErrorMessage::new(codes::DATABASE_FAILURE)
            }
            AppError::Io(_) => {
                log::error!("storage failure: {}", err);
                ErrorMessage::new(codes::STORAGE_FAILURE)
            }
            AppError::Config(_) | AppError::Other(_) => {
                log::error!("internal failure: {}", err);
                ErrorMessage::new(codes::UNKNOWN)
            }
        }
    }
}

impl From<DomainError> for ErrorMessage {
    fn from(err: DomainError) -> Self {
        AppError::Domain(err).into()
    }
}
