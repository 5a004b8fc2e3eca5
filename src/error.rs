//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type used throughout the application.
//! Token failures are kept as distinct variants (malformed, bad signature,
//! expired) so callers can tell them apart, while all of them surface to HTTP
//! clients as a 401 without leaking claim contents.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers and
//! middleware can bubble errors with `?` and still produce proper JSON
//! responses. `From` impls cover the error types of the crates we lean on:
//! `sqlx`, `validator`, `jsonwebtoken`, and `bcrypt`.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions the application can produce.
#[derive(Debug)]
pub enum AppError {
    /// Token could not be parsed at all, or carried claims we refuse to
    /// accept (e.g. an unknown role name). HTTP 401.
    TokenMalformed(String),
    /// Token parsed but its signature does not match the configured secret.
    /// HTTP 401.
    TokenSignatureInvalid,
    /// Token parsed and verified, but its expiry has passed. HTTP 401.
    TokenExpired,
    /// Any other authentication failure (missing header, bad credentials).
    /// HTTP 401.
    Unauthorized(String),
    /// Malformed or invalid request (HTTP 400).
    BadRequest(String),
    /// Requested resource does not exist (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    Internal(String),
    /// Error from the persistence layer (HTTP 500).
    Database(String),
    /// Request DTO failed validation (HTTP 422).
    Validation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::TokenMalformed(msg) => write!(f, "Malformed token: {}", msg),
            AppError::TokenSignatureInvalid => write!(f, "Invalid token signature"),
            AppError::TokenExpired => write!(f, "Token expired"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::TokenMalformed(_)
            | AppError::TokenSignatureInvalid
            | AppError::TokenExpired => HttpResponse::Unauthorized().json(json!({
                "error": self.to_string()
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::Internal(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            // Database detail stays server-side noise; clients see a 500.
            AppError::Database(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::Validation(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Splits `jsonwebtoken` failures into the three token categories.
/// Expiry and signature mismatch get their own variants; everything else
/// (bad base64, truncated structure, wrong algorithm, missing claims) is
/// treated as malformed.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        use jsonwebtoken::errors::ErrorKind;

        match error.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            ErrorKind::InvalidSignature => AppError::TokenSignatureInvalid,
            _ => AppError::TokenMalformed(error.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::TokenMalformed("not a jwt".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::TokenSignatureInvalid;
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::TokenExpired;
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::Unauthorized("Missing token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::NotFound("Resource not found".into());
        assert_eq!(error.error_response().status(), 404);

        let error = AppError::Internal("no id found".into());
        assert_eq!(error.error_response().status(), 500);

        let error = AppError::Validation("title too short".into());
        assert_eq!(error.error_response().status(), 422);
    }

    #[test]
    fn test_jwt_error_kind_mapping() {
        use jsonwebtoken::errors::{Error, ErrorKind};

        let mapped: AppError = Error::from(ErrorKind::ExpiredSignature).into();
        assert!(matches!(mapped, AppError::TokenExpired));

        let mapped: AppError = Error::from(ErrorKind::InvalidSignature).into();
        assert!(matches!(mapped, AppError::TokenSignatureInvalid));

        let mapped: AppError = Error::from(ErrorKind::InvalidToken).into();
        assert!(matches!(mapped, AppError::TokenMalformed(_)));
    }
}
