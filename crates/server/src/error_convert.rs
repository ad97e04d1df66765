use axum::extract::rejection::{JsonRejection, QueryRejection};
use shared_types::AppError;

/// Convert a sqlx::Error into an AppError.
pub fn sqlx_to_app_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::RowNotFound => AppError::not_found("Resource not found"),
        sqlx::Error::PoolTimedOut => AppError::database("Timed out waiting for a database connection"),
        _ => AppError::database(err.to_string()),
    }
}

/// Extension trait providing `.into_app_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_app_error(self) -> AppError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_app_error(self) -> AppError {
        sqlx_to_app_error(self)
    }
}

/// Extension trait turning axum extractor rejections into the standard
/// error payload instead of axum's plain-text bodies.
pub trait RejectionExt {
    fn into_app_error(self) -> AppError;
}

impl RejectionExt for JsonRejection {
    fn into_app_error(self) -> AppError {
        AppError::bad_request(format!("Malformed request body: {}", self.body_text()))
    }
}

impl RejectionExt for QueryRejection {
    fn into_app_error(self) -> AppError {
        AppError::bad_request(format!("Malformed query string: {}", self.body_text()))
    }
}

/// Parse a path id. Only text that is not an `i64` is rejected; zero and
/// negative ids go on to the lookup and come back as not found.
pub fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::bad_request(format!("Invalid id: {}", raw)))
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
