use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    DatabaseError,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::DatabaseError => write!(f, "DatabaseError"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// A single rejected field: which field, why, and the value that was sent.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
    pub rejected: serde_json::Value,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        reason: impl Into<String>,
        rejected: serde_json::Value,
    ) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
            rejected,
        }
    }
}

impl fmt::Display for FieldError {
    /// Renders as `field: reason (rejected: value)`. String values are shown
    /// without quotes, absent values as `null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rejected {
            serde_json::Value::String(s) => {
                write!(f, "{}: {} (rejected: {})", self.field, self.reason, s)
            }
            other => write!(f, "{}: {} (rejected: {})", self.field, self.reason, other),
        }
    }
}

/// Structured application error raised by the service and repository layers.
///
/// Carries no HTTP types; the `server` feature adds the status mapping and
/// the `IntoResponse` impl.
#[derive(Debug, Clone, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    pub field_errors: Vec<FieldError>,
}

impl AppError {
    fn with_kind(kind: AppErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::BadRequest, message)
    }

    /// Shape-validation failure carrying every rejected field.
    pub fn validation(message: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Business-rule violation reported as a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::ValidationError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::DatabaseError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_kind(AppErrorKind::InternalError, message)
    }

    pub fn status_code_u16(&self) -> u16 {
        match self.kind {
            AppErrorKind::NotFound => 404,
            AppErrorKind::BadRequest => 400,
            AppErrorKind::ValidationError => 400,
            AppErrorKind::DatabaseError => 500,
            AppErrorKind::InternalError => 500,
        }
    }

    /// Build the wire payload for this error, stamped with `timestamp`.
    pub fn to_response(&self, timestamp: DateTime<Utc>) -> ErrorResponse {
        let errors = if self.field_errors.is_empty() {
            None
        } else {
            Some(self.field_errors.iter().map(ToString::to_string).collect())
        };
        ErrorResponse {
            timestamp,
            status: self.status_code_u16(),
            message: self.message.clone(),
            errors,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

/// Standard error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
    /// Present only for validation failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = Vec::new();
        for (field, errs) in errors.field_errors() {
            for err in errs.iter() {
                let reason = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for {}", field));
                let rejected = err
                    .params
                    .get("value")
                    .cloned()
                    .unwrap_or(serde_json::Value::Null);
                field_errors.push(FieldError::new(field.to_string(), reason, rejected));
            }
        }
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::validation("Validation failed", field_errors)
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(kind = %self.kind, message = %self.message, "request failed");
        }
        (status, axum::Json(self.to_response(Utc::now()))).into_response()
    }
}
