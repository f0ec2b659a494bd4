use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use scorly_auth::error::AuthError;
use scorly_core::error::CoreError;
use scorly_export::error::ExportError;
use scorly_storage::error::BackendError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Forbidden,
    NotFound(String),
    Conflict {
        message: String,
        details: String,
    },
    /// A collaborator failed. `context` names the operation for the
    /// response body; `details` carries the original message.
    Internal {
        context: Option<&'static str>,
        details: String,
    },
}

impl ApiError {
    pub fn internal(details: impl ToString) -> Self {
        ApiError::Internal {
            context: None,
            details: details.to_string(),
        }
    }

    /// Name the failed operation on internal errors that lack one.
    pub fn in_context(self, operation: &'static str) -> Self {
        match self {
            ApiError::Internal {
                context: None,
                details,
            } => ApiError::Internal {
                context: Some(operation),
                details,
            },
            other => other,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string(), None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Access denied".to_string(), None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Conflict { message, details } => {
                (StatusCode::CONFLICT, message, Some(details))
            }
            ApiError::Internal { context, details } => {
                let error = context.unwrap_or("Internal server error").to_string();
                tracing::error!(error = %error, details = %details, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, error, Some(details))
            }
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        let message = match e {
            CoreError::MissingField(_) => "Report type is required".to_string(),
            CoreError::InvalidDate(raw) => format!("Invalid date: {raw}"),
            CoreError::InvalidDateRange { .. } => {
                "Invalid date range: from date must be before to date".to_string()
            }
            CoreError::UnsupportedReportType(_) => "Unsupported report type".to_string(),
            CoreError::UnsupportedFormat(_) => "Unsupported report format".to_string(),
        };
        ApiError::BadRequest(message)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::AccessDenied => ApiError::Forbidden,
            e if e.is_unauthenticated() => ApiError::Unauthorized,
            other => ApiError::internal(other),
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::UnsupportedReportType(_) => {
                ApiError::BadRequest("Unsupported report type".to_string())
            }
            BackendError::NotFound(_) => ApiError::NotFound("Report not found".to_string()),
            BackendError::Unauthorized(_) => ApiError::Unauthorized,
            BackendError::Forbidden(_) => ApiError::Forbidden,
            other => ApiError::internal(other),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::UnsupportedFormat(_) => {
                ApiError::BadRequest("Unsupported download format".to_string())
            }
            other => ApiError::internal(other),
        }
    }
}
