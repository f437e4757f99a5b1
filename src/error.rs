use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    AlreadyMember,
    DuplicateRequest,
    NoOpenPositions,
    RequestAlreadyResolved,
    /// The actor is authenticated but is not the project owner.
    Unauthorized(String),
    /// No usable identity token on the request.
    Unauthenticated(String),
    BadRequest(String),
    Timeout,
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    /// Stable machine-readable kind, included in every error body.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::AlreadyMember => "already_member",
            AppError::DuplicateRequest => "duplicate_request",
            AppError::NoOpenPositions => "no_open_positions",
            AppError::RequestAlreadyResolved => "request_already_resolved",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::BadRequest(_) => "bad_request",
            AppError::Timeout => "timeout",
            AppError::Internal(_) => "internal",
            AppError::Database(_) => "storage_failure",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyMember
            | AppError::DuplicateRequest
            | AppError::NoOpenPositions
            | AppError::RequestAlreadyResolved => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::FORBIDDEN,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub(crate) fn not_found(what: &str) -> Self {
        AppError::NotFound(format!("{what} not found"))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::AlreadyMember => write!(f, "User is already a member of this team"),
            AppError::DuplicateRequest => {
                write!(f, "A join request already exists for this project and user")
            }
            AppError::NoOpenPositions => write!(f, "No open positions available"),
            AppError::RequestAlreadyResolved => {
                write!(f, "Join request has already been resolved")
            }
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {msg}"),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            AppError::Timeout => write!(f, "Operation timed out"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            AppError::Database(err) => write!(f, "Database Error: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Unauthenticated(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                "Internal server error".to_string()
            }
            AppError::Timeout => {
                tracing::warn!("Operation deadline exceeded");
                self.to_string()
            }
            _ => self.to_string(),
        };

        let body = json!({ "error": message, "kind": self.kind() });
        (status, axum::Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err)
    }
}
