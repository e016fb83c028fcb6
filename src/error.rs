use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("No seats remaining for this event")]
    CapacityExhausted,
    #[error("Registration is closed: {0}")]
    RegistrationClosed(String),
    #[error("An active registration already exists for this email")]
    DuplicateRegistration,
    #[error("Invalid or expired code: {0}")]
    InvalidToken(String),
    #[error("Malformed scan payload: {0}")]
    MalformedPayload(String),
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Stable machine-readable category the frontend branches on.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized => "unauthorized",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Validation(_) => "validation",
            AppError::CapacityExhausted => "capacity_exhausted",
            AppError::RegistrationClosed(_) => "registration_closed",
            AppError::DuplicateRegistration => "duplicate_registration",
            AppError::InvalidToken(_) => "invalid_token",
            AppError::MalformedPayload(_) => "malformed_payload",
            AppError::Internal => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();

        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let db_code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if db_code == "2067" || db_code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "error": "Resource already exists (duplicate entry)", "code": "conflict" }))
                        ).into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::CapacityExhausted => (StatusCode::CONFLICT, self.to_string()),
            AppError::RegistrationClosed(msg) => (StatusCode::FORBIDDEN, format!("Registration is closed: {}", msg)),
            AppError::DuplicateRegistration => (StatusCode::CONFLICT, self.to_string()),
            // A credential that matches nothing is indistinguishable from a
            // missing resource, but keeps its own code for the UI.
            AppError::InvalidToken(msg) => (StatusCode::NOT_FOUND, format!("Invalid or expired code: {}", msg)),
            AppError::MalformedPayload(msg) => (StatusCode::BAD_REQUEST, format!("Malformed scan payload: {}", msg)),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()),
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
