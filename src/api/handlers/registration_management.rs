use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Self-service lookup via the QR code from the confirmation. Returns the
/// registration together with its event so the client can render both.
pub async fn get_registration_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.registration_repo.find_by_qr_code(&code).await?
        .ok_or(AppError::InvalidToken("unknown registration code".into()))?;

    let event = state.event_repo.find_by_id(&registration.event_id).await?
        .ok_or(AppError::Internal)?;

    let response = serde_json::json!({
        "registration": registration,
        "event": event
    });

    Ok(Json(response))
}

pub async fn cancel_registration_by_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let registration = state.registration_repo.find_by_qr_code(&code).await?
        .ok_or(AppError::InvalidToken("unknown registration code".into()))?;

    let cancelled = state.registration_repo.cancel_with_release(&registration).await?;
    info!("Registration cancelled via QR code: {}", cancelled.id);
    Ok(Json(cancelled))
}
