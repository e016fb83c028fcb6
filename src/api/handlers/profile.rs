use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::responses::QrPayloadResponse;
use crate::domain::services::verification;
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

/// The payload a client embeds into the member's QR code. The timestamp is
/// stamped at fetch time; scanners reject it after the freshness window.
pub async fn my_qr_payload(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.user_repo.find_by_id(&user.user_id).await?
        .ok_or(AppError::NotFound("User not found".into()))?;

    Ok(Json(QrPayloadResponse {
        r#type: "user_attendance".to_string(),
        user_id: profile.id,
        qr_token: profile.qr_token,
        timestamp: Utc::now().timestamp_millis(),
    }))
}

/// Replaces the stored token wholesale. Every previously issued copy stops
/// validating the moment this commits.
pub async fn regenerate_my_qr(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let token = verification::generate_qr_token();
    let updated = state.user_repo.update_qr_token(&user.user_id, &token, Utc::now()).await?;

    info!("QR token regenerated for user: {}", updated.id);

    Ok(Json(QrPayloadResponse {
        r#type: "user_attendance".to_string(),
        user_id: updated.id,
        qr_token: updated.qr_token,
        timestamp: Utc::now().timestamp_millis(),
    }))
}
