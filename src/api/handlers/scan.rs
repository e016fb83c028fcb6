use axum::{extract::{State, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{AttendanceHistoryQuery, RecordAttendanceRequest};
use crate::api::dtos::responses::VerifyResponse;
use crate::domain::models::attendance::{AttendanceRecord, NewAttendanceParams, ATTENDANCE_EVENT, ATTENDANCE_GENERAL, ATTENDANCE_TYPES};
use crate::domain::models::scan::ScanPayload;
use crate::domain::services::verification::{self, Verdict};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::{info, warn};

/// Validates a scanned QR payload. Read-only: a failed check is an expected
/// outcome reported to the scanning admin, never an error response, and no
/// attendance is recorded here.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(raw): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let payload = ScanPayload::parse(&raw)?;

    let response = match payload {
        ScanPayload::UserAttendance { user_id, qr_token, timestamp } => {
            let Some(subject) = state.user_repo.find_by_id(&user_id).await? else {
                return Ok(Json(invalid("unknown user")));
            };

            match verification::validate_user_payload(&subject, &qr_token, timestamp, Utc::now()) {
                Verdict::Valid => VerifyResponse {
                    valid: true,
                    reason: None,
                    subject: Some(serde_json::json!({
                        "kind": "user",
                        "user_id": subject.id,
                        "full_name": subject.full_name,
                        "email": subject.email,
                    })),
                },
                Verdict::Invalid(reason) => {
                    warn!(user_id = %subject.id, reason, "user QR validation failed");
                    invalid(reason)
                }
            }
        }
        ScanPayload::EventRegistration { registration_id, event_id, full_name: _, email } => {
            let Some(registration) = state.registration_repo.find_by_id(&registration_id).await? else {
                return Ok(Json(invalid("unknown registration")));
            };

            match verification::validate_registration_payload(&registration, &event_id, &email) {
                Verdict::Valid => VerifyResponse {
                    valid: true,
                    reason: None,
                    subject: Some(serde_json::json!({
                        "kind": "registration",
                        "registration_id": registration.id,
                        "event_id": registration.event_id,
                        "full_name": registration.full_name,
                        "email": registration.email,
                        "tickets": registration.tickets,
                        "payment_status": registration.payment_status,
                    })),
                },
                Verdict::Invalid(reason) => {
                    warn!(registration_id = %registration.id, reason, "registration QR validation failed");
                    invalid(reason)
                }
            }
        }
    };

    Ok(Json(response))
}

/// Appends the attendance record once the scanner has a successful
/// verification. A failure here is a retryable server error, deliberately
/// distinct from an invalid-code outcome.
pub async fn record_attendance(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<RecordAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let (subject_user_id, registration_id, mut event_id) = match (&payload.user_id, &payload.registration_id) {
        (Some(user_id), None) => {
            state.user_repo.find_by_id(user_id).await?
                .ok_or(AppError::NotFound("User not found".into()))?;
            (Some(user_id.clone()), None, payload.event_id.clone())
        }
        (None, Some(registration_id)) => {
            let registration = state.registration_repo.find_by_id(registration_id).await?
                .ok_or(AppError::NotFound("Registration not found".into()))?;
            (registration.user_id.clone(), Some(registration.id), Some(registration.event_id))
        }
        _ => return Err(AppError::Validation("Exactly one of user_id or registration_id is required".into())),
    };

    if let Some(ref id) = event_id {
        if state.event_repo.find_by_id(id).await?.is_none() {
            event_id = None;
        }
    }

    let attendance_type = match payload.attendance_type {
        Some(t) => {
            if !ATTENDANCE_TYPES.contains(&t.as_str()) {
                return Err(AppError::Validation(format!("Unknown attendance type: {}", t)));
            }
            t
        }
        None if registration_id.is_some() || event_id.is_some() => ATTENDANCE_EVENT.to_string(),
        None => ATTENDANCE_GENERAL.to_string(),
    };

    let record = AttendanceRecord::new(NewAttendanceParams {
        user_id: subject_user_id,
        registration_id,
        event_id,
        scanned_by: user.user_id.clone(),
        attendance_type,
        location: payload.location,
        notes: payload.notes,
    });

    let created = state.attendance_repo.create(&record).await?;
    info!(
        attendance_id = %created.id,
        attendance_type = %created.attendance_type,
        scanned_by = %created.scanned_by,
        "Attendance recorded"
    );
    Ok(Json(created))
}

pub async fn attendance_history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<AttendanceHistoryQuery>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let records = if let Some(user_id) = query.user_id {
        state.attendance_repo.list_by_user(&user_id).await?
    } else if let Some(event_id) = query.event_id {
        state.attendance_repo.list_by_event(&event_id).await?
    } else {
        state.attendance_repo.list_recent(query.limit.unwrap_or(100)).await?
    };

    Ok(Json(records))
}

fn invalid(reason: &str) -> VerifyResponse {
    VerifyResponse {
        valid: false,
        reason: Some(reason.to_string()),
        subject: None,
    }
}
