use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{auth::AuthUser, maybe_auth::MaybeAuthUser};
use crate::api::dtos::requests::{CreateRegistrationRequest, UpdatePaymentStatusRequest};
use crate::domain::models::registration::{NewRegistrationParams, Registration, PAYMENT_STATUSES};
use crate::domain::services::{capacity, event_time, pricing};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    MaybeAuthUser(user_id): MaybeAuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let email = payload.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email address is required".into()));
    }
    if payload.full_name.trim().is_empty() {
        return Err(AppError::Validation("Full name is required".into()));
    }

    let tickets = payload.tickets.unwrap_or(1);
    let tz = event_time::zone(&state.config.event_timezone);

    capacity::can_register(&event, tickets, tz, Utc::now())?;

    if state.registration_repo.find_active_by_email(&event.id, &email).await?.is_some() {
        return Err(AppError::DuplicateRegistration);
    }

    let payment_status = pricing::initial_payment_status(&event, payload.payment_method.as_deref())?;
    let total_amount = pricing::total_amount(&event, tickets);

    let registration = Registration::new(NewRegistrationParams {
        event_id: event.id.clone(),
        user_id,
        full_name: payload.full_name.trim().to_string(),
        email,
        phone: payload.phone.unwrap_or_default(),
        tickets,
        total_amount,
        payment_status,
    });

    // The repository re-runs the capacity and duplicate gates inside one
    // transaction; the checks above only produce friendlier early errors.
    let created = state.registration_repo.create_with_reservation(&registration).await?;

    info!(
        registration_id = %created.id,
        event_id = %created.event_id,
        tickets = created.tickets,
        "Registration confirmed"
    );
    Ok(Json(created))
}

pub async fn list_registrations(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let registrations = state.registration_repo.list_by_event(&event.id).await?;
    Ok(Json(registrations))
}

pub async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(registration_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let registration = state.registration_repo.find_by_id(&registration_id).await?
        .ok_or(AppError::NotFound("Registration not found".into()))?;

    let cancelled = state.registration_repo.cancel_with_release(&registration).await?;
    info!("Registration cancelled by admin: {}", cancelled.id);
    Ok(Json(cancelled))
}

pub async fn update_payment_status(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(registration_id): Path<String>,
    Json(payload): Json<UpdatePaymentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    if !PAYMENT_STATUSES.contains(&payload.payment_status.as_str()) {
        return Err(AppError::Validation(format!("Unknown payment status: {}", payload.payment_status)));
    }

    let registration = state.registration_repo.find_by_id(&registration_id).await?
        .ok_or(AppError::NotFound("Registration not found".into()))?;

    let updated = state.registration_repo.update_payment_status(&registration.id, &payload.payment_status).await?;

    info!(
        registration_id = %updated.id,
        from = %registration.payment_status,
        to = %updated.payment_status,
        "Payment status overridden by admin"
    );
    Ok(Json(updated))
}
