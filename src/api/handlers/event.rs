use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::auth::AuthUser;
use crate::api::dtos::requests::{CanRegisterQuery, CreateEventRequest, UpdateEventRequest};
use crate::api::dtos::responses::CanRegisterResponse;
use crate::domain::models::event::{Event, NewEventParams, PAYMENT_TYPE_DONATION, PAYMENT_TYPE_FREE, PAYMENT_TYPE_PAID};
use crate::domain::services::{capacity, event_time};
use crate::error::AppError;
use std::sync::Arc;
use chrono::Utc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    if payload.end_at <= payload.start_at {
        return Err(AppError::Validation("Event end must be after its start".into()));
    }

    let payment_type = payload.payment_type.unwrap_or_else(|| PAYMENT_TYPE_FREE.to_string());
    validate_payment_type(&payment_type)?;

    if let Some(max) = payload.max_registrations {
        if max < 1 {
            return Err(AppError::Validation("max_registrations must be positive, omit it for unlimited capacity".into()));
        }
    }

    let event = Event::new(NewEventParams {
        title: payload.title,
        description: payload.description.unwrap_or_default(),
        location: payload.location.unwrap_or_default(),
        start_at: payload.start_at,
        end_at: payload.end_at,
        price: payload.price.unwrap_or(0),
        currency: payload.currency.unwrap_or_else(|| "RSD".to_string()),
        payment_type,
        max_registrations: payload.max_registrations,
        registration_enabled: payload.registration_enabled.unwrap_or(true),
        registration_deadline: payload.registration_deadline,
    });

    let created = state.event_repo.create(&event).await?;
    info!("Event created: {} ({})", created.id, created.title);
    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list().await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;

    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(title) = payload.title { event.title = title; }
    if let Some(description) = payload.description { event.description = description; }
    if let Some(location) = payload.location { event.location = location; }
    if let Some(start_at) = payload.start_at { event.start_at = start_at; }
    if let Some(end_at) = payload.end_at { event.end_at = end_at; }
    if let Some(price) = payload.price { event.price = price; }
    if let Some(currency) = payload.currency { event.currency = currency; }
    if let Some(payment_type) = payload.payment_type {
        validate_payment_type(&payment_type)?;
        event.payment_type = payment_type;
    }
    if let Some(enabled) = payload.registration_enabled { event.registration_enabled = enabled; }
    if let Some(deadline) = payload.registration_deadline { event.registration_deadline = Some(deadline); }
    if payload.clear_registration_deadline.unwrap_or(false) { event.registration_deadline = None; }

    if payload.unlimited_capacity.unwrap_or(false) {
        event.max_registrations = None;
    } else if let Some(max) = payload.max_registrations {
        // Shrinking below already-reserved seats would break the ledger
        // invariant for existing registrations.
        if max < event.current_registrations {
            return Err(AppError::Validation(format!(
                "max_registrations ({}) cannot be lower than the current registration count ({})",
                max, event.current_registrations
            )));
        }
        event.max_registrations = Some(max);
    }

    if event.end_at <= event.start_at {
        return Err(AppError::Validation("Event end must be after its start".into()));
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Event updated: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    user.require_admin()?;
    state.event_repo.delete(&event_id).await?;
    info!("Event deleted: {}", event_id);
    Ok(Json(serde_json::json!({ "status": "deleted" })))
}

/// Public pre-flight check: no side effects, same gates the registration
/// itself applies, plus the duplicate-email lookup when an email is given.
pub async fn can_register(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Query(query): Query<CanRegisterQuery>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let tickets = query.tickets.unwrap_or(1);
    let tz = event_time::zone(&state.config.event_timezone);

    if let Err(e) = capacity::can_register(&event, tickets, tz, Utc::now()) {
        return Ok(Json(CanRegisterResponse {
            can_register: false,
            reason: Some(e.to_string()),
            code: Some(e.code().to_string()),
        }));
    }

    if let Some(email) = query.email.as_deref() {
        if state.registration_repo.find_active_by_email(&event.id, email).await?.is_some() {
            let e = AppError::DuplicateRegistration;
            return Ok(Json(CanRegisterResponse {
                can_register: false,
                reason: Some(e.to_string()),
                code: Some(e.code().to_string()),
            }));
        }
    }

    Ok(Json(CanRegisterResponse {
        can_register: true,
        reason: None,
        code: None,
    }))
}

fn validate_payment_type(payment_type: &str) -> Result<(), AppError> {
    match payment_type {
        PAYMENT_TYPE_FREE | PAYMENT_TYPE_DONATION | PAYMENT_TYPE_PAID => Ok(()),
        other => Err(AppError::Validation(format!("Unknown payment type: {}", other))),
    }
}
