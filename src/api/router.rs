use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put, delete},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, event, health, member, profile, registration, registration_management, scan};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tower_cookies::CookieManagerLayer;
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Bootstrap & Auth
        .route("/api/v1/setup", post(member::setup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Members (admin)
        .route("/api/v1/members", post(member::create_member).get(member::list_members))
        .route("/api/v1/members/{user_id}", delete(member::delete_member))

        // Member profile QR
        .route("/api/v1/me/qr", get(profile::my_qr_payload))
        .route("/api/v1/me/qr/regenerate", post(profile::regenerate_my_qr))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Public Registration Flow
        .route("/api/v1/events/{event_id}/can-register", get(event::can_register))
        .route("/api/v1/events/{event_id}/register", post(registration::create_registration))
        .route("/api/v1/registrations/manage/{code}", get(registration_management::get_registration_by_code))
        .route("/api/v1/registrations/manage/{code}/cancel", post(registration_management::cancel_registration_by_code))

        // Admin Registration Management
        .route("/api/v1/events/{event_id}/registrations", get(registration::list_registrations))
        .route("/api/v1/registrations/{registration_id}/cancel", post(registration::cancel_registration))
        .route("/api/v1/registrations/{registration_id}/payment", put(registration::update_payment_status))

        // Entrance Scanning
        .route("/api/v1/scan/verify", post(scan::verify))
        .route("/api/v1/scan/attendance", post(scan::record_attendance))
        .route("/api/v1/attendance", get(scan::attendance_history))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
