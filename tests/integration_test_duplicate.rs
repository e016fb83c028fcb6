mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &TestApp, event_id: &str, email: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/events/{}/register", event_id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "full_name": "Ana", "email": email }).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_duplicate_email_rejected_per_event() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    let make_event = |title: &str| json!({
        "title": title,
        "start_at": (Utc::now() + Duration::days(4)).to_rfc3339(),
        "end_at": (Utc::now() + Duration::days(4) + Duration::hours(2)).to_rfc3339(),
        "max_registrations": 10
    });

    let e1 = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(make_event("First").to_string())).unwrap()
    ).await.unwrap();
    let event1 = parse_body(e1).await;
    let event1_id = event1["id"].as_str().unwrap();

    let e2 = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(make_event("Second").to_string())).unwrap()
    ).await.unwrap();
    let event2 = parse_body(e2).await;
    let event2_id = event2["id"].as_str().unwrap();

    let first = register(&app, event1_id, "ana@example.com").await;
    assert_eq!(first.status(), StatusCode::OK);

    // Same event, same email: rejected, no second row.
    let second = register(&app, event1_id, "ana@example.com").await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(second).await["code"], "duplicate_registration");

    // Email comparison ignores case.
    let cased = register(&app, event1_id, "ANA@Example.COM").await;
    assert_eq!(cased.status(), StatusCode::CONFLICT);

    // Another event is an independent namespace.
    let other_event = register(&app, event2_id, "ana@example.com").await;
    assert_eq!(other_event.status(), StatusCode::OK);

    let listed = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/v1/events/{}/registrations", event1_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(listed).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancelled_registration_frees_the_email() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    let payload = json!({
        "title": "Meetup",
        "start_at": (Utc::now() + Duration::days(4)).to_rfc3339(),
        "end_at": (Utc::now() + Duration::days(4) + Duration::hours(2)).to_rfc3339(),
        "max_registrations": 10
    });
    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/events")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header("Content-Type", "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    let event = parse_body(response).await;
    let event_id = event["id"].as_str().unwrap();

    let first = register(&app, event_id, "ana@example.com").await;
    let registration = parse_body(first).await;
    let code = registration["qr_code"].as_str().unwrap();

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/registrations/manage/{}/cancel", code))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    // Only ACTIVE registrations participate in the uniqueness rule.
    let again = register(&app, event_id, "ana@example.com").await;
    assert_eq!(again.status(), StatusCode::OK);
}
