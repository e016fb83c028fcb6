mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn admin_post(auth: &AuthHeaders, uri: &str, body: Value) -> Request<Body> {
    Request::builder().method("POST").uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", &auth.csrf_token)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string())).unwrap()
}

async fn setup_registration(app: &TestApp, auth: &AuthHeaders) -> (Value, Value) {
    let event_payload = json!({
        "title": "Scanned Event",
        "start_at": (Utc::now() + Duration::days(1)).to_rfc3339(),
        "end_at": (Utc::now() + Duration::days(1) + Duration::hours(2)).to_rfc3339(),
        "max_registrations": 10
    });
    let response = app.router.clone().oneshot(admin_post(auth, "/api/v1/events", event_payload)).await.unwrap();
    let event = parse_body(response).await;

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/events/{}/register", event["id"].as_str().unwrap()))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({ "full_name": "Ana", "email": "ana@example.com" }).to_string())).unwrap()
    ).await.unwrap();
    let registration = parse_body(response).await;

    (event, registration)
}

#[tokio::test]
async fn test_valid_registration_payload_verifies_and_records() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;
    let (event, registration) = setup_registration(&app, &auth).await;

    let scan = json!({
        "type": "event_registration",
        "registrationId": registration["id"],
        "eventId": event["id"],
        "fullName": registration["full_name"],
        "email": registration["email"]
    });

    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_body(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["subject"]["kind"], "registration");
    assert_eq!(body["subject"]["registration_id"], registration["id"]);

    // Verification alone records nothing; the explicit attendance call does.
    let record = json!({ "registration_id": registration["id"] });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let attendance = parse_body(response).await;
    assert_eq!(attendance["attendance_type"], "EVENT");
    assert_eq!(attendance["event_id"], event["id"]);

    let history = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/attendance?event_id={}", event["id"].as_str().unwrap()))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(history).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mismatched_registration_details_fail_verification() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;
    let (event, registration) = setup_registration(&app, &auth).await;

    let scan = json!({
        "type": "event_registration",
        "registrationId": registration["id"],
        "eventId": event["id"],
        "fullName": registration["full_name"],
        "email": "somebody-else@example.com"
    });

    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_body(response).await["valid"], false);
}

#[tokio::test]
async fn test_cancelled_registration_fails_verification() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;
    let (event, registration) = setup_registration(&app, &auth).await;

    let code = registration["qr_code"].as_str().unwrap();
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/v1/registrations/manage/{}/cancel", code))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let scan = json!({
        "type": "event_registration",
        "registrationId": registration["id"],
        "eventId": event["id"],
        "fullName": registration["full_name"],
        "email": registration["email"]
    });

    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(parse_body(response).await["valid"], false);
}

#[tokio::test]
async fn test_unknown_payload_type_is_a_hard_rejection() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    let scan = json!({ "type": "backstage_pass", "userId": "u-1" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(parse_body(response).await["code"], "malformed_payload");

    let scan = json!({ "type": "user_attendance", "userId": "u-1" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scanning_requires_admin_auth() {
    let app = TestApp::new().await;
    app.setup_admin().await;

    let scan = json!({
        "type": "user_attendance",
        "userId": "u-1",
        "qrToken": "tok",
        "timestamp": Utc::now().timestamp_millis()
    });

    let response = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/v1/scan/verify")
            .header("Content-Type", "application/json")
            .body(Body::from(scan.to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_attendance_requires_an_existing_subject() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    let record = json!({ "user_id": "ghost" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let record = json!({});
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let record = json!({ "user_id": "a", "registration_id": "b" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_failed_verification_leaves_no_attendance_trace() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    // A member whose stored token will not match the scanned one.
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/members", json!({
        "username": "mira",
        "password": "mira-password-1",
        "full_name": "Mira N."
    }))).await.unwrap();
    let member = parse_body(response).await;
    let member_id = member["id"].as_str().unwrap();

    let scan = json!({
        "type": "user_attendance",
        "userId": member_id,
        "qrToken": "not-the-stored-token",
        "timestamp": Utc::now().timestamp_millis()
    });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/verify", scan)).await.unwrap();
    assert_eq!(parse_body(response).await["valid"], false);

    let history = app.router.clone().oneshot(
        Request::builder().method("GET")
            .uri(format!("/api/v1/attendance?user_id={}", member_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert!(parse_body(history).await.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_general_attendance_without_event() {
    let app = TestApp::new().await;
    let auth = app.setup_admin().await;

    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/members", json!({
        "username": "mira",
        "password": "mira-password-1"
    }))).await.unwrap();
    let member = parse_body(response).await;

    let record = json!({ "user_id": member["id"], "location": "front desk" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let attendance = parse_body(response).await;
    assert_eq!(attendance["attendance_type"], "GENERAL");
    assert_eq!(attendance["location"], "front desk");

    // Explicit coworking classification is honoured.
    let record = json!({ "user_id": member["id"], "attendance_type": "COWORKING" });
    let response = app.router.clone().oneshot(admin_post(&auth, "/api/v1/scan/attendance", record)).await.unwrap();
    assert_eq!(parse_body(response).await["attendance_type"], "COWORKING");
}
