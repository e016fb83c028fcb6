use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct SetupRequest {
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct CreateMemberRequest {
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
    pub max_registrations: Option<i32>,
    pub registration_enabled: Option<bool>,
    pub registration_deadline: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub price: Option<i64>,
    pub currency: Option<String>,
    pub payment_type: Option<String>,
    // Serde cannot tell "absent" from "null" here, so unlimited capacity is
    // requested explicitly instead of by omitting the field.
    pub max_registrations: Option<i32>,
    pub unlimited_capacity: Option<bool>,
    pub registration_enabled: Option<bool>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub clear_registration_deadline: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateRegistrationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub tickets: Option<i32>,
    pub payment_method: Option<String>, // venue | online, paid events only
}

#[derive(Deserialize)]
pub struct CanRegisterQuery {
    pub email: Option<String>,
    pub tickets: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}

#[derive(Deserialize)]
pub struct RecordAttendanceRequest {
    pub user_id: Option<String>,
    pub registration_id: Option<String>,
    pub event_id: Option<String>,
    pub attendance_type: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct AttendanceHistoryQuery {
    pub user_id: Option<String>,
    pub event_id: Option<String>,
    pub limit: Option<i64>,
}
