use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ATTENDANCE_EVENT: &str = "EVENT";
pub const ATTENDANCE_GENERAL: &str = "GENERAL";
pub const ATTENDANCE_COWORKING: &str = "COWORKING";

pub const ATTENDANCE_TYPES: [&str; 3] = [ATTENDANCE_EVENT, ATTENDANCE_GENERAL, ATTENDANCE_COWORKING];

/// A verified physical check-in. Append-only: rows are never updated or
/// deleted after insertion.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct AttendanceRecord {
    pub id: String,
    pub user_id: Option<String>,
    pub registration_id: Option<String>,
    pub event_id: Option<String>,
    pub scanned_by: String,
    pub attendance_type: String, // EVENT, GENERAL, COWORKING
    pub location: Option<String>,
    pub notes: Option<String>,
    pub scanned_at: DateTime<Utc>,
}

pub struct NewAttendanceParams {
    pub user_id: Option<String>,
    pub registration_id: Option<String>,
    pub event_id: Option<String>,
    pub scanned_by: String,
    pub attendance_type: String,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl AttendanceRecord {
    pub fn new(params: NewAttendanceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: params.user_id,
            registration_id: params.registration_id,
            event_id: params.event_id,
            scanned_by: params.scanned_by,
            attendance_type: params.attendance_type,
            location: params.location,
            notes: params.notes,
            scanned_at: Utc::now(),
        }
    }
}
