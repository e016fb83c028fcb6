use serde::Deserialize;

use crate::error::AppError;

/// The two credential shapes scanned at the entrance, as embedded in the QR
/// codes. Dispatch happens on the `type` tag; anything else is rejected at
/// the boundary before business logic runs.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScanPayload {
    UserAttendance {
        #[serde(rename = "userId")]
        user_id: String,
        #[serde(rename = "qrToken")]
        qr_token: String,
        /// Client-side issuance timestamp, epoch milliseconds.
        timestamp: i64,
    },
    EventRegistration {
        #[serde(rename = "registrationId")]
        registration_id: String,
        #[serde(rename = "eventId")]
        event_id: String,
        #[serde(rename = "fullName")]
        full_name: String,
        email: String,
    },
}

impl ScanPayload {
    /// Parses raw scanned JSON, mapping every failure (unknown `type`,
    /// missing fields, extra fields, non-JSON input) to the same
    /// user-correctable error category.
    pub fn parse(raw: &serde_json::Value) -> Result<Self, AppError> {
        serde_json::from_value(raw.clone())
            .map_err(|e| AppError::MalformedPayload(e.to_string()))
    }
}
