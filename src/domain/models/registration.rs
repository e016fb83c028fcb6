use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use rand::{distributions::Alphanumeric, Rng};

pub const STATUS_ACTIVE: &str = "ACTIVE";
pub const STATUS_CANCELLED: &str = "CANCELLED";

pub const PAYMENT_FREE: &str = "FREE";
pub const PAYMENT_DONATION: &str = "DONATION";
pub const PAYMENT_VENUE: &str = "VENUE";
pub const PAYMENT_ONLINE_PENDING: &str = "ONLINE_PENDING";
pub const PAYMENT_ONLINE_PAID: &str = "ONLINE_PAID";

pub const PAYMENT_STATUSES: [&str; 5] = [
    PAYMENT_FREE,
    PAYMENT_DONATION,
    PAYMENT_VENUE,
    PAYMENT_ONLINE_PENDING,
    PAYMENT_ONLINE_PAID,
];

/// One party's reservation against an event's capacity.
///
/// `total_amount` is snapshotted at creation time. Later price changes on
/// the event never alter historical registrations.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub user_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub tickets: i32,
    pub total_amount: i64,
    pub status: String,         // ACTIVE, CANCELLED
    pub payment_status: String, // FREE, DONATION, VENUE, ONLINE_PENDING, ONLINE_PAID
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewRegistrationParams {
    pub event_id: String,
    pub user_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub tickets: i32,
    pub total_amount: i64,
    pub payment_status: String,
}

impl Registration {
    pub fn new(params: NewRegistrationParams) -> Self {
        let qr_code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(48)
            .map(char::from)
            .collect();

        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            user_id: params.user_id,
            full_name: params.full_name,
            email: params.email,
            phone: params.phone,
            tickets: params.tickets,
            total_amount: params.total_amount,
            status: STATUS_ACTIVE.to_string(),
            payment_status: params.payment_status,
            qr_code,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}
