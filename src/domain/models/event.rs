use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const PAYMENT_TYPE_FREE: &str = "FREE";
pub const PAYMENT_TYPE_DONATION: &str = "DONATION";
pub const PAYMENT_TYPE_PAID: &str = "PAID";

/// A schedulable occurrence registrations are made against.
///
/// `current_registrations` is a denormalized seat count. It is mutated only
/// by the registration create/cancel transactions, never written directly
/// by handlers.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub price: i64,
    pub currency: String,
    pub payment_type: String, // FREE, DONATION, PAID
    pub max_registrations: Option<i32>,
    pub current_registrations: i32,
    pub registration_enabled: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub price: i64,
    pub currency: String,
    pub payment_type: String,
    pub max_registrations: Option<i32>,
    pub registration_enabled: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            location: params.location,
            start_at: params.start_at,
            end_at: params.end_at,
            price: params.price,
            currency: params.currency,
            payment_type: params.payment_type,
            max_registrations: params.max_registrations,
            current_registrations: 0,
            registration_enabled: params.registration_enabled,
            registration_deadline: params.registration_deadline,
            created_at: Utc::now(),
        }
    }

    /// Seats still available, or `None` when capacity is unlimited.
    pub fn available_seats(&self) -> Option<i32> {
        self.max_registrations.map(|max| (max - self.current_registrations).max(0))
    }
}
