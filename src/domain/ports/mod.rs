use crate::domain::models::{
    attendance::AttendanceRecord,
    auth::RefreshTokenRecord,
    event::Event,
    registration::Registration,
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn count(&self) -> Result<i64, AppError>;
    /// Overwrites the stored QR token. Single-row update: regeneration
    /// racing a validation resolves last-writer-wins, never half-written.
    async fn update_qr_token(&self, id: &str, token: &str, issued_at: DateTime<Utc>) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self) -> Result<Vec<Event>, AppError>;
    /// Updates event attributes. `current_registrations` is owned by the
    /// registration transactions and is deliberately not written here.
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Reserves seats and inserts the record in one transaction: a
    /// conditional increment of the event's seat count (zero rows affected
    /// means the capacity gate lost the race and the whole transaction
    /// rolls back), a duplicate-active-email guard, then the insert.
    async fn create_with_reservation(&self, registration: &Registration) -> Result<Registration, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError>;
    async fn find_by_qr_code(&self, code: &str) -> Result<Option<Registration>, AppError>;
    async fn find_active_by_email(&self, event_id: &str, email: &str) -> Result<Option<Registration>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError>;
    /// Flips ACTIVE to CANCELLED and releases the seats in one transaction.
    /// A registration that is already cancelled is rejected without
    /// touching the seat count.
    async fn cancel_with_release(&self, registration: &Registration) -> Result<Registration, AppError>;
    async fn update_payment_status(&self, id: &str, payment_status: &str) -> Result<Registration, AppError>;
}

#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, AppError>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<AttendanceRecord>, AppError>;
    async fn list_recent(&self, limit: i64) -> Result<Vec<AttendanceRecord>, AppError>;
}
