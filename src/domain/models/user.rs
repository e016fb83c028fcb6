use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::services::verification;

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_MEMBER: &str = "MEMBER";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String, // ADMIN, MEMBER
    pub full_name: String,
    pub email: String,
    pub qr_token: String,
    pub qr_token_issued_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, password_hash: String, role: String, full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            password_hash,
            role,
            full_name,
            email,
            qr_token: verification::generate_qr_token(),
            qr_token_issued_at: now,
            created_at: now,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}
