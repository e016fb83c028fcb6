use crate::domain::{models::registration::Registration, ports::RegistrationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use tracing::warn;

pub struct PostgresRegistrationRepo {
    pool: PgPool,
}

impl PostgresRegistrationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepo {
    async fn create_with_reservation(&self, registration: &Registration) -> Result<Registration, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Conditional increment takes the event row lock, serializing
        // concurrent reservations for the same event.
        let reserved = sqlx::query(
            "UPDATE events SET current_registrations = current_registrations + $1
             WHERE id = $2
               AND (max_registrations IS NULL OR current_registrations + $1 <= max_registrations)"
        )
            .bind(registration.tickets)
            .bind(&registration.event_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        if reserved.rows_affected() == 0 {
            return Err(AppError::CapacityExhausted);
        }

        let duplicate = sqlx::query(
            "SELECT id FROM registrations
             WHERE event_id = $1 AND LOWER(email) = LOWER($2) AND status = 'ACTIVE'"
        )
            .bind(&registration.event_id)
            .bind(&registration.email)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        if duplicate.is_some() {
            return Err(AppError::DuplicateRegistration);
        }

        let created = sqlx::query_as::<_, Registration>(
            "INSERT INTO registrations (id, event_id, user_id, full_name, email, phone, tickets, total_amount, status, payment_status, qr_code, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING *"
        )
            .bind(&registration.id).bind(&registration.event_id).bind(&registration.user_id)
            .bind(&registration.full_name).bind(&registration.email).bind(&registration.phone)
            .bind(registration.tickets).bind(registration.total_amount).bind(&registration.status)
            .bind(&registration.payment_status).bind(&registration.qr_code).bind(registration.created_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_qr_code(&self, code: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE qr_code = $1").bind(code).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_active_by_email(&self, event_id: &str, email: &str) -> Result<Option<Registration>, AppError> {
        sqlx::query_as::<_, Registration>(
            "SELECT * FROM registrations WHERE event_id = $1 AND LOWER(email) = LOWER($2) AND status = 'ACTIVE'"
        )
            .bind(event_id).bind(email)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Registration>, AppError> {
        sqlx::query_as::<_, Registration>("SELECT * FROM registrations WHERE event_id = $1 ORDER BY created_at ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn cancel_with_release(&self, registration: &Registration) -> Result<Registration, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let cancelled = sqlx::query_as::<_, Registration>(
            "UPDATE registrations SET status = 'CANCELLED' WHERE id = $1 AND status = 'ACTIVE' RETURNING *"
        )
            .bind(&registration.id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(cancelled) = cancelled else {
            return Err(AppError::Conflict("Registration is already cancelled".to_string()));
        };

        let row = sqlx::query("SELECT current_registrations FROM events WHERE id = $1 FOR UPDATE")
            .bind(&cancelled.event_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        let current: i32 = row.get("current_registrations");

        if current < cancelled.tickets {
            warn!(
                event_id = %cancelled.event_id,
                current,
                releasing = cancelled.tickets,
                "seat count inconsistency on release, clamping at zero"
            );
        }

        sqlx::query("UPDATE events SET current_registrations = GREATEST(0, current_registrations - $1) WHERE id = $2")
            .bind(cancelled.tickets)
            .bind(&cancelled.event_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(cancelled)
    }

    async fn update_payment_status(&self, id: &str, payment_status: &str) -> Result<Registration, AppError> {
        sqlx::query_as::<_, Registration>(
            "UPDATE registrations SET payment_status = $1 WHERE id = $2 RETURNING *"
        )
            .bind(payment_status).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Registration not found".into()))
    }
}
