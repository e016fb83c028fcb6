use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, location, start_at, end_at, price, currency, payment_type, max_registrations, current_registrations, registration_enabled, registration_deadline, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description).bind(&event.location)
            .bind(event.start_at).bind(event.end_at).bind(event.price).bind(&event.currency)
            .bind(&event.payment_type).bind(event.max_registrations).bind(event.current_registrations)
            .bind(event.registration_enabled).bind(event.registration_deadline).bind(event.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY start_at ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET title=$1, description=$2, location=$3, start_at=$4, end_at=$5, price=$6, currency=$7, payment_type=$8, max_registrations=$9, registration_enabled=$10, registration_deadline=$11
             WHERE id=$12
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(&event.location)
            .bind(event.start_at).bind(event.end_at).bind(event.price).bind(&event.currency)
            .bind(&event.payment_type).bind(event.max_registrations)
            .bind(event.registration_enabled).bind(event.registration_deadline)
            .bind(&event.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Event not found".into())); }
        Ok(())
    }
}
