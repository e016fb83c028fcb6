use crate::domain::{models::attendance::AttendanceRecord, ports::AttendanceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAttendanceRepo {
    pool: SqlitePool,
}

impl SqliteAttendanceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for SqliteAttendanceRepo {
    async fn create(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, AppError> {
        sqlx::query_as::<_, AttendanceRecord>(
            "INSERT INTO attendance_records (id, user_id, registration_id, event_id, scanned_by, attendance_type, location, notes, scanned_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&record.id).bind(&record.user_id).bind(&record.registration_id).bind(&record.event_id)
            .bind(&record.scanned_by).bind(&record.attendance_type).bind(&record.location)
            .bind(&record.notes).bind(record.scanned_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<AttendanceRecord>, AppError> {
        sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance_records WHERE user_id = ? ORDER BY scanned_at DESC").bind(user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<AttendanceRecord>, AppError> {
        sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance_records WHERE event_id = ? ORDER BY scanned_at DESC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<AttendanceRecord>, AppError> {
        sqlx::query_as::<_, AttendanceRecord>("SELECT * FROM attendance_records ORDER BY scanned_at DESC LIMIT ?").bind(limit).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
