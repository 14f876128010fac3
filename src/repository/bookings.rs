//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails},
        enums::{BookingStatus, Priority},
    },
};

/// Insert payload for a new booking request
pub struct NewBooking<'a> {
    pub user_id: i32,
    pub equipment_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: &'a str,
    pub notes: Option<&'a str>,
    pub priority: Priority,
}

const DETAILS_SELECT: &str = r#"
    SELECT b.*,
           u.name as user_name, u.email as user_email, u.role as user_role,
           e.name as equipment_name, e.category as category, e.image_url as image_url
    FROM bookings b
    LEFT JOIN users u ON u.id = b.user_id
    LEFT JOIN equipment e ON e.id = b.equipment_id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// All PENDING/APPROVED bookings for one piece of equipment. These are
    /// the intervals a new request must not overlap.
    pub async fn active_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT * FROM bookings
            WHERE equipment_id = $1 AND status IN ('PENDING', 'APPROVED')
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a new PENDING booking
    pub async fn insert(&self, booking: &NewBooking<'_>) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (user_id, equipment_id, start_time, end_time, status, purpose, notes, priority)
            VALUES ($1, $2, $3, $4, 'PENDING', $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(booking.user_id)
        .bind(booking.equipment_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.purpose)
        .bind(booking.notes)
        .bind(booking.priority)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update status and admin notes in place
    pub async fn update_status(
        &self,
        id: i32,
        status: BookingStatus,
        admin_notes: Option<&str>,
    ) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $1, admin_notes = $2, updated_at = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(admin_notes)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Bookings owned by one user, optionally filtered by status, newest first
    pub async fn list_for_user(
        &self,
        user_id: i32,
        status: Option<BookingStatus>,
    ) -> AppResult<Vec<BookingDetails>> {
        let rows = if let Some(status) = status {
            sqlx::query(&format!(
                "{} WHERE b.user_id = $1 AND b.status = $2 ORDER BY b.created_at DESC",
                DETAILS_SELECT
            ))
            .bind(user_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!(
                "{} WHERE b.user_id = $1 ORDER BY b.created_at DESC",
                DETAILS_SELECT
            ))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?
        };
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// All bookings, optionally filtered by status, newest first
    pub async fn list_all(&self, status: Option<BookingStatus>) -> AppResult<Vec<BookingDetails>> {
        let rows = if let Some(status) = status {
            sqlx::query(&format!(
                "{} WHERE b.status = $1 ORDER BY b.created_at DESC",
                DETAILS_SELECT
            ))
            .bind(status)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!("{} ORDER BY b.created_at DESC", DETAILS_SELECT))
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Pending bookings oldest first. The priority ordering of the admin
    /// queue is applied in memory on top of this (see the bookings service),
    /// so equal-priority ties keep ascending created_at.
    pub async fn list_pending(&self) -> AppResult<Vec<BookingDetails>> {
        let rows = sqlx::query(&format!(
            "{} WHERE b.status = 'PENDING' ORDER BY b.created_at ASC",
            DETAILS_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(details_from_row).collect())
    }
}

/// Map one joined row; missing user/equipment rows (hard-deleted references)
/// degrade to placeholder display values.
fn details_from_row(row: &PgRow) -> BookingDetails {
    BookingDetails {
        id: row.get("id"),
        user_id: row.get("user_id"),
        equipment_id: row.get("equipment_id"),
        start_time: row.get("start_time"),
        end_time: row.get("end_time"),
        status: row.get("status"),
        purpose: row.get("purpose"),
        notes: row.get("notes"),
        admin_notes: row.get("admin_notes"),
        priority: row.get("priority"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        user_name: row.get("user_name"),
        user_email: row.get("user_email"),
        user_role: row.get("user_role"),
        equipment_name: row
            .get::<Option<String>, _>("equipment_name")
            .unwrap_or_else(|| "Unknown Equipment".to_string()),
        category: row.get("category"),
        image_url: row.get("image_url"),
    }
}
