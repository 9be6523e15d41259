//! # Reservation Repository
//!
//! Database operations for bookings.
//!
//! ## Guest History Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                "My Reservations" Query Shape                        │
//! │                                                                     │
//! │  reservations ──JOIN──► users (the guest)                           │
//! │       │                                                             │
//! │       └───────JOIN──► properties (what was booked)                  │
//! │                                                                     │
//! │  WHERE guest_id = ?  ORDER BY start_date DESC  LIMIT ?              │
//! │                                                                     │
//! │  One row per stay, newest first, property display fields            │
//! │  flattened in so the page renders from a single round-trip.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use haven_core::{CoreError, GuestReservation, NewReservation, Reservation};

/// Repository for reservation database operations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Gets a guest's reservations together with the booked properties.
    ///
    /// ## Arguments
    /// * `guest_id` - The guest whose history to fetch
    /// * `limit` - Maximum rows to return
    ///
    /// ## Returns
    /// At most `limit` rows, ordered by start_date descending (most
    /// recent stay first). A guest with no reservations gets an empty
    /// vec, not an error.
    pub async fn for_guest(&self, guest_id: &str, limit: i64) -> DbResult<Vec<GuestReservation>> {
        debug!(guest_id = %guest_id, limit, "Fetching guest reservations");

        let rows = sqlx::query_as::<_, GuestReservation>(
            r#"
            SELECT
                reservations.id,
                reservations.guest_id,
                reservations.property_id,
                reservations.start_date,
                reservations.end_date,
                properties.title,
                properties.city,
                properties.thumbnail_photo_url,
                properties.cost_per_night_cents,
                properties.number_of_bedrooms,
                properties.number_of_bathrooms,
                properties.parking_spaces
            FROM reservations
            JOIN users ON users.id = reservations.guest_id
            JOIN properties ON properties.id = reservations.property_id
            WHERE reservations.guest_id = ?1
            ORDER BY reservations.start_date DESC
            LIMIT ?2
            "#,
        )
        .bind(guest_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Guest reservations fetched");
        Ok(rows)
    }

    /// Books a stay and returns the inserted row.
    ///
    /// ## Returns
    /// * `Ok(Reservation)` - The inserted row
    /// * `Err(DbError::Domain)` - The date range is inverted or empty
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown guest or property
    pub async fn insert(&self, new_reservation: &NewReservation) -> DbResult<Reservation> {
        if new_reservation.end_date <= new_reservation.start_date {
            return Err(CoreError::InvalidStayRange {
                start: new_reservation.start_date.to_string(),
                end: new_reservation.end_date.to_string(),
            }
            .into());
        }

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            start_date: new_reservation.start_date,
            end_date: new_reservation.end_date,
            property_id: new_reservation.property_id.clone(),
            guest_id: new_reservation.guest_id.clone(),
            created_at: Utc::now(),
        };

        debug!(
            id = %reservation.id,
            property_id = %reservation.property_id,
            "Inserting reservation"
        );

        sqlx::query(
            r#"
            INSERT INTO reservations (id, start_date, end_date, property_id, guest_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&reservation.id)
        .bind(reservation.start_date)
        .bind(reservation.end_date)
        .bind(&reservation.property_id)
        .bind(&reservation.guest_id)
        .bind(reservation.created_at)
        .execute(&self.pool)
        .await?;

        Ok(reservation)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
