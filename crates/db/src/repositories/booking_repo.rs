//! Repository for the `bookings` table.
//!
//! The guarded writes lock the target room row (`SELECT ... FOR UPDATE`) and
//! re-count its bookings inside the same transaction, so concurrent requests
//! for the last slot serialise on the room and exactly one of them wins. The
//! `uq_bookings_user_id` index guarantees one booking per user.

use eventpass_core::booking::has_vacancy;
use eventpass_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::is_unique_violation;
use crate::models::booking::{Booking, BookingWithRoom, BookingWrite};
use crate::models::hotel::Room;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, room_id, created_at, updated_at";

/// Unique index enforcing one booking per user.
pub const UQ_BOOKINGS_USER_ID: &str = "uq_bookings_user_id";

/// Flat row for a booking joined with its room.
#[derive(sqlx::FromRow)]
struct BookingWithRoomRow {
    id: DbId,
    room_id: DbId,
    hotel_id: DbId,
    room_name: String,
    capacity: i32,
    room_created_at: Timestamp,
    room_updated_at: Timestamp,
}

impl From<BookingWithRoomRow> for BookingWithRoom {
    fn from(row: BookingWithRoomRow) -> Self {
        BookingWithRoom {
            id: row.id,
            room: Room {
                id: row.room_id,
                hotel_id: row.hotel_id,
                name: row.room_name,
                capacity: row.capacity,
                created_at: row.room_created_at,
                updated_at: row.room_updated_at,
            },
        }
    }
}

/// Provides access to room bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking without any capacity check. Used for seeding.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(room_id)
            .fetch_one(pool)
            .await
    }

    /// Find a user's booking with its room.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error> {
        let row = sqlx::query_as::<_, BookingWithRoomRow>(
            "SELECT b.id, r.id AS room_id, r.hotel_id, r.name AS room_name, r.capacity,
                    r.created_at AS room_created_at, r.updated_at AS room_updated_at
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             WHERE b.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(BookingWithRoom::from))
    }

    /// Count the bookings currently held on a room.
    pub async fn count_by_room(pool: &PgPool, room_id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }

    /// Insert a booking for `user_id` on `room_id` only if the room still has
    /// a free slot once locked.
    pub async fn create_within_capacity(
        pool: &PgPool,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(outcome) = Self::lock_and_check_vacancy(&mut tx, room_id).await? {
            return Ok(outcome);
        }

        let query = format!(
            "INSERT INTO bookings (user_id, room_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(room_id)
            .fetch_one(&mut *tx)
            .await;

        match inserted {
            Ok(booking) => {
                tx.commit().await?;
                Ok(BookingWrite::Written(booking))
            }
            Err(err) if is_unique_violation(&err, UQ_BOOKINGS_USER_ID) => {
                Ok(BookingWrite::AlreadyBooked)
            }
            Err(err) => Err(err),
        }
    }

    /// Move the user's single booking to `room_id` only if the room still has
    /// a free slot once locked. The booking keeps its ID.
    pub async fn move_within_capacity(
        pool: &PgPool,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if let Some(outcome) = Self::lock_and_check_vacancy(&mut tx, room_id).await? {
            return Ok(outcome);
        }

        let query = format!(
            "UPDATE bookings SET room_id = $2, updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?;

        match updated {
            Some(booking) => {
                tx.commit().await?;
                Ok(BookingWrite::Written(booking))
            }
            None => Ok(BookingWrite::NoBooking),
        }
    }

    /// Lock the room row and count its bookings.
    ///
    /// Returns `Some(outcome)` when the write must not proceed.
    async fn lock_and_check_vacancy(
        conn: &mut PgConnection,
        room_id: DbId,
    ) -> Result<Option<BookingWrite>, sqlx::Error> {
        let capacity: Option<(i32,)> =
            sqlx::query_as("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
                .bind(room_id)
                .fetch_optional(&mut *conn)
                .await?;
        let Some((capacity,)) = capacity else {
            return Ok(Some(BookingWrite::RoomMissing));
        };

        let occupied: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&mut *conn)
            .await?;

        if has_vacancy(occupied.0, capacity) {
            Ok(None)
        } else {
            Ok(Some(BookingWrite::RoomFull))
        }
    }
}
