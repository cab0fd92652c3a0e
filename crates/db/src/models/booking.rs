//! Booking model, DTOs and write outcomes.

use eventpass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::hotel::Room;

/// A booking row from the `bookings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: DbId,
    pub user_id: DbId,
    pub room_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's booking with the booked room.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingWithRoom {
    pub id: DbId,
    pub room: Room,
}

/// Request body for `POST /booking` and `PUT /booking/{booking_id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[validate(range(min = 1))]
    pub room_id: DbId,
}

/// Outcome of a capacity-guarded booking write.
#[derive(Debug, Clone)]
pub enum BookingWrite {
    /// The row was inserted or moved.
    Written(Booking),
    /// The room had no vacancy once locked.
    RoomFull,
    /// The room no longer exists.
    RoomMissing,
    /// Another booking for the same user was committed first.
    AlreadyBooked,
    /// A move was requested but the user has no booking.
    NoBooking,
}
