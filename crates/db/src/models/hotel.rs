//! Hotel and room models and DTOs.

use eventpass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A hotel row from the `hotels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: DbId,
    pub name: String,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A room row from the `rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: DbId,
    pub hotel_id: DbId,
    pub name: String,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A hotel with all of its rooms.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelWithRooms {
    #[serde(flatten)]
    pub hotel: Hotel,
    pub rooms: Vec<Room>,
}

/// DTO for seeding a hotel.
#[derive(Debug, Clone)]
pub struct CreateHotel {
    pub name: String,
    pub image: String,
}

/// DTO for seeding a room. `capacity` must be positive.
#[derive(Debug, Clone)]
pub struct CreateRoom {
    pub hotel_id: DbId,
    pub name: String,
    pub capacity: i32,
}
