//! Repository for the `hotels` and `rooms` tables.

use eventpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::hotel::{CreateHotel, CreateRoom, Hotel, HotelWithRooms, Room};

/// Hotel column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, image, created_at, updated_at";

/// Room column list shared across queries to avoid repetition.
const ROOM_COLUMNS: &str = "id, hotel_id, name, capacity, created_at, updated_at";

/// Provides access to hotels and their rooms.
pub struct HotelRepo;

impl HotelRepo {
    /// Insert a hotel, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHotel) -> Result<Hotel, sqlx::Error> {
        let query = format!("INSERT INTO hotels (name, image) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Hotel>(&query)
            .bind(&input.name)
            .bind(&input.image)
            .fetch_one(pool)
            .await
    }

    /// Insert a room, returning the created row.
    pub async fn create_room(pool: &PgPool, input: &CreateRoom) -> Result<Room, sqlx::Error> {
        let query = format!(
            "INSERT INTO rooms (hotel_id, name, capacity)
             VALUES ($1, $2, $3)
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, Room>(&query)
            .bind(input.hotel_id)
            .bind(&input.name)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// List all hotels ordered by ID, without rooms.
    pub async fn list(pool: &PgPool) -> Result<Vec<Hotel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotels ORDER BY id");
        sqlx::query_as::<_, Hotel>(&query).fetch_all(pool).await
    }

    /// Find a hotel together with all of its rooms.
    pub async fn find_with_rooms(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hotels WHERE id = $1");
        let Some(hotel) = sqlx::query_as::<_, Hotel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let query = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE hotel_id = $1 ORDER BY id");
        let rooms = sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;

        Ok(Some(HotelWithRooms { hotel, rooms }))
    }

    /// Find a room by internal ID.
    pub async fn find_room(pool: &PgPool, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let query = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = $1");
        sqlx::query_as::<_, Room>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
