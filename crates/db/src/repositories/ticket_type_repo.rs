//! Repository for the `ticket_types` reference table.

use eventpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket::{CreateTicketType, TicketType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, price, is_remote, includes_hotel, created_at, updated_at";

/// Provides access to ticket types.
pub struct TicketTypeRepo;

impl TicketTypeRepo {
    /// Insert a ticket type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTicketType,
    ) -> Result<TicketType, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_types (name, price, is_remote, includes_hotel)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketType>(&query)
            .bind(&input.name)
            .bind(input.price)
            .bind(input.is_remote)
            .bind(input.includes_hotel)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket type by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TicketType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ticket_types WHERE id = $1");
        sqlx::query_as::<_, TicketType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all ticket types ordered by ID.
    pub async fn list(pool: &PgPool) -> Result<Vec<TicketType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ticket_types ORDER BY id");
        sqlx::query_as::<_, TicketType>(&query)
            .fetch_all(pool)
            .await
    }
}
