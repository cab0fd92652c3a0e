//! Repository for the `tickets` table.

use eventpass_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::ticket::{CreateTicket, Ticket, TicketType, TicketWithType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, ticket_type_id, enrollment_id, status, created_at, updated_at";

/// Flat row for a ticket joined with its type.
#[derive(sqlx::FromRow)]
struct TicketWithTypeRow {
    id: DbId,
    ticket_type_id: DbId,
    enrollment_id: DbId,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    type_name: String,
    type_price: i32,
    type_is_remote: bool,
    type_includes_hotel: bool,
    type_created_at: Timestamp,
    type_updated_at: Timestamp,
}

impl From<TicketWithTypeRow> for TicketWithType {
    fn from(row: TicketWithTypeRow) -> Self {
        TicketWithType {
            ticket: Ticket {
                id: row.id,
                ticket_type_id: row.ticket_type_id,
                enrollment_id: row.enrollment_id,
                status: row.status,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            ticket_type: TicketType {
                id: row.ticket_type_id,
                name: row.type_name,
                price: row.type_price,
                is_remote: row.type_is_remote,
                includes_hotel: row.type_includes_hotel,
                created_at: row.type_created_at,
                updated_at: row.type_updated_at,
            },
        }
    }
}

/// Provides access to tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a ticket, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let query = format!(
            "INSERT INTO tickets (enrollment_id, ticket_type_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(input.enrollment_id)
            .bind(input.ticket_type_id)
            .bind(input.status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = $1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the ticket held by a user (through their enrollment), joined with
    /// its ticket type.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        let row = sqlx::query_as::<_, TicketWithTypeRow>(
            "SELECT t.id, t.ticket_type_id, t.enrollment_id, t.status,
                    t.created_at, t.updated_at,
                    tt.name AS type_name,
                    tt.price AS type_price,
                    tt.is_remote AS type_is_remote,
                    tt.includes_hotel AS type_includes_hotel,
                    tt.created_at AS type_created_at,
                    tt.updated_at AS type_updated_at
             FROM tickets t
             JOIN ticket_types tt ON tt.id = t.ticket_type_id
             JOIN enrollments e ON e.id = t.enrollment_id
             WHERE e.user_id = $1
             ORDER BY t.created_at DESC
             LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(TicketWithType::from))
    }
}
