//! Ticket and ticket type models and DTOs.

use eventpass_core::error::CoreError;
use eventpass_core::ticket::{TicketFacts, TicketStatus};
use eventpass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A ticket type row from the `ticket_types` table (reference data).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: DbId,
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for seeding a ticket type.
#[derive(Debug, Clone)]
pub struct CreateTicketType {
    pub name: String,
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

/// A ticket row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: DbId,
    pub ticket_type_id: DbId,
    pub enrollment_id: DbId,
    /// `RESERVED` or `PAID`; see [`TicketStatus`].
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Ticket {
    pub fn parsed_status(&self) -> Result<TicketStatus, CoreError> {
        TicketStatus::parse(&self.status)
    }
}

/// A ticket joined with its type, as returned to the ticket holder.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketWithType {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub ticket_type: TicketType,
}

impl TicketWithType {
    /// The attributes the hotel eligibility rule needs.
    pub fn facts(&self) -> Result<TicketFacts, CoreError> {
        Ok(TicketFacts {
            status: self.ticket.parsed_status()?,
            is_remote: self.ticket_type.is_remote,
            includes_hotel: self.ticket_type.includes_hotel,
        })
    }
}

/// Request body for `POST /tickets`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReserveTicket {
    #[validate(range(min = 1))]
    pub ticket_type_id: DbId,
}

/// DTO for creating a ticket against an enrollment.
#[derive(Debug, Clone)]
pub struct CreateTicket {
    pub enrollment_id: DbId,
    pub ticket_type_id: DbId,
    pub status: TicketStatus,
}
