//! Repository for the `payments` table.

use eventpass_core::ticket::TicketStatus;
use eventpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, ticket_id, value, card_issuer, card_last_digits, created_at, updated_at";

/// Provides access to payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Find the payment recorded for a ticket.
    pub async fn find_by_ticket_id(
        pool: &PgPool,
        ticket_id: DbId,
    ) -> Result<Option<Payment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM payments WHERE ticket_id = $1");
        sqlx::query_as::<_, Payment>(&query)
            .bind(ticket_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a payment and mark its ticket `PAID` in one transaction.
    ///
    /// A second settlement for the same ticket fails on `uq_payments_ticket_id`.
    pub async fn settle(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO payments (ticket_id, value, card_issuer, card_last_digits)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let payment = sqlx::query_as::<_, Payment>(&query)
            .bind(input.ticket_id)
            .bind(input.value)
            .bind(&input.card_issuer)
            .bind(&input.card_last_digits)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE tickets SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(input.ticket_id)
            .bind(TicketStatus::Paid.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(payment)
    }
}
