//! Simulated card payment rules.
//!
//! No gateway is involved: a payment is accepted as long as the card data is
//! well formed. Only the issuer and the last four digits of the card number
//! are ever stored.

use crate::error::CoreError;
use crate::ticket::TicketStatus;

/// Number of trailing card digits kept on the payment record.
pub const LAST_DIGITS_LEN: usize = 4;

/// Message returned when a ticket has already been paid for.
pub const MSG_ALREADY_PAID: &str = "Ticket is already paid";

/// Extract the last four digits of a card number.
///
/// The number must consist of ASCII digits only and be at least four long.
pub fn card_last_digits(number: &str) -> Result<String, CoreError> {
    let number = number.trim();
    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::Validation(
            "Card number must contain only digits".into(),
        ));
    }
    if number.len() < LAST_DIGITS_LEN {
        return Err(CoreError::Validation(format!(
            "Card number must have at least {LAST_DIGITS_LEN} digits"
        )));
    }
    Ok(number[number.len() - LAST_DIGITS_LEN..].to_string())
}

/// Ensure a ticket in `status` can still be paid for.
pub fn ensure_payable(status: TicketStatus) -> Result<(), CoreError> {
    if status.can_transition_to(TicketStatus::Paid) {
        Ok(())
    } else {
        Err(CoreError::Conflict(MSG_ALREADY_PAID.into()))
    }
}
