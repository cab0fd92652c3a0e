//! Payment model and DTOs.

use std::borrow::Cow;

use eventpass_core::payment::LAST_DIGITS_LEN;
use eventpass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A payment row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: DbId,
    pub ticket_id: DbId,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a settled payment.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub ticket_id: DbId,
    pub value: i32,
    pub card_issuer: String,
    pub card_last_digits: String,
}

/// Request body for `POST /payments`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[validate(range(min = 1))]
    pub ticket_id: DbId,
    #[validate(nested)]
    pub card_data: CardData,
}

/// Card details supplied with a payment. Never persisted beyond the issuer
/// and the last four digits.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[validate(length(min = 1))]
    pub issuer: String,
    #[validate(custom(function = validate_card_number))]
    pub number: Digits,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub expiration_date: String,
    #[validate(custom(function = validate_cvv))]
    pub cvv: Digits,
}

/// A digit string that clients may send either as a JSON number or string.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Digits {
    Number(u64),
    Text(String),
}

impl Digits {
    pub fn as_digits(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Longest accepted card verification code.
const CVV_MAX_LEN: usize = 4;

fn validate_card_number(number: &Digits) -> Result<(), ValidationError> {
    let digits = number.as_digits();
    if !is_ascii_digits(&digits) {
        return Err(digits_error("card_number", "Card number must contain only digits"));
    }
    if digits.len() < LAST_DIGITS_LEN {
        return Err(digits_error("card_number", "Card number is too short"));
    }
    Ok(())
}

fn validate_cvv(cvv: &Digits) -> Result<(), ValidationError> {
    let digits = cvv.as_digits();
    if !is_ascii_digits(&digits) || digits.len() > CVV_MAX_LEN {
        return Err(digits_error("cvv", "CVV must be 1 to 4 digits"));
    }
    Ok(())
}

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn digits_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
