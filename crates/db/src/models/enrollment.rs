//! Enrollment and address models and DTOs.

use chrono::NaiveDate;
use eventpass_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// An enrollment row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub name: String,
    pub cpf: String,
    pub birthday: NaiveDate,
    pub phone: String,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// An address row from the `addresses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub enrollment_id: DbId,
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: Timestamp,
    #[serde(skip_serializing)]
    pub updated_at: Timestamp,
}

/// An enrollment together with its address, as returned to the owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentWithAddress {
    #[serde(flatten)]
    pub enrollment: Enrollment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// DTO for creating or updating the caller's enrollment and address.
///
/// CPF and CEP formats are checked by the workflow, which also normalises
/// them to bare digits before the upsert.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertEnrollment {
    #[validate(length(min = 3, max = 255))]
    pub name: String,
    pub cpf: String,
    pub birthday: NaiveDate,
    #[validate(length(min = 10, max = 15))]
    pub phone: String,
    #[validate(nested)]
    pub address: UpsertAddress,
}

/// Address half of [`UpsertEnrollment`].
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAddress {
    pub cep: String,
    #[validate(length(min = 1, max = 255))]
    pub street: String,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
    #[validate(length(equal = 2))]
    pub state: String,
    #[validate(length(min = 1, max = 20))]
    pub number: String,
    #[validate(length(min = 1, max = 255))]
    pub neighborhood: String,
    pub address_detail: Option<String>,
}
