//! Repository for the `enrollments` and `addresses` tables.

use eventpass_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{Address, Enrollment, UpsertEnrollment};

/// Enrollment column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, cpf, birthday, phone, created_at, updated_at";

/// Address column list shared across queries to avoid repetition.
const ADDRESS_COLUMNS: &str = "id, enrollment_id, cep, street, city, state, number, \
                               neighborhood, address_detail, created_at, updated_at";

/// Provides access to enrollments and their addresses.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Find the enrollment owned by a user.
    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Enrollment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM enrollments WHERE user_id = $1");
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the address attached to an enrollment.
    pub async fn find_address(
        pool: &PgPool,
        enrollment_id: DbId,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!("SELECT {ADDRESS_COLUMNS} FROM addresses WHERE enrollment_id = $1");
        sqlx::query_as::<_, Address>(&query)
            .bind(enrollment_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or update a user's enrollment and its address in one transaction.
    ///
    /// The enrollment is keyed by `user_id`, the address by the enrollment id.
    pub async fn upsert_with_address(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertEnrollment,
    ) -> Result<(Enrollment, Address), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO enrollments (user_id, name, cpf, birthday, phone)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id) DO UPDATE SET
                name = EXCLUDED.name,
                cpf = EXCLUDED.cpf,
                birthday = EXCLUDED.birthday,
                phone = EXCLUDED.phone,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        let enrollment = sqlx::query_as::<_, Enrollment>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.cpf)
            .bind(input.birthday)
            .bind(&input.phone)
            .fetch_one(&mut *tx)
            .await?;

        let address = &input.address;
        let query = format!(
            "INSERT INTO addresses
                (enrollment_id, cep, street, city, state, number, neighborhood, address_detail)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (enrollment_id) DO UPDATE SET
                cep = EXCLUDED.cep,
                street = EXCLUDED.street,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                number = EXCLUDED.number,
                neighborhood = EXCLUDED.neighborhood,
                address_detail = EXCLUDED.address_detail,
                updated_at = NOW()
             RETURNING {ADDRESS_COLUMNS}"
        );
        let address = sqlx::query_as::<_, Address>(&query)
            .bind(enrollment.id)
            .bind(&address.cep)
            .bind(&address.street)
            .bind(&address.city)
            .bind(&address.state)
            .bind(&address.number)
            .bind(&address.neighborhood)
            .bind(&address.address_detail)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((enrollment, address))
    }
}
