//! Enrollment and address workflow.

use std::sync::Arc;

use eventpass_core::address::{normalize_cep, normalize_cpf};
use eventpass_core::types::DbId;
use eventpass_db::models::enrollment::{EnrollmentWithAddress, UpsertEnrollment};

use super::address_lookup::{AddressInfo, AddressLookup};
use super::store::EnrollmentStore;
use crate::error::{AppError, AppResult};

pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentStore>,
    lookup: Arc<dyn AddressLookup>,
}

impl EnrollmentService {
    pub fn new(enrollments: Arc<dyn EnrollmentStore>, lookup: Arc<dyn AddressLookup>) -> Self {
        Self {
            enrollments,
            lookup,
        }
    }

    /// The caller's enrollment with its address. A missing enrollment is a
    /// bad request.
    pub async fn find_for_user(&self, user_id: DbId) -> AppResult<EnrollmentWithAddress> {
        let enrollment = self
            .enrollments
            .find_enrollment(user_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("User has no enrollment".into()))?;
        let address = self.enrollments.find_address(enrollment.id).await?;

        Ok(EnrollmentWithAddress {
            enrollment,
            address,
        })
    }

    /// Create or update the caller's enrollment and address.
    ///
    /// CPF and CEP are normalised to bare digits, and the CEP must resolve
    /// through the lookup service before anything is written.
    pub async fn upsert(
        &self,
        user_id: DbId,
        mut input: UpsertEnrollment,
    ) -> AppResult<EnrollmentWithAddress> {
        input.cpf = normalize_cpf(&input.cpf)?;
        input.address.cep = normalize_cep(&input.address.cep)?;

        if self.resolve(&input.address.cep).await?.is_none() {
            return Err(AppError::BadRequest("CEP not valid".into()));
        }

        let (enrollment, address) = self.enrollments.upsert_enrollment(user_id, &input).await?;
        tracing::info!(user_id, enrollment_id = enrollment.id, "Enrollment saved");

        Ok(EnrollmentWithAddress {
            enrollment,
            address: Some(address),
        })
    }

    /// Resolve a raw CEP to address details.
    pub async fn address_for_cep(&self, raw_cep: &str) -> AppResult<AddressInfo> {
        let cep = normalize_cep(raw_cep)?;
        self.resolve(&cep)
            .await?
            .ok_or_else(|| AppError::BadRequest("CEP not found".into()))
    }

    async fn resolve(&self, cep: &str) -> AppResult<Option<AddressInfo>> {
        self.lookup
            .lookup(cep)
            .await
            .map_err(|e| AppError::InternalError(format!("Address lookup failed: {e}")))
    }
}
