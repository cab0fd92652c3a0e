//! Hotel listing and detail, gated on hotel eligibility.

use std::sync::Arc;

use eventpass_core::error::CoreError;
use eventpass_core::types::DbId;
use eventpass_db::models::hotel::{Hotel, HotelWithRooms};

use super::eligibility::EligibilityGate;
use super::store::HotelStore;
use crate::error::AppResult;

pub struct HotelService {
    eligibility: EligibilityGate,
    hotels: Arc<dyn HotelStore>,
}

impl HotelService {
    pub fn new(eligibility: EligibilityGate, hotels: Arc<dyn HotelStore>) -> Self {
        Self {
            eligibility,
            hotels,
        }
    }

    /// List every hotel. Fails with NotFound when there are none.
    pub async fn list_for_user(&self, user_id: DbId) -> AppResult<Vec<Hotel>> {
        self.eligibility.require_hotel_access(user_id).await?;

        let hotels = self.hotels.list_hotels().await?;
        if hotels.is_empty() {
            return Err(CoreError::NotFoundForUser {
                entity: "Hotel",
                user_id,
            }
            .into());
        }
        Ok(hotels)
    }

    /// Fetch one hotel with all of its rooms.
    pub async fn rooms_for_user(&self, user_id: DbId, hotel_id: DbId) -> AppResult<HotelWithRooms> {
        self.eligibility.require_hotel_access(user_id).await?;

        self.hotels
            .find_hotel_with_rooms(hotel_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Hotel",
                    id: hotel_id,
                }
                .into()
            })
    }
}
