//! Room booking workflow.
//!
//! Checks run in a fixed order and each one short-circuits the next:
//!
//! ```text
//! create:  existing booking -> room exists -> vacancy -> eligibility -> write
//! change:  room exists -> has booking -> booking id matches -> vacancy -> write
//! ```
//!
//! The final write re-checks vacancy under a row lock, so a request that
//! loses a race for the last slot is rejected with the same message the
//! pre-check would have produced.

use std::sync::Arc;

use eventpass_core::booking::{
    ensure_vacancy, MSG_ALREADY_BOOKED, MSG_BOOKING_MISMATCH, MSG_NO_RESERVATION,
    MSG_ROOM_FULL, MSG_TICKET_NOT_ELIGIBLE,
};
use eventpass_core::error::CoreError;
use eventpass_core::types::DbId;
use eventpass_db::models::booking::{Booking, BookingWithRoom, BookingWrite};
use eventpass_db::models::hotel::Room;

use super::eligibility::EligibilityGate;
use super::store::{BookingStore, HotelStore};
use crate::error::{AppError, AppResult};

pub struct BookingService {
    eligibility: EligibilityGate,
    bookings: Arc<dyn BookingStore>,
    hotels: Arc<dyn HotelStore>,
}

impl BookingService {
    pub fn new(
        eligibility: EligibilityGate,
        bookings: Arc<dyn BookingStore>,
        hotels: Arc<dyn HotelStore>,
    ) -> Self {
        Self {
            eligibility,
            bookings,
            hotels,
        }
    }

    /// The user's booking with its room.
    pub async fn find_for_user(&self, user_id: DbId) -> AppResult<BookingWithRoom> {
        self.bookings
            .find_user_booking(user_id)
            .await?
            .ok_or_else(|| {
                CoreError::NotFoundForUser {
                    entity: "Booking",
                    user_id,
                }
                .into()
            })
    }

    /// Book `room_id` for a user who has no booking yet.
    pub async fn create(&self, user_id: DbId, room_id: DbId) -> AppResult<Booking> {
        if self.bookings.find_user_booking(user_id).await?.is_some() {
            return Err(forbidden(MSG_ALREADY_BOOKED));
        }

        let room = self.find_room(room_id).await?;
        self.check_vacancy(&room).await?;

        match self.eligibility.require_hotel_access(user_id).await {
            Err(AppError::Core(CoreError::PaymentRequired(_))) => {
                return Err(forbidden(MSG_TICKET_NOT_ELIGIBLE));
            }
            other => other?,
        };

        let outcome = self
            .bookings
            .create_booking_within_capacity(user_id, room_id)
            .await?;
        let booking = written(outcome, room_id)?;

        tracing::info!(user_id, room_id, booking_id = booking.id, "Room booked");
        Ok(booking)
    }

    /// Move the user's booking to `room_id`, keeping its id.
    ///
    /// `booking_id` must be the id of the caller's own booking.
    pub async fn change_room(
        &self,
        user_id: DbId,
        room_id: DbId,
        booking_id: DbId,
    ) -> AppResult<Booking> {
        let room = self.find_room(room_id).await?;

        let current = self
            .bookings
            .find_user_booking(user_id)
            .await?
            .ok_or_else(|| forbidden(MSG_NO_RESERVATION))?;
        if current.id != booking_id {
            return Err(forbidden(MSG_BOOKING_MISMATCH));
        }

        self.check_vacancy(&room).await?;

        let outcome = self
            .bookings
            .move_booking_within_capacity(user_id, room_id)
            .await?;
        let booking = written(outcome, room_id)?;

        tracing::info!(
            user_id,
            booking_id = booking.id,
            from_room_id = current.room.id,
            to_room_id = room_id,
            "Booking moved",
        );
        Ok(booking)
    }

    async fn find_room(&self, room_id: DbId) -> AppResult<Room> {
        self.hotels.find_room(room_id).await?.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Room",
                id: room_id,
            }
            .into()
        })
    }

    async fn check_vacancy(&self, room: &Room) -> AppResult<()> {
        let occupied = self.bookings.count_room_bookings(room.id).await?;
        ensure_vacancy(occupied, room.capacity)?;
        Ok(())
    }
}

/// Map a guarded write outcome to the booking or the matching rejection.
fn written(outcome: BookingWrite, room_id: DbId) -> AppResult<Booking> {
    match outcome {
        BookingWrite::Written(booking) => Ok(booking),
        BookingWrite::RoomFull => Err(forbidden(MSG_ROOM_FULL)),
        BookingWrite::AlreadyBooked => Err(forbidden(MSG_ALREADY_BOOKED)),
        BookingWrite::NoBooking => Err(forbidden(MSG_NO_RESERVATION)),
        BookingWrite::RoomMissing => Err(CoreError::NotFound {
            entity: "Room",
            id: room_id,
        }
        .into()),
    }
}

fn forbidden(msg: &str) -> AppError {
    CoreError::Forbidden(msg.to_string()).into()
}
