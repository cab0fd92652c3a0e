//! Room booking rules and the client-facing rejection messages.

use crate::error::CoreError;

/// The caller already holds a booking.
pub const MSG_ALREADY_BOOKED: &str = "User already have booked a room.";
/// The room has as many bookings as its capacity.
pub const MSG_ROOM_FULL: &str = "This room is already full.";
/// The ticket does not qualify for booking a room.
pub const MSG_TICKET_NOT_ELIGIBLE: &str =
    "User must have a ticket that is: presencial, includes hotel and is paid";
/// A room change was requested by a caller with no booking.
pub const MSG_NO_RESERVATION: &str = "User don't have any reservation!";
/// The booking id in the path is not the caller's booking.
pub const MSG_BOOKING_MISMATCH: &str = "bookingId provided does match user's bookingId";

/// Whether a room with `capacity` can take one more booking given
/// `occupied` existing bookings.
pub fn has_vacancy(occupied: i64, capacity: i32) -> bool {
    occupied < i64::from(capacity)
}

/// Reject with [`MSG_ROOM_FULL`] when the room is at or over capacity.
pub fn ensure_vacancy(occupied: i64, capacity: i32) -> Result<(), CoreError> {
    if has_vacancy(occupied, capacity) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(MSG_ROOM_FULL.to_string()))
    }
}
