//! Ticket lifecycle and the hotel eligibility rule.
//!
//! A ticket is created `RESERVED` and moves to `PAID` exactly once, when a
//! payment settles. Hotel listings, room details and bookings are only open
//! to holders of a paid, in-person ticket whose type includes hotel.

use crate::error::CoreError;

/// Ticket reserved against an enrollment, awaiting payment.
pub const STATUS_RESERVED: &str = "RESERVED";
/// Ticket paid for; terminal state.
pub const STATUS_PAID: &str = "PAID";

/// Message returned when a ticket fails the hotel eligibility rule.
pub const MSG_HOTEL_NOT_INCLUDED: &str =
    "Ticket must be paid, in-person and include hotel accommodation";

/// Ticket status enum with string conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Reserved,
    Paid,
}

impl TicketStatus {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reserved => STATUS_RESERVED,
            Self::Paid => STATUS_PAID,
        }
    }

    /// Parse the database string representation.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_RESERVED => Ok(Self::Reserved),
            STATUS_PAID => Ok(Self::Paid),
            other => Err(CoreError::Internal(format!(
                "Unknown ticket status: {other}"
            ))),
        }
    }

    /// Whether a ticket in this status may move to `next`.
    ///
    /// Only `RESERVED -> PAID` is allowed.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        matches!((self, next), (Self::Reserved, Self::Paid))
    }
}

/// Why a ticket does not grant hotel access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligibility {
    NotPaid,
    Remote,
    HotelNotIncluded,
}

impl Ineligibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotPaid => "not_paid",
            Self::Remote => "remote",
            Self::HotelNotIncluded => "hotel_not_included",
        }
    }
}

/// The attributes of a ticket and its type that the eligibility rule reads.
#[derive(Debug, Clone, Copy)]
pub struct TicketFacts {
    pub status: TicketStatus,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

/// Check that a ticket grants hotel access.
///
/// All three conditions must hold at once: status is `PAID`, the type is
/// not remote, and the type includes hotel. The first failing condition is
/// reported.
pub fn check_hotel_eligibility(facts: TicketFacts) -> Result<(), Ineligibility> {
    if facts.status != TicketStatus::Paid {
        return Err(Ineligibility::NotPaid);
    }
    if facts.is_remote {
        return Err(Ineligibility::Remote);
    }
    if !facts.includes_hotel {
        return Err(Ineligibility::HotelNotIncluded);
    }
    Ok(())
}
