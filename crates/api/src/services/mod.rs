//! Workflow services.
//!
//! Each service is constructed with explicit store handles (see [`store`])
//! and applies the business checks of one area in a fixed order before
//! touching persistence. Handlers stay thin: extract, call a service, respond.

pub mod address_lookup;
pub mod booking;
pub mod eligibility;
pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod store;
pub mod ticket;

#[cfg(test)]
pub(crate) mod memory_store;

pub use address_lookup::{AddressInfo, AddressLookup, AddressLookupError, ViaCepClient};
pub use booking::BookingService;
pub use eligibility::EligibilityGate;
pub use enrollment::EnrollmentService;
pub use hotel::HotelService;
pub use payment::PaymentService;
pub use store::PgStore;
pub use ticket::TicketService;
