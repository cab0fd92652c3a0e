//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod enrollment_repo;
pub mod hotel_repo;
pub mod payment_repo;
pub mod session_repo;
pub mod ticket_repo;
pub mod ticket_type_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use hotel_repo::HotelRepo;
pub use payment_repo::PaymentRepo;
pub use session_repo::SessionRepo;
pub use ticket_repo::TicketRepo;
pub use ticket_type_repo::TicketTypeRepo;
pub use user_repo::UserRepo;
