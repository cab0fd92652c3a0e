pub mod booking;
pub mod enrollments;
pub mod hotels;
pub mod payments;
pub mod tickets;
