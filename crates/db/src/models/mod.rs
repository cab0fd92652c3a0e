//! Row models and DTOs, one module per aggregate.

pub mod booking;
pub mod enrollment;
pub mod hotel;
pub mod payment;
pub mod session;
pub mod ticket;
pub mod user;
