//! Domain types and pure business rules shared by the persistence and HTTP
//! layers. Nothing in this crate performs I/O.

pub mod address;
pub mod booking;
pub mod error;
pub mod payment;
pub mod ticket;
pub mod types;
