pub mod booking;
pub mod enrollments;
pub mod health;
pub mod hotels;
pub mod payments;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Every route requires an authenticated caller.
///
/// ```text
/// /booking                       get booking, create booking
/// /booking/{booking_id}          change room (PUT)
///
/// /hotels                        list hotels
/// /hotels/{hotel_id}             hotel with rooms
///
/// /tickets                       get own ticket, reserve ticket
/// /tickets/types                 list ticket types
///
/// /payments?ticketId=            get payment for own ticket
/// /payments                      pay for own ticket (POST)
///
/// /enrollments                   get own enrollment, create/update enrollment
/// /enrollments/cep?cep=          address for a postal code
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/booking", booking::router())
        .nest("/hotels", hotels::router())
        .nest("/tickets", tickets::router())
        .nest("/payments", payments::router())
        .nest("/enrollments", enrollments::router())
}
