use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{
    AddressLookup, BookingService, EligibilityGate, EnrollmentService, HotelService,
    PaymentService, PgStore, TicketService,
};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eventpass_db::DbPool,
    /// Server configuration (accessed by the auth extractor).
    pub config: Arc<ServerConfig>,
    pub hotels: Arc<HotelService>,
    pub bookings: Arc<BookingService>,
    pub tickets: Arc<TicketService>,
    pub payments: Arc<PaymentService>,
    pub enrollments: Arc<EnrollmentService>,
}

impl AppState {
    /// Wire every workflow service to a PostgreSQL-backed store.
    pub fn new(
        pool: eventpass_db::DbPool,
        config: ServerConfig,
        address_lookup: Arc<dyn AddressLookup>,
    ) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        let eligibility = EligibilityGate::new(store.clone());

        Self {
            pool,
            config: Arc::new(config),
            hotels: Arc::new(HotelService::new(eligibility.clone(), store.clone())),
            bookings: Arc::new(BookingService::new(
                eligibility,
                store.clone(),
                store.clone(),
            )),
            tickets: Arc::new(TicketService::new(store.clone(), store.clone())),
            payments: Arc::new(PaymentService::new(store.clone(), store.clone())),
            enrollments: Arc::new(EnrollmentService::new(store, address_lookup)),
        }
    }
}
