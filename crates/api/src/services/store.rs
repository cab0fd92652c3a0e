//! Persistence seams used by the workflow services.
//!
//! Services depend on these traits rather than on the pool directly so the
//! check ordering can be unit tested against in-memory stores. [`PgStore`]
//! is the production implementation and delegates to the repositories.

use async_trait::async_trait;
use eventpass_core::types::DbId;
use eventpass_db::models::booking::{BookingWithRoom, BookingWrite};
use eventpass_db::models::enrollment::{Address, Enrollment, UpsertEnrollment};
use eventpass_db::models::hotel::{Hotel, HotelWithRooms, Room};
use eventpass_db::models::payment::{CreatePayment, Payment};
use eventpass_db::models::ticket::{CreateTicket, Ticket, TicketType, TicketWithType};
use eventpass_db::repositories::{
    BookingRepo, EnrollmentRepo, HotelRepo, PaymentRepo, TicketRepo, TicketTypeRepo,
};
use eventpass_db::DbPool;

#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error>;
    async fn find_user_ticket(&self, user_id: DbId)
        -> Result<Option<TicketWithType>, sqlx::Error>;
    async fn create_ticket(&self, input: &CreateTicket) -> Result<Ticket, sqlx::Error>;
    async fn find_ticket_type(&self, id: DbId) -> Result<Option<TicketType>, sqlx::Error>;
    async fn list_ticket_types(&self) -> Result<Vec<TicketType>, sqlx::Error>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    async fn find_enrollment(&self, user_id: DbId) -> Result<Option<Enrollment>, sqlx::Error>;
    async fn find_address(&self, enrollment_id: DbId) -> Result<Option<Address>, sqlx::Error>;
    async fn upsert_enrollment(
        &self,
        user_id: DbId,
        input: &UpsertEnrollment,
    ) -> Result<(Enrollment, Address), sqlx::Error>;
}

#[async_trait]
pub trait HotelStore: Send + Sync {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, sqlx::Error>;
    async fn find_hotel_with_rooms(&self, id: DbId)
        -> Result<Option<HotelWithRooms>, sqlx::Error>;
    async fn find_room(&self, id: DbId) -> Result<Option<Room>, sqlx::Error>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_user_booking(
        &self,
        user_id: DbId,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error>;
    async fn count_room_bookings(&self, room_id: DbId) -> Result<i64, sqlx::Error>;
    /// Insert a booking only if the room still has a vacancy, atomically.
    async fn create_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error>;
    /// Move the user's booking to `room_id` only if it still has a vacancy, atomically.
    async fn move_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error>;
}

#[async_trait]
pub trait PaymentStore: Send + Sync {
    async fn find_payment(&self, ticket_id: DbId) -> Result<Option<Payment>, sqlx::Error>;
    /// Record the payment and mark the ticket paid, atomically.
    async fn settle_payment(&self, input: &CreatePayment) -> Result<Payment, sqlx::Error>;
}

/// PostgreSQL-backed implementation of every store trait.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TicketStore for PgStore {
    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        TicketRepo::find_by_id(&self.pool, id).await
    }

    async fn find_user_ticket(
        &self,
        user_id: DbId,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        TicketRepo::find_by_user_id(&self.pool, user_id).await
    }

    async fn create_ticket(&self, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        TicketRepo::create(&self.pool, input).await
    }

    async fn find_ticket_type(&self, id: DbId) -> Result<Option<TicketType>, sqlx::Error> {
        TicketTypeRepo::find_by_id(&self.pool, id).await
    }

    async fn list_ticket_types(&self) -> Result<Vec<TicketType>, sqlx::Error> {
        TicketTypeRepo::list(&self.pool).await
    }
}

#[async_trait]
impl EnrollmentStore for PgStore {
    async fn find_enrollment(&self, user_id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        EnrollmentRepo::find_by_user_id(&self.pool, user_id).await
    }

    async fn find_address(&self, enrollment_id: DbId) -> Result<Option<Address>, sqlx::Error> {
        EnrollmentRepo::find_address(&self.pool, enrollment_id).await
    }

    async fn upsert_enrollment(
        &self,
        user_id: DbId,
        input: &UpsertEnrollment,
    ) -> Result<(Enrollment, Address), sqlx::Error> {
        EnrollmentRepo::upsert_with_address(&self.pool, user_id, input).await
    }
}

#[async_trait]
impl HotelStore for PgStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, sqlx::Error> {
        HotelRepo::list(&self.pool).await
    }

    async fn find_hotel_with_rooms(
        &self,
        id: DbId,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        HotelRepo::find_with_rooms(&self.pool, id).await
    }

    async fn find_room(&self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        HotelRepo::find_room(&self.pool, id).await
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find_user_booking(
        &self,
        user_id: DbId,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error> {
        BookingRepo::find_by_user_id(&self.pool, user_id).await
    }

    async fn count_room_bookings(&self, room_id: DbId) -> Result<i64, sqlx::Error> {
        BookingRepo::count_by_room(&self.pool, room_id).await
    }

    async fn create_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        BookingRepo::create_within_capacity(&self.pool, user_id, room_id).await
    }

    async fn move_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        BookingRepo::move_within_capacity(&self.pool, user_id, room_id).await
    }
}

#[async_trait]
impl PaymentStore for PgStore {
    async fn find_payment(&self, ticket_id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        PaymentRepo::find_by_ticket_id(&self.pool, ticket_id).await
    }

    async fn settle_payment(&self, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        PaymentRepo::settle(&self.pool, input).await
    }
}
