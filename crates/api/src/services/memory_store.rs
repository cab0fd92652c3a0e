//! In-memory store used by the workflow unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eventpass_core::booking::has_vacancy;
use eventpass_core::ticket::TicketStatus;
use eventpass_core::types::DbId;
use eventpass_db::models::booking::{Booking, BookingWithRoom, BookingWrite};
use eventpass_db::models::enrollment::{Address, Enrollment, UpsertEnrollment};
use eventpass_db::models::hotel::{Hotel, HotelWithRooms, Room};
use eventpass_db::models::payment::{CreatePayment, Payment};
use eventpass_db::models::ticket::{CreateTicket, Ticket, TicketType, TicketWithType};

use super::store::{BookingStore, EnrollmentStore, HotelStore, PaymentStore, TicketStore};

#[derive(Default)]
pub struct Data {
    next_id: DbId,
    pub enrollments: Vec<Enrollment>,
    pub addresses: Vec<Address>,
    pub ticket_types: Vec<TicketType>,
    pub tickets: Vec<Ticket>,
    pub hotels: Vec<Hotel>,
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
    pub payments: Vec<Payment>,
}

impl Data {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    fn count_room(&self, room_id: DbId) -> i64 {
        self.bookings.iter().filter(|b| b.room_id == room_id).count() as i64
    }

    fn user_ticket(&self, user_id: DbId) -> Option<TicketWithType> {
        let enrollment = self.enrollments.iter().find(|e| e.user_id == user_id)?;
        let ticket = self
            .tickets
            .iter()
            .find(|t| t.enrollment_id == enrollment.id)?;
        let ticket_type = self
            .ticket_types
            .iter()
            .find(|tt| tt.id == ticket.ticket_type_id)?;
        Some(TicketWithType {
            ticket: ticket.clone(),
            ticket_type: ticket_type.clone(),
        })
    }
}

#[derive(Default, Clone)]
pub struct MemoryStore {
    pub data: Arc<Mutex<Data>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_enrollment(&self, user_id: DbId) -> Enrollment {
        let mut data = self.data.lock().unwrap();
        let enrollment = Enrollment {
            id: data.next_id(),
            user_id,
            name: "Maria Souza".into(),
            cpf: "52998224725".into(),
            birthday: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
            phone: "11987654321".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.enrollments.push(enrollment.clone());
        enrollment
    }

    pub fn seed_ticket_type(
        &self,
        price: i32,
        is_remote: bool,
        includes_hotel: bool,
    ) -> TicketType {
        let mut data = self.data.lock().unwrap();
        let ticket_type = TicketType {
            id: data.next_id(),
            name: "Ticket".into(),
            price,
            is_remote,
            includes_hotel,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.ticket_types.push(ticket_type.clone());
        ticket_type
    }

    /// Enroll `user_id` and give them a ticket with the given attributes.
    pub fn seed_ticket(
        &self,
        user_id: DbId,
        status: TicketStatus,
        is_remote: bool,
        includes_hotel: bool,
    ) -> Ticket {
        let enrollment = self.seed_enrollment(user_id);
        let ticket_type = self.seed_ticket_type(600, is_remote, includes_hotel);
        let mut data = self.data.lock().unwrap();
        let ticket = Ticket {
            id: data.next_id(),
            ticket_type_id: ticket_type.id,
            enrollment_id: enrollment.id,
            status: status.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.tickets.push(ticket.clone());
        ticket
    }

    /// Give `user_id` a paid, in-person ticket that includes hotel.
    pub fn seed_eligible_ticket(&self, user_id: DbId) -> Ticket {
        self.seed_ticket(user_id, TicketStatus::Paid, false, true)
    }

    pub fn seed_hotel(&self) -> Hotel {
        let mut data = self.data.lock().unwrap();
        let hotel = Hotel {
            id: data.next_id(),
            name: "Seaside".into(),
            image: "https://img.example/seaside.png".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.hotels.push(hotel.clone());
        hotel
    }

    pub fn seed_room(&self, capacity: i32) -> Room {
        let hotel = self.seed_hotel();
        let mut data = self.data.lock().unwrap();
        let room = Room {
            id: data.next_id(),
            hotel_id: hotel.id,
            name: "101".into(),
            capacity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.rooms.push(room.clone());
        room
    }

    pub fn seed_booking(&self, user_id: DbId, room_id: DbId) -> Booking {
        let mut data = self.data.lock().unwrap();
        let booking = Booking {
            id: data.next_id(),
            user_id,
            room_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.bookings.push(booking.clone());
        booking
    }

    pub fn booking_count(&self, room_id: DbId) -> i64 {
        self.data.lock().unwrap().count_room(room_id)
    }
}

#[async_trait]
impl TicketStore for MemoryStore {
    async fn find_ticket(&self, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn find_user_ticket(
        &self,
        user_id: DbId,
    ) -> Result<Option<TicketWithType>, sqlx::Error> {
        Ok(self.data.lock().unwrap().user_ticket(user_id))
    }

    async fn create_ticket(&self, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let ticket = Ticket {
            id: data.next_id(),
            ticket_type_id: input.ticket_type_id,
            enrollment_id: input.enrollment_id,
            status: input.status.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn find_ticket_type(&self, id: DbId) -> Result<Option<TicketType>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.ticket_types.iter().find(|tt| tt.id == id).cloned())
    }

    async fn list_ticket_types(&self) -> Result<Vec<TicketType>, sqlx::Error> {
        Ok(self.data.lock().unwrap().ticket_types.clone())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryStore {
    async fn find_enrollment(&self, user_id: DbId) -> Result<Option<Enrollment>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.enrollments.iter().find(|e| e.user_id == user_id).cloned())
    }

    async fn find_address(&self, enrollment_id: DbId) -> Result<Option<Address>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data
            .addresses
            .iter()
            .find(|a| a.enrollment_id == enrollment_id)
            .cloned())
    }

    async fn upsert_enrollment(
        &self,
        user_id: DbId,
        input: &UpsertEnrollment,
    ) -> Result<(Enrollment, Address), sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let enrollment_id = match data.enrollments.iter().position(|e| e.user_id == user_id) {
            Some(pos) => data.enrollments[pos].id,
            None => data.next_id(),
        };
        let address_id = match data
            .addresses
            .iter()
            .position(|a| a.enrollment_id == enrollment_id)
        {
            Some(pos) => data.addresses[pos].id,
            None => data.next_id(),
        };

        let enrollment = Enrollment {
            id: enrollment_id,
            user_id,
            name: input.name.clone(),
            cpf: input.cpf.clone(),
            birthday: input.birthday,
            phone: input.phone.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let address = Address {
            id: address_id,
            enrollment_id,
            cep: input.address.cep.clone(),
            street: input.address.street.clone(),
            city: input.address.city.clone(),
            state: input.address.state.clone(),
            number: input.address.number.clone(),
            neighborhood: input.address.neighborhood.clone(),
            address_detail: input.address.address_detail.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        data.enrollments.retain(|e| e.id != enrollment_id);
        data.enrollments.push(enrollment.clone());
        data.addresses.retain(|a| a.id != address_id);
        data.addresses.push(address.clone());
        Ok((enrollment, address))
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn list_hotels(&self) -> Result<Vec<Hotel>, sqlx::Error> {
        Ok(self.data.lock().unwrap().hotels.clone())
    }

    async fn find_hotel_with_rooms(
        &self,
        id: DbId,
    ) -> Result<Option<HotelWithRooms>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.hotels.iter().find(|h| h.id == id).map(|hotel| {
            HotelWithRooms {
                hotel: hotel.clone(),
                rooms: data
                    .rooms
                    .iter()
                    .filter(|r| r.hotel_id == id)
                    .cloned()
                    .collect(),
            }
        }))
    }

    async fn find_room(&self, id: DbId) -> Result<Option<Room>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.rooms.iter().find(|r| r.id == id).cloned())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_user_booking(
        &self,
        user_id: DbId,
    ) -> Result<Option<BookingWithRoom>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        let Some(booking) = data.bookings.iter().find(|b| b.user_id == user_id) else {
            return Ok(None);
        };
        Ok(data
            .rooms
            .iter()
            .find(|r| r.id == booking.room_id)
            .map(|room| BookingWithRoom {
                id: booking.id,
                room: room.clone(),
            }))
    }

    async fn count_room_bookings(&self, room_id: DbId) -> Result<i64, sqlx::Error> {
        Ok(self.data.lock().unwrap().count_room(room_id))
    }

    async fn create_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let Some(capacity) = data.rooms.iter().find(|r| r.id == room_id).map(|r| r.capacity)
        else {
            return Ok(BookingWrite::RoomMissing);
        };
        if !has_vacancy(data.count_room(room_id), capacity) {
            return Ok(BookingWrite::RoomFull);
        }
        if data.bookings.iter().any(|b| b.user_id == user_id) {
            return Ok(BookingWrite::AlreadyBooked);
        }
        let booking = Booking {
            id: data.next_id(),
            user_id,
            room_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.bookings.push(booking.clone());
        Ok(BookingWrite::Written(booking))
    }

    async fn move_booking_within_capacity(
        &self,
        user_id: DbId,
        room_id: DbId,
    ) -> Result<BookingWrite, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let Some(capacity) = data.rooms.iter().find(|r| r.id == room_id).map(|r| r.capacity)
        else {
            return Ok(BookingWrite::RoomMissing);
        };
        if !has_vacancy(data.count_room(room_id), capacity) {
            return Ok(BookingWrite::RoomFull);
        }
        let Some(booking) = data.bookings.iter_mut().find(|b| b.user_id == user_id) else {
            return Ok(BookingWrite::NoBooking);
        };
        booking.room_id = room_id;
        booking.updated_at = Utc::now();
        Ok(BookingWrite::Written(booking.clone()))
    }
}

#[async_trait]
impl PaymentStore for MemoryStore {
    async fn find_payment(&self, ticket_id: DbId) -> Result<Option<Payment>, sqlx::Error> {
        let data = self.data.lock().unwrap();
        Ok(data.payments.iter().find(|p| p.ticket_id == ticket_id).cloned())
    }

    async fn settle_payment(&self, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let mut data = self.data.lock().unwrap();
        let payment = Payment {
            id: data.next_id(),
            ticket_id: input.ticket_id,
            value: input.value,
            card_issuer: input.card_issuer.clone(),
            card_last_digits: input.card_last_digits.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.payments.push(payment.clone());
        if let Some(ticket) = data.tickets.iter_mut().find(|t| t.id == input.ticket_id) {
            ticket.status = TicketStatus::Paid.as_str().to_string();
        }
        Ok(payment)
    }
}
