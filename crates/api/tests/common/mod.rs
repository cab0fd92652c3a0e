#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use chrono::NaiveDate;
use eventpass_api::auth::jwt::{generate_access_token, hash_token, JwtConfig};
use eventpass_api::config::ServerConfig;
use eventpass_api::router::build_app_router;
use eventpass_api::services::{AddressInfo, AddressLookup, AddressLookupError};
use eventpass_api::state::AppState;
use eventpass_core::ticket::TicketStatus;
use eventpass_core::types::DbId;
use eventpass_db::models::enrollment::{Enrollment, UpsertAddress, UpsertEnrollment};
use eventpass_db::models::hotel::{CreateHotel, CreateRoom, Hotel, Room};
use eventpass_db::models::session::CreateSession;
use eventpass_db::models::ticket::{CreateTicket, CreateTicketType, Ticket, TicketType};
use eventpass_db::models::user::CreateUser;
use eventpass_db::repositories::{
    EnrollmentRepo, HotelRepo, SessionRepo, TicketRepo, TicketTypeRepo, UserRepo,
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// The only CEP the stub lookup knows.
pub const KNOWN_CEP: &str = "01310100";
/// A CPF with valid check digits.
pub const VALID_CPF: &str = "52998224725";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        address_lookup_url: "http://address-lookup.invalid".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Address lookup that resolves [`KNOWN_CEP`] and nothing else, without
/// touching the network.
pub struct StubLookup;

#[async_trait]
impl AddressLookup for StubLookup {
    async fn lookup(&self, cep: &str) -> Result<Option<AddressInfo>, AddressLookupError> {
        Ok((cep == KNOWN_CEP).then(|| AddressInfo {
            street: "Avenida Paulista".to_string(),
            complement: "de 612 a 1510 - lado par".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        }))
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone(), Arc::new(StubLookup));
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Create a user with a live session and return `(user_id, bearer_token)`.
pub async fn create_user_with_session(pool: &PgPool, email: &str) -> (DbId, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
        },
    )
    .await
    .expect("user creation should succeed");

    let token = generate_access_token(user.id, &test_config().jwt)
        .expect("token generation should succeed");
    SessionRepo::create(
        pool,
        &CreateSession {
            user_id: user.id,
            token_hash: hash_token(&token),
        },
    )
    .await
    .expect("session creation should succeed");

    (user.id, token)
}

pub fn enrollment_input(cep: &str) -> UpsertEnrollment {
    UpsertEnrollment {
        name: "Maria Souza".to_string(),
        cpf: VALID_CPF.to_string(),
        birthday: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap(),
        phone: "11987654321".to_string(),
        address: UpsertAddress {
            cep: cep.to_string(),
            street: "Avenida Paulista".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            number: "1000".to_string(),
            neighborhood: "Bela Vista".to_string(),
            address_detail: None,
        },
    }
}

pub async fn seed_enrollment(pool: &PgPool, user_id: DbId) -> Enrollment {
    EnrollmentRepo::upsert_with_address(pool, user_id, &enrollment_input(KNOWN_CEP))
        .await
        .expect("enrollment upsert should succeed")
        .0
}

pub async fn seed_ticket_type(
    pool: &PgPool,
    price: i32,
    is_remote: bool,
    includes_hotel: bool,
) -> TicketType {
    TicketTypeRepo::create(
        pool,
        &CreateTicketType {
            name: format!("price-{price}-remote-{is_remote}-hotel-{includes_hotel}"),
            price,
            is_remote,
            includes_hotel,
        },
    )
    .await
    .expect("ticket type creation should succeed")
}

/// Enroll the user and give them a ticket with the given attributes.
pub async fn seed_ticket(
    pool: &PgPool,
    user_id: DbId,
    status: TicketStatus,
    is_remote: bool,
    includes_hotel: bool,
) -> Ticket {
    let enrollment = seed_enrollment(pool, user_id).await;
    let ticket_type = seed_ticket_type(pool, 600, is_remote, includes_hotel).await;
    TicketRepo::create(
        pool,
        &CreateTicket {
            enrollment_id: enrollment.id,
            ticket_type_id: ticket_type.id,
            status,
        },
    )
    .await
    .expect("ticket creation should succeed")
}

/// Give the user a paid, in-person ticket that includes hotel.
pub async fn seed_eligible_ticket(pool: &PgPool, user_id: DbId) -> Ticket {
    seed_ticket(pool, user_id, TicketStatus::Paid, false, true).await
}

pub async fn seed_hotel(pool: &PgPool, name: &str) -> Hotel {
    HotelRepo::create(
        pool,
        &CreateHotel {
            name: name.to_string(),
            image: format!("https://img.example/{name}.png"),
        },
    )
    .await
    .expect("hotel creation should succeed")
}

pub async fn seed_room(pool: &PgPool, hotel_id: DbId, capacity: i32) -> Room {
    HotelRepo::create_room(
        pool,
        &CreateRoom {
            hotel_id,
            name: format!("room-cap-{capacity}"),
            capacity,
        },
    )
    .await
    .expect("room creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
