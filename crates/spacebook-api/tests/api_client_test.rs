#![allow(clippy::unwrap_used, clippy::float_cmp)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{bearer_token, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use spacebook_api::models::{BookingQuery, CreateBookingRequest, LoginRequest, SpaceQuery};
use spacebook_api::{ApiClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn user_body() -> serde_json::Value {
    json!({
        "id": "u1",
        "name": "Avery Chen",
        "email": "avery@example.com",
        "roles": ["client", "owner"],
        "activeRole": "client"
    })
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn login_returns_token_and_user() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "tok-123",
            "user": user_body()
        })))
        .mount(&server)
        .await;

    let session = client
        .login(&LoginRequest {
            email: "avery@example.com".into(),
            password: "hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(session.token, "tok-123");
    assert_eq!(session.user.email, "avery@example.com");
    assert_eq!(
        session.user.roles.as_deref(),
        Some(&["client".to_string(), "owner".to_string()][..])
    );
}

#[tokio::test]
async fn login_failure_surfaces_server_message_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Invalid email or password" })),
        )
        .mount(&server)
        .await;

    let result = client
        .login(&LoginRequest {
            email: "avery@example.com".into(),
            password: "wrong".into(),
        })
        .await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message.as_deref(), Some("Invalid email or password"));
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn bearer_token_attached_once_installed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .and(bearer_token("tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_body()))
        .mount(&server)
        .await;

    client.set_token("tok-123".to_string().into());
    let user = client.me().await.unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn anonymous_status_check_is_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "missing token"
        })))
        .mount(&server)
        .await;

    let result = client.me().await;
    assert!(matches!(result, Err(ref e) if e.is_auth()), "got: {result:?}");
}

// ── Spaces ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_spaces_applies_query_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/spaces"))
        .and(query_param("type", "studio"))
        .and(query_param("minCapacity", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "name": "Loft Studio",
            "price": 85.0,
            "priceUnit": "hour",
            "type": "studio",
            "capacity": 40
        }])))
        .mount(&server)
        .await;

    let spaces = client
        .list_spaces(&SpaceQuery {
            space_type: Some("studio".into()),
            min_capacity: Some(20),
            ..SpaceQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(spaces.len(), 1);
    assert_eq!(spaces[0].name, "Loft Studio");
    assert_eq!(spaces[0].capacity, Some(40));
}

#[tokio::test]
async fn server_business_error_message_is_verbatim() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/spaces/s404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Space not found" })),
        )
        .mount(&server)
        .await;

    let result = client.get_space("s404").await;
    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 404);
            assert_eq!(message.as_deref(), Some("Space not found"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Bookings ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_booking_sends_idempotency_key_and_returns_pending() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/bookings"))
        .and(header_exists("Idempotency-Key"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "b1",
            "spaceId": "s1",
            "customerName": "Avery Chen",
            "customerEmail": "avery@example.com",
            "eventDate": "2025-06-01",
            "startTime": "10:00",
            "endTime": "12:00",
            "status": "pending",
            "totalPrice": 170.0
        })))
        .mount(&server)
        .await;

    let booking = client
        .create_booking(
            &CreateBookingRequest {
                space_id: "s1".into(),
                customer_name: "Avery Chen".into(),
                customer_email: "avery@example.com".into(),
                customer_phone: None,
                event_date: "2025-06-01".parse().unwrap(),
                start_time: "10:00".into(),
                end_time: "12:00".into(),
                notes: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap();

    assert_eq!(booking.status, "pending");
    assert_eq!(booking.total_price, Some(170.0));
}

#[tokio::test]
async fn list_bookings_owner_scope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/bookings"))
        .and(query_param("owned", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "b1",
            "spaceId": "s1",
            "customerName": "Avery Chen",
            "customerEmail": "avery@example.com",
            "eventDate": "2025-06-01",
            "startTime": "10:00",
            "endTime": "12:00",
            "status": "confirmed"
        }])))
        .mount(&server)
        .await;

    let bookings = client
        .list_bookings(&BookingQuery {
            owned: true,
            ..BookingQuery::default()
        })
        .await
        .unwrap();

    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].status, "confirmed");
}

// ── Deserialization ─────────────────────────────────────────────────

#[tokio::test]
async fn malformed_body_is_deserialization_error_with_preview() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/spaces"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<!doctype html>"))
        .mount(&server)
        .await;

    let result = client.list_spaces(&SpaceQuery::default()).await;
    match result {
        Err(Error::Deserialization { ref message, ref body }) => {
            assert!(message.contains("body preview"), "message: {message}");
            assert_eq!(body, "<!doctype html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
