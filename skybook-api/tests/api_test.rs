use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use skybook_api::{
    app,
    state::{AppState, AuthConfig},
};
use skybook_store::{seed_sample_data, MemoryRecordStore};
use std::sync::Arc;
use tower::ServiceExt;

async fn test_app() -> Router {
    let state = AppState::new(
        Arc::new(MemoryRecordStore::new()),
        AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
        vec!["http://localhost:5173".to_string()],
    );
    seed_sample_data(state.flight_repo.as_ref(), state.user_repo.as_ref())
        .await
        .unwrap();
    app(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": email, "password": password })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

fn upi_booking(flight_id: i64, email: &str) -> Value {
    json!({
        "flightId": flight_id,
        "firstName": "John",
        "lastName": "Doe",
        "email": email,
        "phone": "9876543210",
        "paymentType": "UPI"
    })
}

#[tokio::test]
async fn test_list_and_search_flights() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/flights", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/flights?from=delhi%20(del)&to=dubai%20(dxb)",
        None,
        None,
    )
    .await;
    let flights = body.as_array().unwrap();
    assert_eq!(flights.len(), 1);
    assert_eq!(flights[0]["flightNumber"], "AI505");
    assert!((flights[0]["finalPrice"].as_f64().unwrap() - 20660.0).abs() < 1e-6);
    assert_eq!(flights[0]["requiresVisa"], true);

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/flights/search?arrival=Goa%20(GOI)",
        None,
        None,
    )
    .await;
    assert_eq!(body[0]["flightNumber"], "SG303");
}

#[tokio::test]
async fn test_unknown_flight_is_404_envelope() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/flights/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Flight not found");

    let (status, body) = send(&app, Method::GET, "/api/flights/abc", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "asha@test.com", "password": "secret1", "name": "Asha Verma" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["user"]["role"], "PASSENGER");
    assert!(body["user"].get("password").is_none());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "asha@test.com", "password": "x", "name": "Asha" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");

    let token = login(&app, "asha@test.com", "secret1").await;
    assert!(!token.is_empty());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "asha@test.com", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");

    let (status, body) = send(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_malformed_json_is_400_envelope() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"flightId\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/bookings",
        Some(upi_booking(1, "passenger@test.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["message"], "Booking confirmed");
    let booking = &body["booking"];
    assert_eq!(booking["status"], "CONFIRMED");
    assert_eq!(booking["from"], "Delhi (DEL)");
    assert_eq!(booking["paymentMethod"], "UPI");
    let reference = booking["bookingRef"].as_str().unwrap();
    assert!(reference.starts_with("BK") && reference.len() == 8);
    let id = booking["id"].as_i64().unwrap();

    let (_, flight) = send(&app, Method::GET, "/api/flights/1", None, None).await;
    assert_eq!(flight["availableSeats"], 49);

    let (_, profile) = send(
        &app,
        Method::GET,
        "/api/users/profile?email=passenger@test.com",
        None,
        None,
    )
    .await;
    let expected_points = 500 + (booking["totalAmount"].as_f64().unwrap() / 100.0).floor() as i64;
    assert_eq!(profile["loyaltyPoints"], expected_points);

    let (_, list) = send(
        &app,
        Method::GET,
        "/api/bookings?email=passenger@test.com",
        None,
        None,
    )
    .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // Emails match exactly, like login and profile lookups
    let (status, list) = send(
        &app,
        Method::GET,
        "/api/bookings?email=PASSENGER@test.com",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(list.as_array().unwrap().is_empty());

    let uri = format!("/api/bookings/{}", id);
    let (status, body) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking cancelled successfully");
    assert_eq!(body["booking"]["status"], "CANCELLED");

    let (status, body) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Booking cannot be cancelled");

    let (_, flight) = send(&app, Method::GET, "/api/flights/1", None, None).await;
    assert_eq!(flight["availableSeats"], 50);
}

#[tokio::test]
async fn test_rejected_payment_is_402() {
    let app = test_app().await;
    let mut request = upi_booking(2, "passenger@test.com");
    request["paymentType"] = json!("CREDIT_CARD");
    request["cardNumber"] = json!("411111111111111");
    request["cardExpiry"] = json!("12/27");
    request["cardCvv"] = json!("123");

    let (status, body) = send(&app, Method::POST, "/api/bookings", Some(request), None).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["success"], false);

    let (_, flight) = send(&app, Method::GET, "/api/flights/2", None, None).await;
    assert_eq!(flight["availableSeats"], 45);
}

#[tokio::test]
async fn test_booking_lookup_requires_email() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/bookings", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_profile_and_location_updates() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/profile?email=passenger@test.com",
        Some(json!({ "phone": "9123456780", "address": "12 MG Road" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["phone"], "9123456780");
    assert_eq!(body["user"]["address"], "12 MG Road");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/users/location?email=passenger@test.com",
        Some(json!({ "location": "  Pune " })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Pune");

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/users/profile?email=nobody@test.com",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_routes_require_admin_token() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/admin/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let passenger = login(&app, "passenger@test.com", "password123").await;
    let (status, _) = send(&app, Method::GET, "/api/admin/users", None, Some(&passenger)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = login(&app, "admin@skybook.com", "admin123").await;
    let (status, body) = send(&app, Method::GET, "/api/admin/users", None, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/admin/flights",
        Some(json!({
            "flightNumber": "QR808",
            "airline": "Qatar Airways",
            "departureCity": "Delhi (DEL)",
            "arrivalCity": "Doha (DOH)",
            "basePrice": 21000.0,
            "availableSeats": 40,
            "flightType": "INTERNATIONAL",
            "destinationCountry": "Qatar"
        })),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["flight"]["id"], 7);

    let (_, flights) = send(&app, Method::GET, "/api/flights", None, None).await;
    assert_eq!(flights.as_array().unwrap().len(), 7);
}
