use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use skybook_workflow::{BookingView, FlightView, ProfileView, UserView};

/// Success envelope. The payload's fields sit next to `success` and `message`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }
}

impl ApiResponse<Map<String, Value>> {
    pub fn message_only(message: impl Into<String>) -> Json<Self> {
        Self::ok(message, Map::new())
    }
}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct LoginPayload {
    pub user: UserView,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub user: ProfileView,
}

#[derive(Debug, Serialize)]
pub struct LocationPayload {
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct BookingPayload {
    pub booking: BookingView,
}

#[derive(Debug, Serialize)]
pub struct FlightPayload {
    pub flight: FlightView,
}
