use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use skybook_core::CoreError;
use skybook_workflow::{BookingRequest, BookingView};

use crate::error::AppError;
use crate::response::{ApiResponse, BookingPayload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

impl EmailQuery {
    pub fn required(self) -> Result<String, AppError> {
        self.email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::ValidationError("email is required".to_string()))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", get(list_bookings).post(create_booking))
        .route("/bookings/{id}", get(get_booking).delete(cancel_booking))
}

async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<BookingPayload>>, AppError> {
    let Json(request) = payload?;
    let booking = state.bookings.create_booking(request).await?;
    Ok(ApiResponse::ok("Booking confirmed", BookingPayload { booking }))
}

async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<Vec<BookingView>>, AppError> {
    let Query(query) = query?;
    let email = query.required()?;
    Ok(Json(state.bookings.list_bookings_for_email(&email).await?))
}

async fn get_booking(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookingView>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.bookings.get_booking(id).await?))
}

async fn cancel_booking(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<BookingPayload>>, AppError> {
    let Path(id) = id?;
    let booking = state.bookings.cancel_booking(id).await.map_err(|err| match err {
        CoreError::InvalidState { .. } => {
            CoreError::Conflict("Booking cannot be cancelled".to_string())
        }
        other => other,
    })?;
    Ok(ApiResponse::ok(
        "Booking cancelled successfully",
        BookingPayload { booking },
    ))
}
