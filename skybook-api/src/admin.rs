use axum::{
    extract::{rejection::JsonRejection, State},
    middleware::from_fn_with_state,
    routing::{get, post},
    Extension, Json, Router,
};
use skybook_core::user::Permission;
use skybook_workflow::{NewFlightRequest, ProfileView};
use tracing::info;

use crate::error::AppError;
use crate::middleware::{admin_auth_middleware, auth::require_permission, Claims};
use crate::response::{ApiResponse, FlightPayload};
use crate::state::AppState;

/// Admin endpoints. Every route requires an admin bearer token.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/flights", post(create_flight))
        .route("/admin/users", get(list_users))
        .route_layer(from_fn_with_state(state, admin_auth_middleware))
}

async fn create_flight(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewFlightRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<FlightPayload>>, AppError> {
    require_permission(&claims, Permission::ManageFlights)?;
    let Json(request) = payload?;

    let flight = state.flights.create(request).await?;
    info!("{} added flight {}", claims.email, flight.flight_number);
    Ok(ApiResponse::ok("Flight created", FlightPayload { flight }))
}

async fn list_users(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<ProfileView>>, AppError> {
    require_permission(&claims, Permission::ManageUsers)?;
    Ok(Json(state.profiles.list_users().await?))
}
