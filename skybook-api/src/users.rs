use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    routing::{get, put},
    Json, Router,
};
use skybook_workflow::{LocationUpdate, ProfileUpdate, ProfileView};

use crate::bookings::EmailQuery;
use crate::error::AppError;
use crate::response::{ApiResponse, LocationPayload, ProfilePayload};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route("/users/location", put(update_location))
}

async fn get_profile(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<ProfileView>, AppError> {
    let Query(query) = query?;
    let email = query.required()?;
    Ok(Json(state.profiles.get_profile(&email).await?))
}

async fn update_profile(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<ProfilePayload>>, AppError> {
    let Query(query) = query?;
    let email = query.required()?;
    let Json(update) = payload?;

    let user = state.profiles.update_profile(&email, update).await?;
    Ok(ApiResponse::ok(
        "Profile updated successfully",
        ProfilePayload { user },
    ))
}

async fn update_location(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
    payload: Result<Json<LocationUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<LocationPayload>>, AppError> {
    let Query(query) = query?;
    let email = query.required()?;
    let Json(update) = payload?;

    let location = state.profiles.update_location(&email, &update.location).await?;
    Ok(ApiResponse::ok(
        "Location updated successfully",
        LocationPayload { location },
    ))
}
