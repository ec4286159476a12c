use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde_json::{Map, Value};
use skybook_workflow::{LoginRequest, RegisterRequest};

use crate::error::AppError;
use crate::middleware::issue_token;
use crate::response::{ApiResponse, LoginPayload, UserPayload};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserPayload>>, AppError> {
    let Json(request) = payload?;
    let user = state.accounts.register(request).await?;
    Ok(ApiResponse::ok("Registration successful", UserPayload { user }))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginPayload>>, AppError> {
    let Json(request) = payload?;
    let login = state.accounts.login(request).await?;
    let token = issue_token(&state.auth, &login)?;

    Ok(ApiResponse::ok(
        "Login successful",
        LoginPayload {
            user: login.user,
            token,
        },
    ))
}

/// Tokens are stateless; the client just drops its copy.
async fn logout() -> Json<ApiResponse<Map<String, Value>>> {
    ApiResponse::message_only("Logged out successfully")
}
