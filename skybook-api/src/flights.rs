use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use skybook_workflow::FlightView;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RouteQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub departure: Option<String>,
    pub arrival: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flights", get(list_flights))
        .route("/flights/search", get(search_flights))
        .route("/flights/{id}", get(get_flight))
}

/// Available flights, or a route search when `from` or `to` is given
async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<RouteQuery>, QueryRejection>,
) -> Result<Json<Vec<FlightView>>, AppError> {
    let Query(query) = query?;
    let flights = if query.from.is_some() || query.to.is_some() {
        state
            .flights
            .search(query.from.as_deref(), query.to.as_deref())
            .await?
    } else {
        state.flights.list_available().await?
    };
    Ok(Json(flights))
}

async fn search_flights(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<FlightView>>, AppError> {
    let Query(query) = query?;
    let flights = state
        .flights
        .search(query.departure.as_deref(), query.arrival.as_deref())
        .await?;
    Ok(Json(flights))
}

async fn get_flight(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<FlightView>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.flights.get(id).await?))
}
