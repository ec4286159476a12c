use skybook_core::repository::FlightRepository;
use skybook_core::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::info;

use crate::models::NewFlightRequest;
use crate::views::FlightView;

/// Read side of the flight catalog, plus admin creation
pub struct FlightCatalog {
    flights: Arc<dyn FlightRepository>,
}

impl FlightCatalog {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        Self { flights }
    }

    /// Flights with at least one seat left
    pub async fn list_available(&self) -> CoreResult<Vec<FlightView>> {
        Ok(self
            .flights
            .list()
            .await?
            .iter()
            .filter(|f| f.is_available())
            .map(FlightView::from)
            .collect())
    }

    /// Both ends given: exact route. One given: flights touching that city.
    /// Neither: every flight, sold out or not.
    pub async fn search(&self, from: Option<&str>, to: Option<&str>) -> CoreResult<Vec<FlightView>> {
        let from = from.map(str::trim).filter(|s| !s.is_empty());
        let to = to.map(str::trim).filter(|s| !s.is_empty());

        Ok(self
            .flights
            .list()
            .await?
            .iter()
            .filter(|f| f.matches_route(from, to))
            .map(FlightView::from)
            .collect())
    }

    pub async fn get(&self, id: i64) -> CoreResult<FlightView> {
        self.flights
            .find_by_id(id)
            .await?
            .map(|f| FlightView::from(&f))
            .ok_or_else(|| CoreError::NotFound("Flight".to_string()))
    }

    pub async fn create(&self, request: NewFlightRequest) -> CoreResult<FlightView> {
        let flight = self.flights.create(request.into_flight()?).await?;
        info!("Added flight {} ({})", flight.flight_info(), flight.flight_type());
        Ok(FlightView::from(&flight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skybook_store::seed::sample_flights;
    use skybook_store::{JsonFlightRepository, MemoryRecordStore};

    async fn catalog() -> FlightCatalog {
        let flights = Arc::new(JsonFlightRepository::new(Arc::new(MemoryRecordStore::new())));
        for mut flight in sample_flights() {
            if flight.flight_number == "UK404" {
                flight.available_seats = 0;
            }
            flights.create(flight).await.unwrap();
        }
        FlightCatalog::new(flights)
    }

    #[tokio::test]
    async fn test_available_skips_sold_out() {
        let catalog = catalog().await;
        let available = catalog.list_available().await.unwrap();
        assert_eq!(available.len(), 5);
        assert!(available.iter().all(|f| f.flight_number != "UK404"));
        assert_eq!(catalog.search(None, None).await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_search_by_route_and_city() {
        let catalog = catalog().await;

        let exact = catalog
            .search(Some("delhi (del)"), Some("DUBAI (DXB)"))
            .await
            .unwrap();
        assert_eq!(exact.len(), 1);
        assert_eq!(exact[0].flight_number, "AI505");
        assert!(exact[0].requires_visa);
        assert!((exact[0].final_price - 20660.0).abs() < 1e-9);
        assert_eq!(exact[0].price, "₹18000");

        // Mumbai is the arrival of AI101 and the departure of 6E202 and EK606
        let touching = catalog.search(None, Some("Mumbai (BOM)")).await.unwrap();
        assert_eq!(touching.len(), 3);
    }

    #[tokio::test]
    async fn test_get_and_create() {
        let catalog = catalog().await;
        let first = catalog.get(1).await.unwrap();
        assert_eq!(first.flight_info, "Air India - AI101 (Delhi (DEL) → Mumbai (BOM)) [Domestic]");
        assert!(matches!(catalog.get(99).await, Err(CoreError::NotFound(_))));

        let request: NewFlightRequest = serde_json::from_value(serde_json::json!({
            "flightNumber": "AI101",
            "airline": "Air India",
            "departureCity": "Delhi (DEL)",
            "arrivalCity": "Mumbai (BOM)",
            "basePrice": 4000.0,
            "availableSeats": 10,
            "flightType": "DOMESTIC"
        }))
        .unwrap();
        assert!(matches!(
            catalog.create(request).await,
            Err(CoreError::Conflict(_))
        ));
    }
}
