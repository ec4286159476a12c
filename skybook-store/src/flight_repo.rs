use async_trait::async_trait;
use skybook_core::repository::{FlightRepository, Mutation};
use skybook_core::{CoreError, CoreResult, Flight};
use std::sync::Arc;

use crate::collection::JsonCollection;
use crate::record_store::RecordStore;

pub struct JsonFlightRepository {
    flights: JsonCollection<Flight>,
}

impl JsonFlightRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            flights: JsonCollection::new(store),
        }
    }
}

#[async_trait]
impl FlightRepository for JsonFlightRepository {
    async fn create(&self, flight: Flight) -> CoreResult<Flight> {
        self.flights
            .insert(flight, |existing, new| {
                if existing
                    .iter()
                    .any(|f| f.flight_number.eq_ignore_ascii_case(&new.flight_number))
                {
                    return Err(CoreError::Conflict(format!(
                        "Flight {} already exists",
                        new.flight_number
                    )));
                }
                Ok(())
            })
            .await
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Flight>> {
        self.flights.find(|f| f.id == id).await
    }

    async fn list(&self) -> CoreResult<Vec<Flight>> {
        self.flights.all().await
    }

    async fn update(&self, id: i64, mutation: Mutation<Flight>) -> CoreResult<Flight> {
        self.flights.update(id, "Flight", mutation).await
    }
}
