pub mod flight;
pub mod pricing;
pub mod inventory;

pub use flight::{DomesticFare, FareFields, Flight, FlightFare, FlightType, InternationalFare};
pub use inventory::InventoryError;
pub use pricing::{FareError, BAGGAGE_FEE, MEAL_SURCHARGE};
