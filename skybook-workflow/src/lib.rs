pub mod auth;
pub mod flights;
pub mod manager;
pub mod models;
pub mod orchestrator;
pub mod profile;
pub mod views;

pub use auth::{AuthService, Authenticated};
pub use flights::FlightCatalog;
pub use manager::BookingManager;
pub use models::{
    BookingRequest, LocationUpdate, LoginRequest, NewFlightRequest, ProfileUpdate, RegisterRequest,
};
pub use orchestrator::PaymentOrchestrator;
pub use profile::ProfileService;
pub use views::{BookingView, FlightView, ProfileView, UserView};
