use skybook_core::repository::{BookingRepository, FlightRepository, UserRepository};
use skybook_store::{JsonBookingRepository, JsonFlightRepository, JsonUserRepository, RecordStore};
use skybook_workflow::{AuthService, BookingManager, FlightCatalog, PaymentOrchestrator, ProfileService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub flight_repo: Arc<dyn FlightRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub bookings: Arc<BookingManager>,
    pub flights: Arc<FlightCatalog>,
    pub accounts: Arc<AuthService>,
    pub profiles: Arc<ProfileService>,
    pub auth: AuthConfig,
    pub allowed_origins: Vec<String>,
}

impl AppState {
    /// Wire repositories and workflows over one record store
    pub fn new(store: Arc<dyn RecordStore>, auth: AuthConfig, allowed_origins: Vec<String>) -> Self {
        let flight_repo: Arc<dyn FlightRepository> = Arc::new(JsonFlightRepository::new(store.clone()));
        let user_repo: Arc<dyn UserRepository> = Arc::new(JsonUserRepository::new(store.clone()));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(JsonBookingRepository::new(store));

        Self {
            bookings: Arc::new(BookingManager::new(
                flight_repo.clone(),
                user_repo.clone(),
                booking_repo,
                PaymentOrchestrator::new(),
            )),
            flights: Arc::new(FlightCatalog::new(flight_repo.clone())),
            accounts: Arc::new(AuthService::new(user_repo.clone())),
            profiles: Arc::new(ProfileService::new(user_repo.clone())),
            flight_repo,
            user_repo,
            auth,
            allowed_origins,
        }
    }
}
