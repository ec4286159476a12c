use async_trait::async_trait;
use skybook_catalog::Flight;

use crate::booking::Booking;
use crate::user::User;
use crate::CoreResult;

/// In-place edit applied inside a repository's load-mutate-save cycle.
/// Returning an error aborts the cycle without writing anything.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) -> CoreResult<()> + Send>;

/// Repository trait for user accounts (passengers and admins)
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user and assign its id. Fails with `Conflict` if the email is taken.
    async fn create(&self, user: User) -> CoreResult<User>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<User>>;

    async fn list(&self) -> CoreResult<Vec<User>>;

    /// Apply `mutation` to the user atomically and return the stored result.
    /// The id, email and variant of the user cannot be changed this way.
    async fn update(&self, id: i64, mutation: Mutation<User>) -> CoreResult<User>;
}

/// Repository trait for flights
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Persist a new flight and assign its id. Fails with `Conflict` on a duplicate flight number.
    async fn create(&self, flight: Flight) -> CoreResult<Flight>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Flight>>;

    async fn list(&self) -> CoreResult<Vec<Flight>>;

    async fn update(&self, id: i64, mutation: Mutation<Flight>) -> CoreResult<Flight>;
}

/// Repository trait for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking and assign its id. Fails with `Conflict` on a duplicate reference.
    async fn create(&self, booking: Booking) -> CoreResult<Booking>;

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Booking>>;

    /// Bookings whose frozen contact email matches
    async fn list_by_email(&self, email: &str) -> CoreResult<Vec<Booking>>;

    async fn update(&self, id: i64, mutation: Mutation<Booking>) -> CoreResult<Booking>;
}
