use skybook_core::booking::{booking_total, loyalty_points_for, Booking};
use skybook_core::repository::{BookingRepository, FlightRepository, UserRepository};
use skybook_core::user::{User, UserRole};
use skybook_core::{CoreError, CoreResult, Flight};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::models::BookingRequest;
use crate::orchestrator::{PaymentOrchestrator, PaymentReceipt};
use crate::views::BookingView;

/// Password given to passenger accounts created on the fly by a booking
pub const TEMPORARY_PASSWORD: &str = "temp123";

const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// Runs the booking lifecycle: create (confirm) and cancel, plus lookups.
pub struct BookingManager {
    flights: Arc<dyn FlightRepository>,
    users: Arc<dyn UserRepository>,
    bookings: Arc<dyn BookingRepository>,
    payments: PaymentOrchestrator,
}

impl BookingManager {
    pub fn new(
        flights: Arc<dyn FlightRepository>,
        users: Arc<dyn UserRepository>,
        bookings: Arc<dyn BookingRepository>,
        payments: PaymentOrchestrator,
    ) -> Self {
        Self {
            flights,
            users,
            bookings,
            payments,
        }
    }

    /// Book one seat and return the confirmed booking.
    ///
    /// Seat, loyalty points and booking live in different collections. If a later
    /// step fails the earlier ones are undone on a best-effort basis.
    pub async fn create_booking(&self, request: BookingRequest) -> CoreResult<BookingView> {
        request.validate()?;

        let flight = self
            .flights
            .find_by_id(request.flight_id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Flight".to_string()))?;
        if !flight.is_available() {
            return Err(CoreError::Unavailable("No seats available".to_string()));
        }

        let passenger = self.resolve_passenger(&request).await?;
        let total_amount = booking_total(flight.final_price());
        let receipt = self.payments.charge(&request, total_amount)?;

        let flight = match self
            .flights
            .update(
                flight.id,
                Box::new(|f: &mut Flight| {
                    f.reserve_seat()?;
                    Ok(())
                }),
            )
            .await
        {
            Ok(flight) => flight,
            Err(err) => {
                warn!(
                    "Seat on {} gone after payment {}: {}",
                    flight.flight_number, receipt.transaction_id, err
                );
                return Err(err);
            }
        };

        let points = loyalty_points_for(total_amount);
        if let Err(err) = self
            .users
            .update(
                passenger.id,
                Box::new(move |u: &mut User| {
                    u.add_loyalty_points(points);
                    Ok(())
                }),
            )
            .await
        {
            self.release_seat(flight.id).await;
            return Err(err);
        }

        let booking = match self
            .insert_booking(&request, &passenger, &flight, total_amount, &receipt)
            .await
        {
            Ok(booking) => booking,
            Err(err) => {
                self.revoke_points(passenger.id, points).await;
                self.release_seat(flight.id).await;
                return Err(err);
            }
        };

        info!(
            "Booking {} confirmed on {} for {} ({:.2}, {})",
            booking.booking_reference,
            flight.flight_number,
            booking.passenger.email,
            booking.total_amount,
            booking.payment_method
        );
        Ok(BookingView::new(&booking, Some(&flight)))
    }

    /// Cancel a confirmed booking and give its seat back. If the seat cannot be
    /// returned the booking is put back to CONFIRMED so the cancel can be retried.
    pub async fn cancel_booking(&self, id: i64) -> CoreResult<BookingView> {
        let booking = self
            .bookings
            .update(id, Box::new(|b: &mut Booking| b.cancel()))
            .await?;

        let flight = match self
            .flights
            .update(
                booking.flight_id,
                Box::new(|f: &mut Flight| {
                    f.release_seat();
                    Ok(())
                }),
            )
            .await
        {
            Ok(flight) => Some(flight),
            Err(CoreError::NotFound(_)) => {
                warn!(
                    "Cancelled booking {} refers to missing flight {}",
                    booking.booking_reference, booking.flight_id
                );
                None
            }
            Err(err) => {
                warn!(
                    "Seat for booking {} not released, reverting cancellation: {}",
                    booking.booking_reference, err
                );
                self.reinstate(booking.id).await;
                return Err(err);
            }
        };

        info!("Booking {} cancelled", booking.booking_reference);
        Ok(BookingView::new(&booking, flight.as_ref()))
    }

    pub async fn get_booking(&self, id: i64) -> CoreResult<BookingView> {
        let booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound("Booking".to_string()))?;
        let flight = self.flights.find_by_id(booking.flight_id).await?;
        Ok(BookingView::new(&booking, flight.as_ref()))
    }

    /// Bookings made with this contact email, oldest first
    pub async fn list_bookings_for_email(&self, email: &str) -> CoreResult<Vec<BookingView>> {
        let bookings = self.bookings.list_by_email(email.trim()).await?;
        if bookings.is_empty() {
            return Ok(Vec::new());
        }

        let flights: HashMap<i64, Flight> = self
            .flights
            .list()
            .await?
            .into_iter()
            .map(|f| (f.id, f))
            .collect();

        Ok(bookings
            .iter()
            .map(|b| BookingView::new(b, flights.get(&b.flight_id)))
            .collect())
    }

    /// Existing passenger for the contact email, or a new one with a temporary password
    async fn resolve_passenger(&self, request: &BookingRequest) -> CoreResult<User> {
        let email = request.email.trim();

        if let Some(user) = self.users.find_by_email(email).await? {
            return match user.role() {
                UserRole::Passenger => Ok(user),
                UserRole::Admin => Err(CoreError::Conflict(
                    "Email belongs to an admin account".to_string(),
                )),
            };
        }

        let mut passenger = User::new_passenger(
            email,
            TEMPORARY_PASSWORD,
            request.first_name.trim(),
            request.last_name.trim(),
        );
        passenger.phone = Some(request.phone.trim().to_string());

        match self.users.create(passenger).await {
            Ok(created) => {
                info!("Created passenger account for {}", created.email);
                Ok(created)
            }
            // Lost a race with another request creating the same account
            Err(CoreError::Conflict(_)) => self
                .users
                .find_by_email(email)
                .await?
                .filter(|u| u.role() == UserRole::Passenger)
                .ok_or_else(|| CoreError::Conflict("Email already registered".to_string())),
            Err(err) => Err(err),
        }
    }

    async fn insert_booking(
        &self,
        request: &BookingRequest,
        passenger: &User,
        flight: &Flight,
        total_amount: f64,
        receipt: &PaymentReceipt,
    ) -> CoreResult<Booking> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let booking = Booking::confirmed(
                passenger.id,
                flight.id,
                total_amount,
                receipt.method,
                receipt.transaction_id.clone(),
                request.snapshot(),
            )
            .with_processing_fee(receipt.processing_fee);

            match self.bookings.create(booking).await {
                Err(CoreError::Conflict(msg)) if attempts < MAX_REFERENCE_ATTEMPTS => {
                    warn!("{}; generating a new reference", msg);
                }
                result => return result,
            }
        }
    }

    async fn release_seat(&self, flight_id: i64) {
        let result = self
            .flights
            .update(
                flight_id,
                Box::new(|f: &mut Flight| {
                    f.release_seat();
                    Ok(())
                }),
            )
            .await;
        if let Err(err) = result {
            error!("Failed to release seat on flight {}: {}", flight_id, err);
        }
    }

    async fn reinstate(&self, booking_id: i64) {
        let result = self
            .bookings
            .update(booking_id, Box::new(|b: &mut Booking| b.reinstate()))
            .await;
        if let Err(err) = result {
            error!(
                "Booking {} left cancelled without releasing its seat: {}",
                booking_id, err
            );
        }
    }

    async fn revoke_points(&self, user_id: i64, points: u32) {
        let result = self
            .users
            .update(
                user_id,
                Box::new(move |u: &mut User| {
                    if let Some(p) = u.as_passenger_mut() {
                        p.loyalty_points = p.loyalty_points.saturating_sub(points);
                    }
                    Ok(())
                }),
            )
            .await;
        if let Err(err) = result {
            error!(
                "Failed to revoke {} loyalty points from user {}: {}",
                points, user_id, err
            );
        }
    }
}
