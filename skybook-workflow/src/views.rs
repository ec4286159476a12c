//! Response shapes handed to the HTTP layer.

use chrono::NaiveDate;
use serde::Serialize;
use skybook_core::booking::{Booking, BookingStatus, PassengerSnapshot};
use skybook_core::payment::PaymentMethod;
use skybook_core::user::{User, UserProfile, UserRole};
use skybook_core::{Flight, FlightType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightView {
    pub id: i64,
    pub flight_number: String,
    pub airline: String,
    pub from: String,
    pub to: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    /// Base fare for display, e.g. `₹4500`
    pub price: String,
    pub final_price: f64,
    pub available_seats: u32,
    pub image: String,
    pub flight_type: FlightType,
    pub requires_visa: bool,
    pub flight_info: String,
}

impl From<&Flight> for FlightView {
    fn from(flight: &Flight) -> Self {
        Self {
            id: flight.id,
            flight_number: flight.flight_number.clone(),
            airline: flight.airline.clone(),
            from: flight.departure_city.clone(),
            to: flight.arrival_city.clone(),
            departure: flight.departure_time.clone(),
            arrival: flight.arrival_time.clone(),
            duration: flight.duration.clone(),
            price: format!("₹{}", flight.base_price.trunc() as i64),
            final_price: flight.final_price(),
            available_seats: flight.available_seats,
            image: flight.image.clone(),
            flight_type: flight.flight_type(),
            requires_visa: flight.requires_visa(),
            flight_info: flight.flight_info(),
        }
    }
}

/// A booking joined with the flight it is for. Flight fields are `null` when the
/// flight no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: i64,
    pub booking_ref: String,
    pub status: BookingStatus,
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub airline: Option<String>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    pub processing_fee: f64,
    pub passenger: PassengerSnapshot,
}

impl BookingView {
    pub fn new(booking: &Booking, flight: Option<&Flight>) -> Self {
        Self {
            id: booking.id,
            booking_ref: booking.booking_reference.clone(),
            status: booking.status,
            from: flight.map(|f| f.departure_city.clone()),
            to: flight.map(|f| f.arrival_city.clone()),
            departure: flight.map(|f| f.departure_time.clone()),
            arrival: flight.map(|f| f.arrival_time.clone()),
            airline: flight.map(|f| f.airline.clone()),
            total_amount: booking.total_amount,
            payment_method: booking.payment_method,
            transaction_id: booking.transaction_id.clone(),
            processing_fee: booking.processing_fee,
            passenger: booking.passenger.clone(),
        }
    }
}

/// What a client learns about the account that just logged in or registered
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub location: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name(),
            role: user.role(),
            location: user.location.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub role: UserRole,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProfileDetails {
    #[serde(rename_all = "camelCase")]
    Passenger {
        first_name: String,
        last_name: String,
        address: Option<String>,
        date_of_birth: Option<NaiveDate>,
        loyalty_points: u32,
    },
    #[serde(rename_all = "camelCase")]
    Admin {
        department: Option<String>,
        admin_level: u32,
        permissions: Vec<String>,
    },
}

impl From<&User> for ProfileView {
    fn from(user: &User) -> Self {
        let details = match &user.profile {
            UserProfile::Passenger(p) => ProfileDetails::Passenger {
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                address: p.address.clone(),
                date_of_birth: p.date_of_birth,
                loyalty_points: p.loyalty_points,
            },
            UserProfile::Admin(a) => ProfileDetails::Admin {
                department: a.department.clone(),
                admin_level: a.admin_level,
                permissions: user.permissions(),
            },
        };

        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.display_name(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            role: user.role(),
            details,
        }
    }
}
