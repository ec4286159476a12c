use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skybook_shared::random_token;
use std::fmt;
use std::str::FromStr;

use crate::payment::PaymentMethod;
use crate::{CoreError, CoreResult};

/// Flat booking-level taxes added on top of the flight's final price
pub const BOOKING_TAXES: f64 = 500.0;

/// Amount of spend that earns one loyalty point
pub const LOYALTY_POINT_VALUE: f64 = 100.0;

/// Booking status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

/// Contact details copied from the booking request. Never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassengerSnapshot {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Assigned by the store; 0 until persisted.
    pub id: i64,
    pub booking_reference: String,
    pub passenger_id: i64,
    pub flight_id: i64,
    pub booking_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
    /// Fee the payment method charged on top of the total
    pub processing_fee: f64,
    pub passenger: PassengerSnapshot,
}

impl Booking {
    pub fn confirmed(
        passenger_id: i64,
        flight_id: i64,
        total_amount: f64,
        payment_method: PaymentMethod,
        transaction_id: impl Into<String>,
        passenger: PassengerSnapshot,
    ) -> Self {
        Self {
            id: 0,
            booking_reference: generate_booking_reference(),
            passenger_id,
            flight_id,
            booking_date: Utc::now(),
            status: BookingStatus::Confirmed,
            total_amount,
            payment_method,
            transaction_id: transaction_id.into(),
            processing_fee: 0.0,
            passenger,
        }
    }

    pub fn with_processing_fee(mut self, fee: f64) -> Self {
        self.processing_fee = fee;
        self
    }

    pub fn can_be_cancelled(&self) -> bool {
        self.status == BookingStatus::Confirmed
    }

    /// Transition: Confirmed → Cancelled
    pub fn cancel(&mut self) -> CoreResult<()> {
        if !self.can_be_cancelled() {
            return Err(self.rejected(BookingStatus::Cancelled));
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    /// Transition: Cancelled → Confirmed. Undoes a cancellation whose seat could
    /// not be given back.
    pub fn reinstate(&mut self) -> CoreResult<()> {
        if self.status != BookingStatus::Cancelled {
            return Err(self.rejected(BookingStatus::Confirmed));
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    /// Transition: Confirmed → Completed (flight flown)
    pub fn complete(&mut self) -> CoreResult<()> {
        if self.status != BookingStatus::Confirmed {
            return Err(self.rejected(BookingStatus::Completed));
        }
        self.status = BookingStatus::Completed;
        Ok(())
    }

    fn rejected(&self, to: BookingStatus) -> CoreError {
        CoreError::InvalidState {
            from: self.status.to_string(),
            to: to.to_string(),
        }
    }
}

/// `BK` followed by six uppercase alphanumerics
pub fn generate_booking_reference() -> String {
    format!("BK{}", random_token(6))
}

/// What the passenger pays for one seat on a flight with the given final price
pub fn booking_total(flight_final_price: f64) -> f64 {
    flight_final_price + BOOKING_TAXES
}

/// One point per full 100 spent
pub fn loyalty_points_for(total_amount: f64) -> u32 {
    if total_amount <= 0.0 {
        return 0;
    }
    (total_amount / LOYALTY_POINT_VALUE).floor() as u32
}
