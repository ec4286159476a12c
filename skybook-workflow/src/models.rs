use chrono::NaiveDate;
use serde::Deserialize;
use skybook_catalog::{FareFields, FlightFare, FlightType};
use skybook_core::booking::PassengerSnapshot;
use skybook_core::payment::is_valid_mobile_number;
use skybook_core::{CoreError, CoreResult, Flight};
use skybook_shared::Masked;

fn require(value: &str, field: &str) -> CoreResult<()> {
    if value.trim().is_empty() {
        return Err(CoreError::ValidationFailed(format!("{} is required", field)));
    }
    Ok(())
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// A passenger's request to book one seat
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub flight_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    /// `CREDIT_CARD`, `DEBIT_CARD` or `UPI`. Credit card when absent.
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub card_number: Option<Masked<String>>,
    #[serde(default)]
    pub card_expiry: Option<String>,
    #[serde(default)]
    pub card_cvv: Option<Masked<String>>,
    #[serde(default)]
    pub card_holder_name: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub upi_id: Option<String>,
    #[serde(default)]
    pub upi_mobile: Option<String>,
}

impl BookingRequest {
    /// Contact fields only. Payment details are checked by the payment itself.
    pub fn validate(&self) -> CoreResult<()> {
        require(&self.first_name, "First name")?;
        require(&self.last_name, "Last name")?;
        require(&self.email, "Email")?;
        if !self.email.contains('@') {
            return Err(CoreError::ValidationFailed("Invalid email format".to_string()));
        }
        if !is_valid_mobile_number(&self.phone) {
            return Err(CoreError::ValidationFailed(
                "Phone must be 10 digits".to_string(),
            ));
        }
        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub fn card_holder(&self) -> String {
        non_blank(&self.card_holder_name)
            .map(str::to_string)
            .unwrap_or_else(|| self.full_name())
    }

    pub fn bank(&self) -> Option<&str> {
        non_blank(&self.bank_name)
    }

    pub fn snapshot(&self) -> PassengerSnapshot {
        PassengerSnapshot {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: Masked<String>,
    pub name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> CoreResult<()> {
        require(&self.email, "Email")?;
        if !self.email.contains('@') {
            return Err(CoreError::ValidationFailed("Invalid email format".to_string()));
        }
        require(self.password.expose(), "Password")?;
        require(&self.name, "Name")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Masked<String>,
}

/// Partial profile edit. Absent fields are left unchanged; passenger-only
/// fields are ignored for admins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdate {
    pub location: String,
}

/// Admin request to add a flight to the catalog
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFlightRequest {
    pub flight_number: String,
    pub airline: String,
    pub departure_city: String,
    pub arrival_city: String,
    #[serde(default)]
    pub departure_time: String,
    #[serde(default)]
    pub arrival_time: String,
    #[serde(default)]
    pub duration: String,
    pub base_price: f64,
    pub available_seats: u32,
    #[serde(default)]
    pub image: String,
    pub flight_type: FlightType,
    #[serde(default)]
    pub state_tax_percentage: Option<f64>,
    #[serde(default)]
    pub includes_meal: Option<bool>,
    #[serde(default)]
    pub international_tax_percentage: Option<f64>,
    #[serde(default)]
    pub visa_required: Option<bool>,
    #[serde(default)]
    pub baggage_allowance_kg: Option<u32>,
    #[serde(default)]
    pub destination_country: Option<String>,
}

impl NewFlightRequest {
    pub fn into_flight(self) -> CoreResult<Flight> {
        require(&self.flight_number, "Flight number")?;
        require(&self.airline, "Airline")?;
        require(&self.departure_city, "Departure city")?;
        require(&self.arrival_city, "Arrival city")?;
        if !self.base_price.is_finite() || self.base_price < 0.0 {
            return Err(CoreError::ValidationFailed(
                "Base price must be a non-negative number".to_string(),
            ));
        }

        let fare = FlightFare::from_fields(
            self.flight_type,
            FareFields {
                state_tax_percentage: self.state_tax_percentage,
                includes_meal: self.includes_meal,
                international_tax_percentage: self.international_tax_percentage,
                visa_required: self.visa_required,
                baggage_allowance_kg: self.baggage_allowance_kg,
                destination_country: self.destination_country,
            },
        )?;

        Ok(Flight {
            id: 0,
            flight_number: self.flight_number.trim().to_string(),
            airline: self.airline,
            departure_city: self.departure_city,
            arrival_city: self.arrival_city,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration: self.duration,
            base_price: self.base_price,
            available_seats: self.available_seats,
            image: self.image,
            fare,
        })
    }
}
