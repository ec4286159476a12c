use crate::flight::{Flight, FlightFare};

/// Flat surcharge for domestic flights that include a meal
pub const MEAL_SURCHARGE: f64 = 200.0;

/// Flat baggage fee added to every international fare
pub const BAGGAGE_FEE: f64 = 500.0;

pub const DEFAULT_STATE_TAX_PERCENTAGE: f64 = 5.0;
pub const DEFAULT_INTERNATIONAL_TAX_PERCENTAGE: f64 = 12.0;

pub const MAX_TAX_PERCENTAGE: f64 = 100.0;

#[derive(Debug, thiserror::Error)]
pub enum FareError {
    #[error("Tax percentage must be between 0 and {max}, got {0}", max = MAX_TAX_PERCENTAGE)]
    TaxPercentage(f64),
}

pub fn check_tax_percentage(pct: f64) -> Result<f64, FareError> {
    if pct.is_finite() && (0.0..=MAX_TAX_PERCENTAGE).contains(&pct) {
        Ok(pct)
    } else {
        Err(FareError::TaxPercentage(pct))
    }
}

impl Flight {
    /// Tax owed on the base price under the variant's tax rate
    pub fn tax_amount(&self) -> f64 {
        let rate = match &self.fare {
            FlightFare::Domestic(fare) => fare.state_tax_percentage,
            FlightFare::International(fare) => fare.international_tax_percentage,
        };
        self.base_price * (rate / 100.0)
    }

    /// Fare the passenger pays for the seat, before booking-level taxes.
    ///
    /// Domestic: base + state tax + meal surcharge (if any).
    /// International: base + international tax + baggage fee.
    pub fn final_price(&self) -> f64 {
        let surcharge = match &self.fare {
            FlightFare::Domestic(fare) if fare.includes_meal => MEAL_SURCHARGE,
            FlightFare::Domestic(_) => 0.0,
            FlightFare::International(_) => BAGGAGE_FEE,
        };
        self.base_price + self.tax_amount() + surcharge
    }

    pub fn requires_visa(&self) -> bool {
        match &self.fare {
            FlightFare::Domestic(_) => false,
            FlightFare::International(fare) => fare.visa_required,
        }
    }
}
