use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pricing::{check_tax_percentage, FareError};

/// Discriminator for the two flight variants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightType {
    Domestic,
    International,
}

impl FlightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightType::Domestic => "DOMESTIC",
            FlightType::International => "INTERNATIONAL",
        }
    }
}

impl fmt::Display for FlightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DOMESTIC" => Ok(FlightType::Domestic),
            "INTERNATIONAL" => Ok(FlightType::International),
            other => Err(format!("unknown flight type: {}", other)),
        }
    }
}

/// Domestic fare rules
#[derive(Debug, Clone, PartialEq)]
pub struct DomesticFare {
    pub state_tax_percentage: f64,
    pub includes_meal: bool,
}

impl Default for DomesticFare {
    fn default() -> Self {
        Self {
            state_tax_percentage: crate::pricing::DEFAULT_STATE_TAX_PERCENTAGE,
            includes_meal: false,
        }
    }
}

/// International fare rules
#[derive(Debug, Clone, PartialEq)]
pub struct InternationalFare {
    pub international_tax_percentage: f64,
    pub visa_required: bool,
    pub baggage_allowance_kg: u32,
    pub destination_country: String,
}

impl Default for InternationalFare {
    fn default() -> Self {
        Self {
            international_tax_percentage: crate::pricing::DEFAULT_INTERNATIONAL_TAX_PERCENTAGE,
            visa_required: true,
            baggage_allowance_kg: 30,
            destination_country: String::new(),
        }
    }
}

/// Variant-specific payload of a flight
#[derive(Debug, Clone, PartialEq)]
pub enum FlightFare {
    Domestic(DomesticFare),
    International(InternationalFare),
}

impl FlightFare {
    pub fn flight_type(&self) -> FlightType {
        match self {
            FlightFare::Domestic(_) => FlightType::Domestic,
            FlightFare::International(_) => FlightType::International,
        }
    }

    /// Build the fare for `flight_type` from loose fields. Absent fields take the
    /// variant's defaults; fields of the other variant are ignored.
    pub fn from_fields(flight_type: FlightType, fields: FareFields) -> Result<Self, FareError> {
        match flight_type {
            FlightType::Domestic => {
                let defaults = DomesticFare::default();
                Ok(FlightFare::Domestic(DomesticFare {
                    state_tax_percentage: check_tax_percentage(
                        fields
                            .state_tax_percentage
                            .unwrap_or(defaults.state_tax_percentage),
                    )?,
                    includes_meal: fields.includes_meal.unwrap_or(defaults.includes_meal),
                }))
            }
            FlightType::International => {
                let defaults = InternationalFare::default();
                Ok(FlightFare::International(InternationalFare {
                    international_tax_percentage: check_tax_percentage(
                        fields
                            .international_tax_percentage
                            .unwrap_or(defaults.international_tax_percentage),
                    )?,
                    visa_required: fields.visa_required.unwrap_or(defaults.visa_required),
                    baggage_allowance_kg: fields
                        .baggage_allowance_kg
                        .unwrap_or(defaults.baggage_allowance_kg),
                    destination_country: fields
                        .destination_country
                        .unwrap_or(defaults.destination_country),
                }))
            }
        }
    }

    /// The variant's own fields, everything else `None`
    pub fn fields(&self) -> FareFields {
        match self {
            FlightFare::Domestic(fare) => FareFields {
                state_tax_percentage: Some(fare.state_tax_percentage),
                includes_meal: Some(fare.includes_meal),
                ..FareFields::default()
            },
            FlightFare::International(fare) => FareFields {
                international_tax_percentage: Some(fare.international_tax_percentage),
                visa_required: Some(fare.visa_required),
                baggage_allowance_kg: Some(fare.baggage_allowance_kg),
                destination_country: Some(fare.destination_country.clone()),
                ..FareFields::default()
            },
        }
    }
}

/// Variant fields as they appear flattened in stored records and admin requests
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareFields {
    pub state_tax_percentage: Option<f64>,
    pub includes_meal: Option<bool>,
    pub international_tax_percentage: Option<f64>,
    pub visa_required: Option<bool>,
    pub baggage_allowance_kg: Option<u32>,
    pub destination_country: Option<String>,
}

/// A scheduled flight. Times and duration are display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    /// Assigned by the store; 0 until persisted.
    pub id: i64,
    pub flight_number: String,
    pub airline: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub base_price: f64,
    pub available_seats: u32,
    pub image: String,
    pub fare: FlightFare,
}

impl Flight {
    pub fn flight_type(&self) -> FlightType {
        self.fare.flight_type()
    }

    /// `Air India - AI101 (Delhi (DEL) → Mumbai (BOM)) [Domestic]`
    pub fn flight_info(&self) -> String {
        let base = format!(
            "{} - {} ({} → {})",
            self.airline, self.flight_number, self.departure_city, self.arrival_city
        );
        match &self.fare {
            FlightFare::Domestic(_) => format!("{} [Domestic]", base),
            FlightFare::International(fare) => {
                format!("{} [International to {}]", base, fare.destination_country)
            }
        }
    }

    /// Case-insensitive route match used by flight search.
    ///
    /// With both ends given, both must match. With one end given, a flight matches if
    /// either its departure or arrival city equals that location.
    pub fn matches_route(&self, from: Option<&str>, to: Option<&str>) -> bool {
        match (from, to) {
            (Some(from), Some(to)) => {
                self.departure_city.eq_ignore_ascii_case(from)
                    && self.arrival_city.eq_ignore_ascii_case(to)
            }
            (Some(location), None) | (None, Some(location)) => {
                self.departure_city.eq_ignore_ascii_case(location)
                    || self.arrival_city.eq_ignore_ascii_case(location)
            }
            (None, None) => true,
        }
    }
}
