use serde::{Deserialize, Serialize};
use serde_json::Value;
use skybook_catalog::{FareFields, Flight, FlightFare, FlightType};

use super::{discriminator, from_value, raw_id, to_value, CodecError, RecordCodec};
use crate::record_store::FLIGHTS;

const ENTITY: &str = "flight";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FlightRecord {
    id: i64,
    flight_number: String,
    airline: String,
    departure_city: String,
    arrival_city: String,
    #[serde(default)]
    departure_time: String,
    #[serde(default)]
    arrival_time: String,
    #[serde(default)]
    duration: String,
    base_price: f64,
    available_seats: u32,
    #[serde(default)]
    image: String,
    #[serde(rename = "type")]
    flight_type: String,

    // DOMESTIC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state_tax_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    includes_meal: Option<bool>,

    // INTERNATIONAL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    international_tax_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    visa_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    baggage_allowance_kg: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination_country: Option<String>,
}

impl RecordCodec for Flight {
    const COLLECTION: &'static str = FLIGHTS;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn encode(&self) -> Result<Value, CodecError> {
        let fields = self.fare.fields();
        let record = FlightRecord {
            id: self.id,
            flight_number: self.flight_number.clone(),
            airline: self.airline.clone(),
            departure_city: self.departure_city.clone(),
            arrival_city: self.arrival_city.clone(),
            departure_time: self.departure_time.clone(),
            arrival_time: self.arrival_time.clone(),
            duration: self.duration.clone(),
            base_price: self.base_price,
            available_seats: self.available_seats,
            image: self.image.clone(),
            flight_type: self.flight_type().as_str().to_string(),
            state_tax_percentage: fields.state_tax_percentage,
            includes_meal: fields.includes_meal,
            international_tax_percentage: fields.international_tax_percentage,
            visa_required: fields.visa_required,
            baggage_allowance_kg: fields.baggage_allowance_kg,
            destination_country: fields.destination_country,
        };

        to_value(ENTITY, &record)
    }

    fn decode(record: Value) -> Result<Self, CodecError> {
        let tag = discriminator(ENTITY, &record)?;
        let flight_type: FlightType =
            tag.parse().map_err(|_| CodecError::UnknownDiscriminator {
                entity: ENTITY,
                id: raw_id(&record),
                value: tag.clone(),
            })?;

        let record: FlightRecord = from_value(ENTITY, record)?;
        if !record.base_price.is_finite() || record.base_price < 0.0 {
            return Err(CodecError::Malformed {
                entity: ENTITY,
                reason: format!("flight {} has base price {}", record.id, record.base_price),
            });
        }

        let fields = FareFields {
            state_tax_percentage: record.state_tax_percentage,
            includes_meal: record.includes_meal,
            international_tax_percentage: record.international_tax_percentage,
            visa_required: record.visa_required,
            baggage_allowance_kg: record.baggage_allowance_kg,
            destination_country: record.destination_country,
        };
        let fare = FlightFare::from_fields(flight_type, fields).map_err(|e| {
            CodecError::Malformed {
                entity: ENTITY,
                reason: format!("flight {}: {}", record.id, e),
            }
        })?;

        Ok(Flight {
            id: record.id,
            flight_number: record.flight_number,
            airline: record.airline,
            departure_city: record.departure_city,
            arrival_city: record.arrival_city,
            departure_time: record.departure_time,
            arrival_time: record.arrival_time,
            duration: record.duration,
            base_price: record.base_price,
            available_seats: record.available_seats,
            image: record.image,
            fare,
        })
    }
}
