use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use skybook_core::booking::{Booking, BookingStatus, PassengerSnapshot};
use skybook_core::payment::PaymentMethod;

use super::{from_value, to_value, CodecError, RecordCodec};
use crate::record_store::BOOKINGS;

const ENTITY: &str = "booking";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRecord {
    id: i64,
    booking_reference: String,
    passenger_id: i64,
    flight_id: i64,
    booking_date: DateTime<Utc>,
    status: String,
    total_amount: f64,
    payment_method: String,
    #[serde(default)]
    transaction_id: String,
    #[serde(default)]
    processing_fee: f64,
    #[serde(default)]
    passenger_first_name: String,
    #[serde(default)]
    passenger_last_name: String,
    #[serde(default)]
    passenger_email: String,
    #[serde(default)]
    passenger_phone: String,
}

fn malformed(reason: String) -> CodecError {
    CodecError::Malformed {
        entity: ENTITY,
        reason,
    }
}

impl RecordCodec for Booking {
    const COLLECTION: &'static str = BOOKINGS;

    fn record_id(&self) -> i64 {
        self.id
    }

    fn assign_id(&mut self, id: i64) {
        self.id = id;
    }

    fn encode(&self) -> Result<Value, CodecError> {
        to_value(
            ENTITY,
            &BookingRecord {
                id: self.id,
                booking_reference: self.booking_reference.clone(),
                passenger_id: self.passenger_id,
                flight_id: self.flight_id,
                booking_date: self.booking_date,
                status: self.status.as_str().to_string(),
                total_amount: self.total_amount,
                payment_method: self.payment_method.as_str().to_string(),
                transaction_id: self.transaction_id.clone(),
                processing_fee: self.processing_fee,
                passenger_first_name: self.passenger.first_name.clone(),
                passenger_last_name: self.passenger.last_name.clone(),
                passenger_email: self.passenger.email.clone(),
                passenger_phone: self.passenger.phone.clone(),
            },
        )
    }

    fn decode(record: Value) -> Result<Self, CodecError> {
        let record: BookingRecord = from_value(ENTITY, record)?;
        let status: BookingStatus = record.status.parse().map_err(malformed)?;
        let payment_method: PaymentMethod = record.payment_method.parse().map_err(malformed)?;

        Ok(Booking {
            id: record.id,
            booking_reference: record.booking_reference,
            passenger_id: record.passenger_id,
            flight_id: record.flight_id,
            booking_date: record.booking_date,
            status,
            total_amount: record.total_amount,
            payment_method,
            transaction_id: record.transaction_id,
            processing_fee: record.processing_fee,
            passenger: PassengerSnapshot {
                first_name: record.passenger_first_name,
                last_name: record.passenger_last_name,
                email: record.passenger_email,
                phone: record.passenger_phone,
            },
        })
    }
}
