//! Flat, discriminated JSON records for the stored entities.
//!
//! Each collection stores one flat object per entity. Polymorphic entities carry a
//! `type` field naming their variant; only the fields of that variant are written.

mod booking;
mod flight;
mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CodecError {
    #[error("{entity} record {id} has no 'type' field")]
    MissingDiscriminator { entity: &'static str, id: String },
    #[error("{entity} record {id} has unknown type '{value}'")]
    UnknownDiscriminator {
        entity: &'static str,
        id: String,
        value: String,
    },
    #[error("malformed {entity} record: {reason}")]
    Malformed { entity: &'static str, reason: String },
}

/// An entity that can be written to and read back from a collection.
pub trait RecordCodec: Clone + Send + Sync + 'static {
    /// Name of the collection holding this entity
    const COLLECTION: &'static str;

    fn record_id(&self) -> i64;

    fn assign_id(&mut self, id: i64);

    fn encode(&self) -> Result<Value, CodecError>;

    fn decode(record: Value) -> Result<Self, CodecError>;
}

fn to_value<R: Serialize>(entity: &'static str, record: &R) -> Result<Value, CodecError> {
    serde_json::to_value(record).map_err(|e| CodecError::Malformed {
        entity,
        reason: e.to_string(),
    })
}

fn from_value<R: DeserializeOwned>(entity: &'static str, record: Value) -> Result<R, CodecError> {
    serde_json::from_value(record).map_err(|e| CodecError::Malformed {
        entity,
        reason: e.to_string(),
    })
}

/// Id used in error messages, read before the record is fully parsed
fn raw_id(record: &Value) -> String {
    record
        .get("id")
        .map(|id| id.to_string())
        .unwrap_or_else(|| "<no id>".to_string())
}

/// Read the `type` discriminator. Absent and `null` are both missing.
fn discriminator(entity: &'static str, record: &Value) -> Result<String, CodecError> {
    match record.get("type") {
        Some(Value::String(tag)) => Ok(tag.clone()),
        Some(Value::Null) | None => Err(CodecError::MissingDiscriminator {
            entity,
            id: raw_id(record),
        }),
        Some(other) => Err(CodecError::UnknownDiscriminator {
            entity,
            id: raw_id(record),
            value: other.to_string(),
        }),
    }
}
