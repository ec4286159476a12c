pub mod user;
pub mod booking;
pub mod payment;
pub mod repository;

pub use skybook_catalog::{Flight, FlightFare, FlightType};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Cannot transition from {from} to {to}")]
    InvalidState { from: String, to: String },
    #[error("Payment failed: {0}")]
    PaymentFailed(String),
    #[error("{0}")]
    Unavailable(String),
    #[error("Invalid password")]
    InvalidCredentials,
    #[error("Stored collection '{collection}' is corrupt: {detail}")]
    StorageCorrupt { collection: String, detail: String },
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<skybook_catalog::InventoryError> for CoreError {
    fn from(err: skybook_catalog::InventoryError) -> Self {
        CoreError::Unavailable(err.to_string())
    }
}

impl From<skybook_catalog::FareError> for CoreError {
    fn from(err: skybook_catalog::FareError) -> Self {
        CoreError::ValidationFailed(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
