pub mod app_config;
pub mod booking_repo;
pub mod codec;
pub mod collection;
pub mod flight_repo;
pub mod record_store;
pub mod seed;
pub mod user_repo;

pub use booking_repo::JsonBookingRepository;
pub use codec::{CodecError, RecordCodec};
pub use flight_repo::JsonFlightRepository;
pub use record_store::{FileRecordStore, MemoryRecordStore, RecordStore, StoreError};
pub use seed::seed_sample_data;
pub use user_repo::JsonUserRepository;
