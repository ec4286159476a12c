use async_trait::async_trait;
use skybook_core::booking::Booking;
use skybook_core::repository::{BookingRepository, Mutation};
use skybook_core::{CoreError, CoreResult};
use std::sync::Arc;

use crate::collection::JsonCollection;
use crate::record_store::RecordStore;

pub struct JsonBookingRepository {
    bookings: JsonCollection<Booking>,
}

impl JsonBookingRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            bookings: JsonCollection::new(store),
        }
    }
}

#[async_trait]
impl BookingRepository for JsonBookingRepository {
    async fn create(&self, booking: Booking) -> CoreResult<Booking> {
        self.bookings
            .insert(booking, |existing, new| {
                if existing
                    .iter()
                    .any(|b| b.booking_reference == new.booking_reference)
                {
                    return Err(CoreError::Conflict(format!(
                        "Booking reference {} already in use",
                        new.booking_reference
                    )));
                }
                Ok(())
            })
            .await
    }

    async fn find_by_id(&self, id: i64) -> CoreResult<Option<Booking>> {
        self.bookings.find(|b| b.id == id).await
    }

    async fn list_by_email(&self, email: &str) -> CoreResult<Vec<Booking>> {
        self.bookings
            .filter(|b| b.passenger.email == email)
            .await
    }

    async fn update(&self, id: i64, mutation: Mutation<Booking>) -> CoreResult<Booking> {
        self.bookings.update(id, "Booking", mutation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_store::MemoryRecordStore;
    use skybook_core::booking::{BookingStatus, PassengerSnapshot};
    use skybook_core::payment::PaymentMethod;

    fn booking(passenger_id: i64, email: &str) -> Booking {
        Booking::confirmed(
            passenger_id,
            1,
            5225.0,
            PaymentMethod::Upi,
            "UPI-00000000",
            PassengerSnapshot {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
                phone: "9876543210".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = JsonBookingRepository::new(Arc::new(MemoryRecordStore::new()));
        let first = repo.create(booking(1, "john@test.com")).await.unwrap();
        repo.create(booking(1, "john@test.com")).await.unwrap();
        repo.create(booking(2, "jane@test.com")).await.unwrap();

        assert_eq!(repo.list_by_email("john@test.com").await.unwrap().len(), 2);
        assert_eq!(repo.list_by_email("jane@test.com").await.unwrap().len(), 1);
        assert_eq!(repo.find_by_id(first.id).await.unwrap(), Some(first));
        assert!(repo.find_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let repo = JsonBookingRepository::new(Arc::new(MemoryRecordStore::new()));
        repo.create(booking(1, "John@test.com")).await.unwrap();
        repo.create(booking(2, "john@test.com")).await.unwrap();

        let listed = repo.list_by_email("john@test.com").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].passenger_id, 2);
        assert_eq!(repo.list_by_email("JOHN@TEST.COM").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_reference_rejected() {
        let repo = JsonBookingRepository::new(Arc::new(MemoryRecordStore::new()));
        let first = repo.create(booking(1, "john@test.com")).await.unwrap();

        let mut clash = booking(2, "jane@test.com");
        clash.booking_reference = first.booking_reference.clone();
        assert!(matches!(
            repo.create(clash).await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_through_update() {
        let repo = JsonBookingRepository::new(Arc::new(MemoryRecordStore::new()));
        let created = repo.create(booking(1, "john@test.com")).await.unwrap();

        let cancelled = repo
            .update(created.id, Box::new(|b: &mut Booking| b.cancel()))
            .await
            .unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);

        let err = repo
            .update(created.id, Box::new(|b: &mut Booking| b.cancel()))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState { .. }));
    }
}
