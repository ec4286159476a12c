use crate::flight::Flight;

impl Flight {
    pub fn is_available(&self) -> bool {
        self.available_seats > 0
    }

    /// Take one seat. Silently does nothing when the flight is full; callers that need
    /// to know whether a seat was taken use [`Flight::reserve_seat`].
    pub fn book_seat(&mut self) {
        if self.is_available() {
            self.available_seats -= 1;
        }
    }

    /// Take one seat or report that none is left. Returns the remaining seat count.
    pub fn reserve_seat(&mut self) -> Result<u32, InventoryError> {
        if !self.is_available() {
            return Err(InventoryError::SoldOut(self.flight_number.clone()));
        }
        self.book_seat();
        Ok(self.available_seats)
    }

    /// Give back a seat taken by a booking that has since been cancelled
    pub fn release_seat(&mut self) {
        self.available_seats = self.available_seats.saturating_add(1);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("No seats available on flight {0}")]
    SoldOut(String),
}
