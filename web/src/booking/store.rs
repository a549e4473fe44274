use std::sync::Mutex;

use shared_types::Booking;

use super::error::StoreError;

/// Single-slot persistence for the latest booking.
///
/// `put` replaces whatever was stored; there is no history and no delete.
pub trait BookingStore {
    fn get(&self) -> Result<Option<Booking>, StoreError>;
    fn put(&self, booking: &Booking) -> Result<(), StoreError>;
}

pub(crate) fn encode(booking: &Booking) -> Result<String, StoreError> {
    serde_json::to_string(booking).map_err(StoreError::Encode)
}

pub(crate) fn decode(raw: &str) -> Result<Booking, StoreError> {
    serde_json::from_str(raw).map_err(StoreError::Corrupt)
}

/// Keeps the serialized record in memory. Used off the browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with raw text, as if another page had written it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl BookingStore for MemoryStore {
    fn get(&self) -> Result<Option<Booking>, StoreError> {
        let slot = self.slot.lock().map_err(|_| StoreError::Unavailable)?;
        slot.as_deref().map(decode).transpose()
    }

    fn put(&self, booking: &Booking) -> Result<(), StoreError> {
        let encoded = encode(booking)?;
        let mut slot = self.slot.lock().map_err(|_| StoreError::Unavailable)?;
        *slot = Some(encoded);
        Ok(())
    }
}

impl<S: BookingStore + ?Sized> BookingStore for &S {
    fn get(&self) -> Result<Option<Booking>, StoreError> {
        (**self).get()
    }

    fn put(&self, booking: &Booking) -> Result<(), StoreError> {
        (**self).put(booking)
    }
}
