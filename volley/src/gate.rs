use crate::error::RunError;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting admission gate bounding the number of in-flight requests.
///
/// [`acquire`](ConcurrencyGate::acquire) suspends until a slot is free. Slots are handed back by
/// dropping (or explicitly [releasing](GatePermit::release)) the returned permit, which wakes at
/// most one waiter. Waiters are not served in any guaranteed order. Once
/// [closed](ConcurrencyGate::close), no further slots are handed out.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyGate {
    /// # Panics
    /// If `capacity` exceeds [`Semaphore::MAX_PERMITS`]. [`RunConfig`](crate::RunConfig)
    /// rejects such values.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity.get())),
            capacity: capacity.get(),
        }
    }

    pub async fn acquire(&self) -> Result<GatePermit, RunError> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| RunError::GateClosed)?;

        Ok(GatePermit { _permit: permit })
    }

    /// Stop admitting. Pending and later [`acquire`](ConcurrencyGate::acquire) calls fail with
    /// [`RunError::GateClosed`]; permits already held stay valid.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slots currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }
}

/// A held gate slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the permit is dropped"]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl GatePermit {
    pub fn release(self) {}
}
