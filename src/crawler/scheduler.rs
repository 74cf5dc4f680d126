//! Admission gate bounding concurrent network requests
//!
//! Every page fetch and image download passes through the same gate, so the
//! number of simultaneous requests never exceeds the configured limit no
//! matter how wide the link graph fans out. Tasks beyond the limit simply
//! wait for a permit; the gate itself never times out.

use std::sync::Arc;
use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Held for the duration of one request; dropping it frees the slot
#[derive(Debug)]
pub struct Admission {
    _permit: OwnedSemaphorePermit,
}

/// Counting semaphore shared by everything that talks to the network
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Global semaphore for limiting concurrent requests
    global_semaphore: Arc<Semaphore>,

    /// Total number of permits
    capacity: usize,
}

impl Scheduler {
    /// Creates a gate admitting at most `max_concurrent` requests at once
    ///
    /// A limit of zero is raised to one so the crawl can always progress.
    pub fn new(max_concurrent: u32) -> Self {
        let capacity = (max_concurrent as usize).max(1);
        Self {
            global_semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a request slot is free and takes it
    ///
    /// # Returns
    ///
    /// * `Ok(Admission)` - A slot, released when dropped
    /// * `Err(AcquireError)` - The gate was closed
    pub async fn admit(&self) -> Result<Admission, AcquireError> {
        let permit = self.global_semaphore.clone().acquire_owned().await?;
        tracing::trace!(in_flight = self.in_flight(), "Request admitted");
        Ok(Admission { _permit: permit })
    }

    /// Maximum number of concurrent requests
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of requests currently holding a slot
    pub fn in_flight(&self) -> usize {
        self.capacity - self.global_semaphore.available_permits()
    }
}
