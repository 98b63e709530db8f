//! Admission gate for outbound API requests
//!
//! Bounds the number of requests in flight at any moment, independent of
//! the request type. Every request acquires a permit before it is sent and
//! gives it back when the permit is dropped, so the slot is freed on success,
//! on failure, and when the request future is cancelled.
//!
//! The gate is a plain value: create one per run (or per test) and share it
//! via `Arc` with every client that should be bounded by it.

use log::trace;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};

/// Default maximum number of outstanding requests
pub const DEFAULT_MAX_IN_FLIGHT: usize = 100;

/// Counting gate limiting concurrent outbound requests
#[derive(Debug)]
pub struct AdmissionGate {
    semaphore: Semaphore,
    in_flight: AtomicUsize,
    max: usize,
}

impl Default for AdmissionGate {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IN_FLIGHT)
    }
}

impl AdmissionGate {
    /// Create a gate admitting at most `max` requests at once
    ///
    /// A maximum of zero would block forever and is raised to one.
    pub fn new(max: usize) -> Self {
        let max = max.max(1);
        Self {
            semaphore: Semaphore::new(max),
            in_flight: AtomicUsize::new(0),
            max,
        }
    }

    /// Wait until a request slot is free and take it
    ///
    /// The slot is held until the returned permit is dropped.
    pub async fn acquire(&self) -> AdmissionPermit<'_> {
        // The semaphore is owned by the gate and never closed.
        let permit = self
            .semaphore
            .acquire()
            .await
            .expect("admission gate semaphore closed");
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        trace!("Admission granted ({}/{} in flight)", in_flight, self.max);

        AdmissionPermit {
            gate: self,
            _permit: permit,
        }
    }

    /// Number of requests currently holding a permit
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Configured maximum
    pub fn max(&self) -> usize {
        self.max
    }

    fn release(&self) {
        // Floored at zero
        let _ = self
            .in_flight
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_sub(1))
            });
    }
}

/// Scoped admission; releases its slot on drop
#[derive(Debug)]
pub struct AdmissionPermit<'a> {
    gate: &'a AdmissionGate,
    _permit: SemaphorePermit<'a>,
}

impl Drop for AdmissionPermit<'_> {
    fn drop(&mut self) {
        // Runs before the semaphore permit is returned, so the counter
        // never exceeds the maximum.
        self.gate.release();
    }
}
