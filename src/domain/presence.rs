//! Lock-free viewer counter.
//!
//! [`PresenceCounter`] tracks how many viewers are currently connected.
//! Increment on connect, decrement on disconnect, never below zero.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counts connected viewers.
///
/// The decrement floors at zero so that unbalanced `leave` calls (a
/// connection torn down twice, a crash between join and leave) can
/// never drive the count negative.
#[derive(Debug, Default)]
pub struct PresenceCounter {
    watching: AtomicU64,
}

impl PresenceCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a viewer joining. Returns the new count.
    pub fn join(&self) -> u64 {
        self.watching.fetch_add(1, Ordering::SeqCst).saturating_add(1)
    }

    /// Records a viewer leaving. Returns the new count, floored at zero.
    pub fn leave(&self) -> u64 {
        match self
            .watching
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                count.checked_sub(1)
            }) {
            Ok(previous) => previous.saturating_sub(1),
            Err(_) => 0,
        }
    }

    /// Returns the current viewer count.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.watching.load(Ordering::SeqCst)
    }
}
