//! Gate that parks the frame pipeline while nobody is watching.
//!
//! [`WatchGate`] wraps a [`tokio::sync::watch`] channel holding a single
//! boolean: "at least one viewer is connected". The frame pump awaits
//! [`WatchGate::watched`] before reading each frame, so the frame source
//! sits idle whenever the viewer count is zero.

use tokio::sync::watch;

/// Shared watched/unwatched flag.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone)]
pub struct WatchGate {
    sender: watch::Sender<bool>,
}

impl WatchGate {
    /// Creates a gate in the unwatched state.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self { sender }
    }

    /// Sets the watched flag. Waiters are only woken on actual changes.
    pub fn set_watched(&self, watched: bool) {
        self.sender.send_if_modified(|current| {
            if *current == watched {
                false
            } else {
                *current = watched;
                true
            }
        });
    }

    /// Returns the current state of the flag.
    #[must_use]
    pub fn is_watched(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once at least one viewer is watching.
    ///
    /// Returns immediately if the flag is already set.
    pub async fn watched(&self) {
        let mut receiver = self.sender.subscribe();
        // wait_for can only fail when the sender is dropped, and we
        // hold the sender.
        let _ = receiver.wait_for(|watched| *watched).await;
    }
}

impl Default for WatchGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn starts_unwatched() {
        let gate = WatchGate::new();
        assert!(!gate.is_watched());
    }

    #[test]
    fn set_watched_flips_flag() {
        let gate = WatchGate::new();
        gate.set_watched(true);
        assert!(gate.is_watched());
        gate.set_watched(false);
        assert!(!gate.is_watched());
    }

    #[test]
    fn watched_resolves_when_already_open() {
        let gate = WatchGate::new();
        gate.set_watched(true);
        tokio_test::block_on(gate.watched());
    }

    #[tokio::test]
    async fn watched_resolves_after_open() {
        let gate = WatchGate::new();
        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.watched().await })
        };
        gate.set_watched(true);
        let Ok(()) = waiter.await else {
            panic!("waiter task failed");
        };
    }
}
