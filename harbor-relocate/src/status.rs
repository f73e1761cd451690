//! Named last-value-wins channels pushing daemon state to the menu UI.
//!
//! Each channel carries the latest value for one state field; subscribers
//! see the current value immediately and every later update. Ordering is
//! only guaranteed within a channel, never across channels.

use std::path::PathBuf;

use tokio::sync::watch;

use harbor_core::ServiceState;

/// One named channel. Backed by a `watch` pair so a slow subscriber only
/// ever observes the most recent value.
#[derive(Debug)]
pub struct StatusChannel<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> StatusChannel<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Replace the channel's value; lossy by design.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Subscribe; the receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    pub fn latest(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// The channels the menu UI subscribes to at mount and drops at teardown.
#[derive(Debug)]
pub struct StatusChannels {
    /// Daemon lifecycle state; drives the indeterminate starting/stopping
    /// indicator.
    pub service: StatusChannel<ServiceState>,
    /// Active repository path, updated after a successful relocation.
    pub repository: StatusChannel<PathBuf>,
}

impl StatusChannels {
    pub fn new(repository: PathBuf) -> Self {
        Self {
            service: StatusChannel::new(ServiceState::Uninitialized),
            repository: StatusChannel::new(repository),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
