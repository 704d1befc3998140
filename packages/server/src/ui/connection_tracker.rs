//! Tracking of live WebSocket connections for graceful shutdown.
//!
//! Upgraded connections run outside axum's graceful shutdown, so each one
//! holds a `ConnectionGuard` and the server waits for every guard to drop.

use std::time::Duration;

use tokio::sync::mpsc;

/// Held by one connection task until it has finished
#[derive(Debug, Clone)]
pub struct ConnectionGuard {
    _done: mpsc::Sender<()>,
}

/// Waits until every `ConnectionGuard` it handed out has been dropped
#[derive(Debug)]
pub struct ConnectionTracker {
    guard: ConnectionGuard,
    done_rx: mpsc::Receiver<()>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        let (done_tx, done_rx) = mpsc::channel(1);
        Self {
            guard: ConnectionGuard { _done: done_tx },
            done_rx,
        }
    }

    /// Guard for one connection
    pub fn guard(&self) -> ConnectionGuard {
        self.guard.clone()
    }

    /// Wait for every guard to drop, giving up after `timeout`.
    ///
    /// Returns `true` when all connections finished in time.
    pub async fn wait(self, timeout: Duration) -> bool {
        let Self { guard, mut done_rx } = self;
        drop(guard);
        // Nothing is ever sent; `recv` returns `None` once every sender is gone
        tokio::time::timeout(timeout, done_rx.recv()).await.is_ok()
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
