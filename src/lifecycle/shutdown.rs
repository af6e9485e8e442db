//! Shutdown coordination.
//!
//! `main` owns one [`Shutdown`]; the HTTP server holds a receiver and
//! stops accepting connections once it fires, draining in-flight requests.

use tokio::sync::broadcast;

/// One-shot stop signal fanned out to the server and any test harness.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver to pass to `HttpServer::run`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. A no-op when nobody is listening anymore.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Receivers still alive, i.e. servers that have not yet stopped.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
