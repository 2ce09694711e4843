//! Cross-component signals.
//!
//! The store never talks to the pill directly. When it wants the comparison
//! opened it publishes on the bus, and whoever subscribed reacts.

use tokio::sync::broadcast;
use tracing::debug;

const BUS_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Open the full comparison panel. Carries no payload.
    OpenComparison,
}

#[derive(Debug, Clone)]
pub struct SignalBus {
    tx: broadcast::Sender<Signal>,
}

impl SignalBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Publishes `signal` and returns how many subscribers will see it.
    pub fn publish(&self, signal: Signal) -> usize {
        match self.tx.send(signal) {
            Ok(receivers) => receivers,
            Err(_) => {
                debug!("{signal:?} published with no subscribers");
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Signal> {
        self.tx.subscribe()
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}
