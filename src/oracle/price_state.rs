use tokio::sync::watch;

use crate::GasTier;

/// Published before the first successful fetch. No realistic threshold sits
/// at or above it, so nothing is broadcast on a price that was never observed.
pub const UNKNOWN_PRICE: GasTier = i16::MAX as GasTier;

/// Creates the single-writer price cell shared by the monitor and the scheduler.
pub fn price_channel() -> (PricePublisher, PriceReader) {
    let (tx, rx) = watch::channel(UNKNOWN_PRICE);
    (PricePublisher { tx }, PriceReader { rx })
}

/// Write side, owned by the gas price monitor.
#[derive(Debug)]
pub struct PricePublisher {
    tx: watch::Sender<GasTier>,
}

impl PricePublisher {
    pub fn publish(&self, price: GasTier) {
        // send_replace never fails, even with every reader gone.
        self.tx.send_replace(price);
    }
}

/// Read side. Cloning gives another independent reader.
#[derive(Debug, Clone)]
pub struct PriceReader {
    rx: watch::Receiver<GasTier>,
}

impl PriceReader {
    pub fn latest(&self) -> GasTier {
        *self.rx.borrow()
    }

    pub fn is_known(&self) -> bool {
        self.latest() != UNKNOWN_PRICE
    }

    /// Waits until a value other than the one last seen is published.
    /// Returns `false` once the publisher is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
