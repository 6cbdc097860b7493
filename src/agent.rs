use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    Result,
    config::{AgentSettings, ConfigSource, config_channel},
    oracle::{GasPriceMonitor, price_channel},
    scheduler::{BroadcastObserver, Scheduler},
};

/// Wires the gas price monitor and the broadcast scheduler together.
///
/// The two only share the price channel (monitor writes, scheduler reads)
/// and the live configuration (scheduler writes, monitor reads).
pub struct Agent<S> {
    monitor: GasPriceMonitor,
    scheduler: Scheduler<S>,
}

impl<S: ConfigSource + 'static> Agent<S> {
    /// Loads the initial configuration. Failing here is the one fatal error.
    pub async fn start(source: S, settings: AgentSettings) -> Result<Self> {
        let initial = source.load().await?;
        tracing::info!(source = %source.describe(), config = ?initial, "Config read");

        let (config_tx, config_rx) = config_channel(initial);
        let (publisher, price) = price_channel();

        Ok(Self {
            monitor: GasPriceMonitor::new(config_rx, publisher, &settings),
            scheduler: Scheduler::new(source, config_tx, price, settings),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn BroadcastObserver>) -> Self {
        self.scheduler = self.scheduler.with_observer(observer);
        self
    }

    /// Fetches the price once, then runs both loops until `shutdown` fires.
    pub async fn run(self, shutdown: CancellationToken) {
        self.monitor.refresh_logged().await;

        let monitor = tokio::spawn(self.monitor.run(shutdown.clone()));
        self.scheduler.run(shutdown).await;

        if let Err(e) = monitor.await {
            tracing::error!(error = %e, "Gas price monitor task failed");
        }
    }
}
