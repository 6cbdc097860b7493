use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    GasPrice, GasTier, GasTriggerError, Result,
    config::{AgentSettings, ConfigReceiver},
    oracle::PricePublisher,
};

/// Background refresher for the published gas price.
///
/// Best effort: a failed fetch leaves the last price in place and waits for
/// the next tick. There is no backoff and no retry in between.
pub struct GasPriceMonitor {
    client: reqwest::Client,
    config: ConfigReceiver,
    publisher: PricePublisher,
    interval: Duration,
    fetch_timeout: Duration,
}

impl GasPriceMonitor {
    pub fn new(config: ConfigReceiver, publisher: PricePublisher, settings: &AgentSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            publisher,
            interval: settings.price_interval,
            fetch_timeout: settings.price_fetch_timeout,
        }
    }

    /// Queries the oracle named by the current configuration.
    pub async fn fetch(&self) -> Result<GasPrice> {
        let url = self.config.borrow().gas_station_url.clone();
        fetch_gas_price(&self.client, &url, self.fetch_timeout).await
    }

    /// Fetches and publishes. On error nothing is published.
    pub async fn refresh(&self) -> Result<GasTier> {
        let prices = self.fetch().await?;
        let tier = prices.average_tier();
        self.publisher.publish(tier);
        Ok(tier)
    }

    pub async fn refresh_logged(&self) {
        match self.refresh().await {
            Ok(tier) => tracing::info!(gas_price = tier, "Gas price updated"),
            Err(e) => tracing::warn!(error = %e, "Gas price refresh failed, keeping last value"),
        }
    }

    /// Refreshes every `interval` until cancelled. The first refresh happens
    /// one interval from now; callers wanting an eager fetch call
    /// [`refresh`](Self::refresh) first.
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => self.refresh_logged().await,
            }
        }

        tracing::debug!("Gas price monitor stopped");
    }
}

pub async fn fetch_gas_price(client: &reqwest::Client, url: &Url, timeout: Duration) -> Result<GasPrice> {
    let exchange = async {
        let response = client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok::<_, GasTriggerError>((status, body))
    };

    let (status, body) = tokio::time::timeout(timeout, exchange)
        .await
        .map_err(|_| GasTriggerError::Timeout {
            duration_ms: timeout.as_millis() as u64,
        })??;

    if !status.is_success() {
        return Err(GasTriggerError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        });
    }

    serde_json::from_str(&body).map_err(|source| GasTriggerError::Decode {
        source,
        request: format!("GET {url}"),
        body,
    })
}
