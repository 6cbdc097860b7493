use std::{collections::HashSet, sync::Arc};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{
    Configuration, GasTier, Result, SignedTx,
    config::{AgentSettings, ConfigSender, ConfigSource},
    oracle::PriceReader,
    rpc::{RawReply, RpcClient},
    scheduler::{BroadcastObserver, SubmittedSet},
};

pub const SEND_RAW_TRANSACTION: &str = "eth_sendRawTransaction";

/// What one evaluation pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Price seen at the start of the cycle
    pub price: GasTier,
    pub attempted: usize,
    pub submitted: Vec<SignedTx>,
    pub failed: Vec<SignedTx>,
}

/// The broadcast control loop.
///
/// Owns the submitted set and the write side of the live configuration, so
/// neither needs a lock. The price is only ever read here.
pub struct Scheduler<S> {
    source: S,
    config: ConfigSender,
    price: PriceReader,
    submitted: SubmittedSet,
    client: Option<RpcClient>,
    observer: Option<Arc<dyn BroadcastObserver>>,
    settings: AgentSettings,
}

impl<S: ConfigSource> Scheduler<S> {
    pub fn new(source: S, config: ConfigSender, price: PriceReader, settings: AgentSettings) -> Self {
        Self {
            source,
            config,
            price,
            submitted: SubmittedSet::new(),
            client: None,
            observer: None,
            settings,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn BroadcastObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn submitted(&self) -> &SubmittedSet {
        &self.submitted
    }

    pub fn config(&self) -> Arc<Configuration> {
        self.config.borrow().clone()
    }

    /// Re-reads the source. A failed load keeps the previous configuration.
    /// Returns whether the configuration changed.
    pub async fn reload_config(&mut self) -> bool {
        match self.source.load().await {
            Ok(next) => {
                if *self.config() == next {
                    return false;
                }
                tracing::info!(
                    source = %self.source.describe(),
                    config = ?next,
                    "Config read"
                );
                self.config.send_replace(Arc::new(next));
                true
            }
            Err(e) => {
                tracing::warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "Config reload failed, keeping previous config"
                );
                false
            }
        }
    }

    /// Evaluates every group against the freshest price and broadcasts the
    /// blobs that are due and not yet submitted. Blobs that fail stay
    /// eligible for the next cycle.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let config = self.config();
        let mut report = CycleReport {
            price: self.price.latest(),
            ..Default::default()
        };
        let mut attempted_this_cycle: HashSet<&str> = HashSet::new();

        for group in &config.gas_priced_transactions {
            let price = self.price.latest();
            if !group.is_eligible(price) {
                continue;
            }

            for signed_tx in &group.signed_txs {
                if self.submitted.contains(signed_tx) || !attempted_this_cycle.insert(signed_tx) {
                    continue;
                }
                report.attempted += 1;

                match self.broadcast(&config.eth_node_url, signed_tx).await {
                    Ok(reply) => {
                        self.submitted.insert(signed_tx.clone());
                        report.submitted.push(signed_tx.clone());
                        tracing::info!(
                            gas_price = price,
                            threshold = group.gas_price,
                            tx_hash = reply.tx_hash().unwrap_or("unknown"),
                            response = %reply.body,
                            "Transaction broadcast"
                        );
                        if let Some(observer) = &self.observer {
                            observer.on_broadcast(signed_tx, &reply).await;
                        }
                    }
                    Err(e) => {
                        report.failed.push(signed_tx.clone());
                        tracing::warn!(
                            gas_price = price,
                            threshold = group.gas_price,
                            error = %e,
                            "Broadcast failed, will retry next cycle"
                        );
                    }
                }
            }
        }

        report
    }

    /// Reload, evaluate, sleep; until cancelled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        loop {
            self.reload_config().await;
            let report = self.run_cycle().await;
            tracing::debug!(
                gas_price = report.price,
                attempted = report.attempted,
                submitted = report.submitted.len(),
                failed = report.failed.len(),
                "Cycle finished"
            );

            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.settings.poll_interval) => {}
            }
        }

        tracing::debug!(submitted = self.submitted.len(), "Scheduler stopped");
    }

    async fn broadcast(&mut self, node_url: &Url, signed_tx: &str) -> Result<RawReply> {
        let client = self.client_for(node_url);
        let request =
            client.build_unique_request(SEND_RAW_TRANSACTION, vec![Value::String(signed_tx.to_string())]);
        client.call_raw(&request).await?.accepted(&request)
    }

    /// Reuses the client while the node URL is unchanged.
    fn client_for(&mut self, node_url: &Url) -> &RpcClient {
        if self.client.as_ref().is_some_and(|client| client.url() != node_url) {
            self.client = None;
        }
        let timeout = self.settings.rpc_call_timeout;
        self.client
            .get_or_insert_with(|| RpcClient::new(node_url.clone(), timeout))
    }
}
