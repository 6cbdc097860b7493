use std::time::Duration;

/// Timing knobs for the two loops and their network calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSettings {
    /// Pause between broadcast evaluation cycles
    pub poll_interval: Duration,
    /// Pause between oracle refreshes
    pub price_interval: Duration,
    /// Deadline for one oracle request
    pub price_fetch_timeout: Duration,
    /// Deadline for one broadcast call, so a hung node cannot stall a cycle
    pub rpc_call_timeout: Duration,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(60),
            price_interval: Duration::from_secs(60),
            price_fetch_timeout: Duration::from_secs(20),
            rpc_call_timeout: Duration::from_secs(30),
        }
    }
}

impl AgentSettings {
    pub fn from_secs(poll: u64, price: u64, price_timeout: u64, rpc_timeout: u64) -> Self {
        Self {
            poll_interval: Duration::from_secs(poll),
            price_interval: Duration::from_secs(price),
            price_fetch_timeout: Duration::from_secs(price_timeout),
            rpc_call_timeout: Duration::from_secs(rpc_timeout),
        }
    }
}
