pub mod agent;
pub mod config;
pub mod error;
pub mod jsonrpc;
pub mod oracle;
pub mod rpc;
pub mod scheduler;
pub mod types;

pub use agent::Agent;
pub use error::{GasTriggerError, Result};
pub use jsonrpc::{BatchItem, JsonRpcError, RpcErrorField, RpcRequest, RpcResponse, find_response};
pub use types::{Configuration, GasPrice, GasPricedTransaction, GasTier, SignedTx};

// Re-export commonly used items
pub use config::{AgentSettings, ConfigSource, FileConfigSource};
pub use oracle::{GasPriceMonitor, PriceReader, UNKNOWN_PRICE};
pub use rpc::{IdGenerator, RawReply, RpcClient};
pub use scheduler::{BroadcastObserver, CycleReport, Scheduler, SubmittedSet};
