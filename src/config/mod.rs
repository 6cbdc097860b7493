pub mod settings;
pub mod source;

use std::sync::Arc;

use tokio::sync::watch;

use crate::Configuration;

pub use settings::AgentSettings;
pub use source::{ConfigSource, FileConfigSource, parse_config};

/// Live view of the most recently loaded configuration. Only the scheduler writes it.
pub type ConfigReceiver = watch::Receiver<Arc<Configuration>>;
pub type ConfigSender = watch::Sender<Arc<Configuration>>;

pub fn config_channel(initial: Configuration) -> (ConfigSender, ConfigReceiver) {
    watch::channel(Arc::new(initial))
}
