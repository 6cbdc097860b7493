use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{Configuration, GasTriggerError, Result};

/// Where the scheduler re-reads its configuration from on every cycle.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn load(&self) -> Result<Configuration>;

    /// Human readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// A JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn load(&self) -> Result<Configuration> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            GasTriggerError::Config(format!("cannot read {}: {e}", self.path.display()))
        })?;
        parse_config(&content)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn parse_config(content: &str) -> Result<Configuration> {
    serde_json::from_str(content).map_err(|e| GasTriggerError::Config(e.to_string()))
}
