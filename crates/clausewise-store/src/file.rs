//! `contracts.json` on the local filesystem.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use clausewise_core::ContractRecord;
use tracing::info;

use crate::source::{Latency, RecordSource, pause};
use crate::{LoadError, StoreError};

/// Reads a JSON array of contract records from disk on every request.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    latency: Latency,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Latency::NONE,
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<ContractRecord>, LoadError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::FileNotFound(self.path.clone())
            } else {
                LoadError::Io {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;
        let records: Vec<ContractRecord> = serde_json::from_slice(&bytes)?;
        info!(path = %self.path.display(), count = records.len(), "read contracts file");
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn load_all(&self) -> Result<Vec<ContractRecord>, LoadError> {
        pause(self.latency.list).await;
        self.read().await
    }

    async fn find_by_id(&self, id: &str) -> Result<ContractRecord, StoreError> {
        pause(self.latency.lookup).await;
        self.read()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
