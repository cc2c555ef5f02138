//! HTTP record source: fetches `contracts.json` from a static file host.

use async_trait::async_trait;
use clausewise_core::ContractRecord;
use tracing::info;

use crate::source::{Latency, RecordSource, pause};
use crate::{LoadError, StoreError};

/// Fetches `<base_url>/contracts.json` on every request.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
    latency: Latency,
}

impl HttpSource {
    /// `base_url` should be like `http://localhost:5173` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            latency: Latency::NONE,
        }
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn contracts_url(&self) -> String {
        format!("{}/contracts.json", self.base_url)
    }

    async fn fetch(&self) -> Result<Vec<ContractRecord>, LoadError> {
        let url = self.contracts_url();

        info!(url = %url, "fetching contracts");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LoadError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let records: Vec<ContractRecord> = serde_json::from_slice(&bytes)?;
        info!(count = records.len(), "fetched contracts");
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn load_all(&self) -> Result<Vec<ContractRecord>, LoadError> {
        pause(self.latency.list).await;
        self.fetch().await
    }

    async fn find_by_id(&self, id: &str) -> Result<ContractRecord, StoreError> {
        pause(self.latency.lookup).await;
        self.fetch()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let source = HttpSource::new("http://localhost:5173/".into());
        assert_eq!(source.base_url, "http://localhost:5173");
        assert_eq!(source.contracts_url(), "http://localhost:5173/contracts.json");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_load_error() {
        // Port 9 (discard) on loopback is closed on any sane test host.
        let source = HttpSource::new("http://127.0.0.1:9".into());
        let err = source.load_all().await.unwrap_err();
        assert!(matches!(err, LoadError::Http(_)));
    }

    #[tokio::test]
    async fn lookup_waits_for_lookup_latency_only() {
        let source = HttpSource::new("http://127.0.0.1:9".into()).with_latency(Latency {
            list: std::time::Duration::from_secs(30),
            lookup: std::time::Duration::from_millis(20),
        });
        let start = std::time::Instant::now();
        let err = source.find_by_id("ctr-001").await.unwrap_err();
        assert!(matches!(err, StoreError::Load(LoadError::Http(_))));
        assert!(start.elapsed() < std::time::Duration::from_secs(10));
    }
}
