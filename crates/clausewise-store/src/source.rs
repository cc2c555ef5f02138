//! The record-source boundary.
//!
//! Sources are asynchronous; the core list logic is handed either a fully
//! validated [`RecordStore`] or the [`LoadError`] that prevented one.

use std::time::Duration;

use async_trait::async_trait;
use clausewise_core::{ContractList, ContractRecord, FilterState, RecordStore};
use tracing::{info, warn};

use crate::{LoadError, StoreError};

#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Every record, in source order.
    async fn load_all(&self) -> Result<Vec<ContractRecord>, LoadError>;

    /// One record by id. Re-reads the source on every call.
    async fn find_by_id(&self, id: &str) -> Result<ContractRecord, StoreError> {
        self.load_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Records whose name or parties contain `query`, case-insensitively.
    async fn search(&self, query: &str) -> Result<Vec<ContractRecord>, LoadError> {
        let filters = FilterState {
            search_query: query.to_string(),
            ..FilterState::default()
        };
        self.filter(&filters).await
    }

    /// Records admitted by the composed predicate for `filters`.
    async fn filter(&self, filters: &FilterState) -> Result<Vec<ContractRecord>, LoadError> {
        let records = self.load_all().await?;
        let predicate = filters.predicate();
        Ok(records.into_iter().filter(|r| predicate.matches(r)).collect())
    }
}

/// Load and validate a full store from `source`.
pub async fn load_store(source: &dyn RecordSource) -> Result<RecordStore, LoadError> {
    let records = source.load_all().await?;
    Ok(RecordStore::from_records(records)?)
}

/// Reload `list` from `source`.
///
/// On failure the list keeps its previous records untouched; retrying is
/// up to the caller. Returns the new record count.
pub async fn refresh(list: &mut ContractList, source: &dyn RecordSource) -> Result<usize, LoadError> {
    match load_store(source).await {
        Ok(store) => {
            let count = store.len();
            list.replace_records(store);
            info!(count, "contract list refreshed");
            Ok(count)
        }
        Err(e) => {
            warn!(error = %e, "contract reload failed; keeping previous records");
            Err(e)
        }
    }
}

/// Artificial latency applied before a source responds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub lookup: Duration,
}

impl Latency {
    pub const NONE: Latency = Latency {
        list: Duration::ZERO,
        lookup: Duration::ZERO,
    };

    /// The delays of the hosted demo: 500 ms list, 300 ms lookup.
    pub fn demo() -> Self {
        Self {
            list: Duration::from_millis(500),
            lookup: Duration::from_millis(300),
        }
    }

    /// The same delay for both operations.
    pub fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            lookup: delay,
        }
    }
}

pub(crate) async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
