//! The session's full, unfiltered record collection.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{info, warn};

use crate::contract::ContractRecord;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordStoreError {
    #[error("duplicate contract id: {0}")]
    DuplicateId(String),
}

/// Read-only, insertion-ordered collection of contracts with an id index.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<ContractRecord>,
    by_id: HashMap<String, usize>,
}

impl RecordStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and index a freshly loaded collection.
    ///
    /// Ids must be unique. Out-of-range clause confidences and evidence
    /// relevances are clamped into `[0, 1]`.
    pub fn from_records(mut records: Vec<ContractRecord>) -> Result<Self, RecordStoreError> {
        let mut by_id = HashMap::with_capacity(records.len());
        for (idx, record) in records.iter_mut().enumerate() {
            if by_id.insert(record.id.clone(), idx).is_some() {
                return Err(RecordStoreError::DuplicateId(record.id.clone()));
            }
            let clamped = record.clamp_scores();
            if clamped > 0 {
                warn!(id = %record.id, clamped, "clamped out-of-range scores");
            }
        }
        info!(count = records.len(), "record store populated");
        Ok(Self { records, by_id })
    }

    pub fn records(&self) -> &[ContractRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ContractRecord> {
        self.by_id.get(id).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
