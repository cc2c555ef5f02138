//! Apply a predicate to the record store.
//!
//! The projection is the ordered subsequence of records that satisfy the
//! predicate. Relative order is the store's insertion order; nothing is
//! re-sorted.

use crate::contract::ContractRecord;
use crate::filter::Predicate;

/// Indices into the source slice of every record the predicate admits.
pub fn project_indices(records: &[ContractRecord], predicate: &Predicate<'_>) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| predicate.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowed view of every record the predicate admits.
pub fn project<'r>(records: &'r [ContractRecord], predicate: &Predicate<'_>) -> Vec<&'r ContractRecord> {
    records.iter().filter(|r| predicate.matches(r)).collect()
}
