//! Filter state and the predicate composed from it.
//!
//! A [`Predicate`] is the AND of three independent sub-predicates:
//!
//! - search: blank query, or `name`/`parties` contains the query (case-insensitive)
//! - status: no status selected, or the record's status is selected
//! - risk: no risk selected, or the record's risk is selected

use std::collections::BTreeSet;
use std::str::FromStr;

use crate::contract::{ContractRecord, Risk, Status};

/// Multi-select state for one facet.
///
/// Values that do not parse into `T` are kept in `unrecognised`: they make
/// the facet active but can never match a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetSelection<T: Ord> {
    known: BTreeSet<T>,
    unrecognised: BTreeSet<String>,
}

impl<T: Ord> Default for FacetSelection<T> {
    fn default() -> Self {
        Self {
            known: BTreeSet::new(),
            unrecognised: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Copy + FromStr> FacetSelection<T> {
    /// Select `value` if absent, deselect it if present.
    pub fn toggle(&mut self, value: T) {
        if !self.known.remove(&value) {
            self.known.insert(value);
        }
    }

    /// Toggle a raw facet value, falling back to the unrecognised set.
    pub fn toggle_raw(&mut self, raw: &str) {
        match raw.parse::<T>() {
            Ok(value) => self.toggle(value),
            Err(_) => {
                if !self.unrecognised.remove(raw) {
                    tracing::debug!(value = raw, "selected unrecognised facet value");
                    self.unrecognised.insert(raw.to_string());
                }
            }
        }
    }

    /// Select a raw facet value without ever deselecting it.
    pub fn select_raw(&mut self, raw: &str) {
        match raw.parse::<T>() {
            Ok(value) => {
                self.known.insert(value);
            }
            Err(_) => {
                self.unrecognised.insert(raw.to_string());
            }
        }
    }

    pub fn insert(&mut self, value: T) -> bool {
        self.known.insert(value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.known.contains(value)
    }

    /// An empty selection matches everything.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.unrecognised.is_empty()
    }

    /// Number of selected values, recognised or not.
    pub fn len(&self) -> usize {
        self.known.len() + self.unrecognised.len()
    }

    pub fn clear(&mut self) {
        self.known.clear();
        self.unrecognised.clear();
    }

    pub fn selected(&self) -> impl Iterator<Item = T> + '_ {
        self.known.iter().copied()
    }

    pub fn unrecognised(&self) -> impl Iterator<Item = &str> {
        self.unrecognised.iter().map(String::as_str)
    }

    fn admits(&self, value: &T) -> bool {
        self.is_empty() || self.known.contains(value)
    }
}

/// Search text plus facet selections, as edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_query: String,
    pub status: FacetSelection<Status>,
    pub risk: FacetSelection<Risk>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected facet values (the count shown on the filter toggle).
    pub fn active_facet_count(&self) -> usize {
        self.status.len() + self.risk.len()
    }

    /// Whether anything, search included, narrows the view.
    pub fn is_active(&self) -> bool {
        self.active_facet_count() > 0 || !self.search_query.is_empty()
    }

    pub fn clear(&mut self) {
        self.search_query.clear();
        self.status.clear();
        self.risk.clear();
    }

    /// Compose the predicate for the current state.
    pub fn predicate(&self) -> Predicate<'_> {
        Predicate::compose(self)
    }
}

/// The composed filter predicate.
///
/// Borrows the facet selections; the search needle is lowercased once at
/// composition time.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    needle: Option<String>,
    status: &'a FacetSelection<Status>,
    risk: &'a FacetSelection<Risk>,
}

impl<'a> Predicate<'a> {
    pub fn compose(filters: &'a FilterState) -> Self {
        // A whitespace-only query disables search; otherwise the query is
        // matched as typed, surrounding whitespace included.
        let needle = if filters.search_query.trim().is_empty() {
            None
        } else {
            Some(filters.search_query.to_lowercase())
        };
        Self {
            needle,
            status: &filters.status,
            risk: &filters.risk,
        }
    }

    pub fn matches_search(&self, record: &ContractRecord) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                record.name.to_lowercase().contains(needle.as_str())
                    || record.parties.to_lowercase().contains(needle.as_str())
            }
        }
    }

    pub fn matches_status(&self, record: &ContractRecord) -> bool {
        self.status.admits(&record.status)
    }

    pub fn matches_risk(&self, record: &ContractRecord) -> bool {
        self.risk.admits(&record.risk)
    }

    pub fn matches(&self, record: &ContractRecord) -> bool {
        self.matches_search(record) && self.matches_status(record) && self.matches_risk(record)
    }
}
