//! The contracts list view model.
//!
//! [`ContractList`] owns the record store, the filter state and the
//! paginator, and caches the projected view as indices into the store.
//! Any change to the store or the filters recomputes the projection and
//! sends the paginator back to page 1.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::contract::{ContractRecord, Risk, Status};
use crate::filter::FilterState;
use crate::paginator::Paginator;
use crate::projector::project_indices;
use crate::record_store::RecordStore;

const EMPTY_FILTERED: &str = "Try adjusting your search criteria or filters.";
const EMPTY_PORTFOLIO: &str = "Upload your first contract to get started.";

#[derive(Debug, Clone, Default)]
pub struct ContractList {
    store: RecordStore,
    filters: FilterState,
    paginator: Paginator,
    projection: Vec<usize>,
}

/// One rendered page of the list.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<'a> {
    pub rows: Vec<&'a ContractRecord>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Number of records in the projected view, across all pages.
    pub total: usize,
    /// 1-based, inclusive positions of `rows` within the view; `None` when empty.
    pub showing: Option<RangeInclusive<usize>>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl PageView<'_> {
    /// "Showing 11-20 of 25 contracts".
    pub fn summary(&self) -> String {
        match &self.showing {
            Some(range) => format!(
                "Showing {}-{} of {} contracts",
                range.start(),
                range.end(),
                self.total
            ),
            None => "Showing 0 of 0 contracts".to_string(),
        }
    }
}

impl ContractList {
    pub fn new(store: RecordStore) -> Self {
        let mut list = Self {
            store,
            ..Self::default()
        };
        list.recompute();
        list
    }

    /// Swap in a freshly loaded store. Filters are kept.
    pub fn replace_records(&mut self, store: RecordStore) {
        self.store = store;
        self.recompute();
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filters.search_query = query.into();
        self.recompute();
    }

    pub fn toggle_status(&mut self, status: Status) {
        self.filters.status.toggle(status);
        self.recompute();
    }

    pub fn toggle_risk(&mut self, risk: Risk) {
        self.filters.risk.toggle(risk);
        self.recompute();
    }

    /// Toggle a status given as free text; unknown values never match.
    pub fn toggle_status_raw(&mut self, raw: &str) {
        self.filters.status.toggle_raw(raw);
        self.recompute();
    }

    /// Toggle a risk given as free text; unknown values never match.
    pub fn toggle_risk_raw(&mut self, raw: &str) {
        self.filters.risk.toggle_raw(raw);
        self.recompute();
    }

    /// Replace the whole filter state at once.
    pub fn set_filters(&mut self, filters: FilterState) {
        self.filters = filters;
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.recompute();
    }

    pub fn active_filter_count(&self) -> usize {
        self.filters.active_facet_count()
    }

    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.projection.len())
    }

    /// Number of records in the projected view.
    pub fn filtered_len(&self) -> usize {
        self.projection.len()
    }

    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.paginator.go_to_page(page, self.projection.len())
    }

    pub fn next_page(&mut self) -> usize {
        self.paginator.next(self.projection.len())
    }

    pub fn previous_page(&mut self) -> usize {
        self.paginator.previous(self.projection.len())
    }

    /// The full projected view, in store order.
    pub fn filtered(&self) -> impl Iterator<Item = &ContractRecord> {
        self.projection.iter().map(|&i| &self.store.records()[i])
    }

    pub fn page(&self) -> PageView<'_> {
        let len = self.projection.len();
        let range = self.paginator.visible_range(len);
        let showing = (!range.is_empty()).then(|| range.start + 1..=range.end);
        let rows = self.projection[range]
            .iter()
            .map(|&i| &self.store.records()[i])
            .collect();
        PageView {
            rows,
            current_page: self.paginator.current_page(),
            total_pages: self.paginator.total_pages(len),
            total: len,
            showing,
            has_previous: self.paginator.has_previous(),
            has_next: self.paginator.has_next(len),
        }
    }

    /// Message for an empty view, depending on whether filters caused it.
    pub fn empty_message(&self) -> &'static str {
        if self.filters.is_active() {
            EMPTY_FILTERED
        } else {
            EMPTY_PORTFOLIO
        }
    }

    fn recompute(&mut self) {
        self.projection = project_indices(self.store.records(), &self.filters.predicate());
        self.paginator.reset();
        debug!(
            matched = self.projection.len(),
            total = self.store.len(),
            "projection recomputed"
        );
    }
}
