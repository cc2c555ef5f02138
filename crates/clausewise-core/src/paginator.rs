//! Fixed-size pagination over a projected view.
//!
//! Pages are 1-indexed. Every request is clamped into `[1, total_pages]`
//! rather than rejected, and an empty view still has one (empty) page.

use std::ops::Range;

/// Rows per page on the contracts list.
pub const PAGE_SIZE: usize = 10;

/// Current-page state. The view length is supplied on each call so the
/// paginator never holds a stale count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page size must be positive");
        Self {
            current_page: 1,
            page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// `max(1, ceil(len / page_size))`.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Jump to `page`, clamped into range. Returns the page landed on.
    pub fn go_to_page(&mut self, page: usize, len: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages(len));
        self.current_page
    }

    pub fn next(&mut self, len: usize) -> usize {
        self.go_to_page(self.current_page.saturating_add(1), len)
    }

    pub fn previous(&mut self, len: usize) -> usize {
        self.go_to_page(self.current_page.saturating_sub(1), len)
    }

    /// Back to page 1; called whenever the projected view is recomputed.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.current_page < self.total_pages(len)
    }

    /// Half-open index range of the current page within a view of `len` rows.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let page = self.current_page.min(self.total_pages(len));
        let start = ((page - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    /// The current page's rows.
    pub fn slice<'v, T>(&self, view: &'v [T]) -> &'v [T] {
        &view[self.visible_range(view.len())]
    }
}
