use serde::{Deserialize, Serialize};

/// Pagination envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub current_page: u32,
    pub per_page: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty(per_page: u32) -> Self {
        Self {
            data: Vec::new(),
            current_page: 1,
            per_page,
            total_count: 0,
            total_pages: 0,
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            current_page: self.current_page.max(1),
            per_page: self.per_page,
            total_count: self.total_count,
            total_pages: self.total_pages,
            loaded: true,
        }
    }
}

/// Client-side pagination cursor.
///
/// Once a page has been absorbed every page it hands out lies in
/// `[1, total_pages]`, and with no pages at all the only reachable page is 1.
/// Before that the page count is unknown, so only the lower bound applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current_page: u32,
    per_page: u32,
    total_count: u64,
    total_pages: u32,
    loaded: bool,
}

impl Pagination {
    pub fn new(per_page: u32) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
            total_count: 0,
            total_pages: 0,
            loaded: false,
        }
    }

    /// Whether any page has been absorbed yet.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn clamp(&self, page: u32) -> u32 {
        if self.loaded {
            page.clamp(1, self.last_page())
        } else {
            page.max(1)
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Page to request for "next"; `None` when already on the last page.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.has_prev().then(|| self.current_page - 1)
    }

    pub fn go_to(&mut self, page: u32) -> u32 {
        self.current_page = self.clamp(page);
        self.current_page
    }

    /// Absorbs the counters from a fetched page. The current page is
    /// re-clamped because deletes can shrink the page count under us.
    pub fn update_from<T>(&mut self, page: &Page<T>) {
        self.total_count = page.total_count;
        self.total_pages = page.total_pages;
        if page.per_page > 0 {
            self.per_page = page.per_page;
        }
        self.loaded = true;
        self.current_page = self.clamp(page.current_page);
    }

    pub fn adjust_count(&mut self, delta: i64) {
        self.total_count = self.total_count.saturating_add_signed(delta);
    }
}
