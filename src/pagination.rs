// src/pagination.rs
use serde::Serialize;

/// Feed pages always hold ten posts.
pub const POSTS_PER_PAGE: i64 = 10;

/// Page math for the feed routes. Requested pages are forgiving the way
/// the frontend expects: a missing or invalid page falls back to the first
/// page, a page past the end clamps to the last one.
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    total: i64,
    per_page: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageMeta {
    pub number: i64,
    pub num_pages: i64,
    pub total: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl Paginator {
    pub fn new(total: i64, per_page: i64) -> Self {
        Paginator { total, per_page }
    }

    /// An empty result set still has one (empty) page.
    pub fn num_pages(&self) -> i64 {
        if self.total <= 0 {
            return 1;
        }
        (self.total + self.per_page - 1) / self.per_page
    }

    pub fn get_page(&self, requested: Option<i64>) -> i64 {
        let page = match requested {
            Some(p) if p >= 1 => p,
            _ => 1,
        };
        page.min(self.num_pages())
    }

    pub fn offset(&self, page: i64) -> i64 {
        (page - 1) * self.per_page
    }

    pub fn meta(&self, page: i64) -> PageMeta {
        PageMeta {
            number: page,
            num_pages: self.num_pages(),
            total: self.total,
            has_next: page < self.num_pages(),
            has_previous: page > 1,
        }
    }
}
