//! Page slicing with a bounded window of page links

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Page size used when none (or a non-positive one) is requested.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 99;

/// Number of page links in one navigation window.
pub const PAGE_WINDOW_SIZE: usize = 10;

/// Sanitized page request.
///
/// Construction never fails: out-of-range values are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Build a request from raw, possibly hostile, integers.
    ///
    /// A page size below 1 falls back to [`DEFAULT_PAGE_SIZE`], one above
    /// [`MAX_PAGE_SIZE`] is capped. A page below 1 becomes 1.
    pub fn new(page: i64, page_size: i64) -> Self {
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            usize::try_from(page_size)
                .unwrap_or(MAX_PAGE_SIZE)
                .min(MAX_PAGE_SIZE)
        };
        let page = usize::try_from(page.max(1)).unwrap_or(usize::MAX);

        Self { page, page_size }
    }

    /// Build a request from optional query parameters.
    pub fn from_params(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self::new(
            page.unwrap_or(1),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        )
    }

    /// Build a request from untyped query-string values.
    ///
    /// Blank or non-numeric values count as absent; integers too large for
    /// `i64` saturate before clamping.
    pub fn from_query(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self::from_params(
            page.and_then(parse_param),
            page_size.and_then(parse_param),
        )
    }

    /// Requested page (1-based), before clamping to the page count.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

fn parse_param(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let saturated = if negative { i64::MIN } else { i64::MAX };
    Some(raw.parse().unwrap_or(saturated))
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Block of consecutive page numbers shown by navigation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// Window of [`PAGE_WINDOW_SIZE`] pages holding `page`.
    ///
    /// Pages are grouped in fixed blocks (1-10, 11-20, ...); the last block is
    /// cut at `total_pages`.
    pub fn around(page: usize, total_pages: usize) -> Self {
        let start = ((page.max(1) - 1) / PAGE_WINDOW_SIZE) * PAGE_WINDOW_SIZE + 1;
        let end = (start + PAGE_WINDOW_SIZE - 1).min(total_pages.max(1));
        Self { start, end }
    }

    pub fn contains(&self, page: usize) -> bool {
        self.pages().contains(&page)
    }

    pub fn pages(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// One page of an ordered result plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page after clamping to `1..=total_pages`.
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    /// Never zero, so page selectors always have a page to show.
    pub total_pages: usize,
    pub window: PageWindow,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    /// Convert the items while keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            window: self.window,
            has_previous: self.has_previous,
            has_next: self.has_next,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice an already ordered sequence into the requested page.
pub fn paginate<T>(ordered: Vec<T>, request: PageRequest) -> Page<T> {
    let page_size = request.page_size();
    let total_count = ordered.len();
    let total_pages = total_count.div_ceil(page_size).max(1);

    // Clamp before computing the offset.
    let page = request.page().min(total_pages);
    let offset = (page - 1) * page_size;

    let items: Vec<T> = ordered.into_iter().skip(offset).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_count,
        total_pages,
        window: PageWindow::around(page, total_pages),
        has_previous: page > 1,
        has_next: page < total_pages,
    }
}
