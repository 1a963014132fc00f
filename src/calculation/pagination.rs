//! Fixed-size pagination shared by every paged read.

use crate::models::PageInfo;

/// Number of items on a full page.
pub const PAGE_SIZE: usize = 10;

/// A validated, 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest(u32);

impl PageRequest {
    /// Wraps a page number, treating 0 as the first page.
    pub fn new(page: u32) -> Self {
        Self(page.max(1))
    }

    /// Parses the raw `page` query parameter.
    ///
    /// Absent, non-numeric and non-positive values fall back to page 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::PageRequest;
    ///
    /// assert_eq!(PageRequest::parse(Some("3")).number(), 3);
    /// assert_eq!(PageRequest::parse(Some("abc")).number(), 1);
    /// assert_eq!(PageRequest::parse(None).number(), 1);
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<u32>().ok())
            .map(Self::new)
            .unwrap_or_default()
    }

    /// The 1-based page number.
    pub fn number(self) -> u32 {
        self.0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self(1)
    }
}

/// The item range a page covers within a collection of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: PageRequest,
    total_items: usize,
    start: usize,
    end: usize,
}

impl PageWindow {
    /// Returns the items of `items` that fall on this page.
    ///
    /// A page past the end yields an empty slice.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let end = self.end.min(items.len());
        let start = self.start.min(end);
        &items[start..end]
    }

    /// Returns the page position for the response envelope.
    pub fn info(&self) -> PageInfo {
        PageInfo {
            current_page: self.page.number(),
            total_items: self.total_items,
            total_pages: self.total_items.div_ceil(PAGE_SIZE),
        }
    }
}

/// Computes the window of `page` over a collection of `total_items` items.
pub fn paginate(total_items: usize, page: PageRequest) -> PageWindow {
    let start = (page.number() as usize - 1).saturating_mul(PAGE_SIZE);
    let end = start.saturating_add(PAGE_SIZE).min(total_items);
    PageWindow {
        page,
        total_items,
        start,
        end,
    }
}
