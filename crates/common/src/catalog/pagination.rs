//! Page-number pagination over a counted result set
//!
//! Pages are 1-based. An empty result set still has one (empty) page, so a
//! filter that matches nothing answers page 1 with no results instead of an
//! error.

use crate::errors::{AppError, Result};
use std::fmt;

/// The page a client asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Explicit page number as sent; may be out of range
    Number(i64),
    /// The last page, whatever its number
    Last,
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::Number(1)
    }
}

impl PageRequest {
    /// Parse the raw `page` query parameter; absent or blank means page 1
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(PageRequest::default());
        };

        if raw == "last" {
            return Ok(PageRequest::Last);
        }

        if let Ok(number) = raw.parse::<i64>() {
            return Ok(PageRequest::Number(number));
        }

        // An integer beyond i64 is still a page number, just out of range
        let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            let saturated = if raw.starts_with('-') { i64::MIN } else { i64::MAX };
            return Ok(PageRequest::Number(saturated));
        }

        Err(AppError::Validation {
            message: format!("Page '{}' is not an integer", raw),
            field: Some("page".to_string()),
        })
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageRequest::Number(n) => write!(f, "{}", n),
            PageRequest::Last => f.write_str("last"),
        }
    }
}

/// Splits `count` items into pages of `per_page`
#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    count: u64,
    per_page: u64,
}

impl Paginator {
    pub fn new(count: u64, per_page: u64) -> Self {
        Self { count, per_page: per_page.max(1) }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Total pages; never zero
    pub fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page)
        }
    }

    /// Resolve a request to a concrete page, rejecting out-of-range numbers
    pub fn page(&self, request: PageRequest) -> Result<Page> {
        let number = match request {
            PageRequest::Last => self.num_pages(),
            PageRequest::Number(n) if n < 1 => {
                return Err(AppError::PageNotFound {
                    page: request.to_string(),
                    reason: "That page number is less than 1".to_string(),
                });
            }
            PageRequest::Number(n) => n as u64,
        };

        if number > self.num_pages() {
            return Err(AppError::PageNotFound {
                page: request.to_string(),
                reason: "That page contains no results".to_string(),
            });
        }

        Ok(Page {
            number,
            num_pages: self.num_pages(),
            count: self.count,
            per_page: self.per_page,
        })
    }
}

/// A validated page within a paginated result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
}

impl Page {
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    pub fn previous(&self) -> Option<u64> {
        (self.number > 1).then(|| self.number - 1)
    }

    pub fn next(&self) -> Option<u64> {
        (self.number < self.num_pages).then(|| self.number + 1)
    }
}
