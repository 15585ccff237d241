//! Paging parameters

use kernel::error::app_error::AppResult;
use kernel::error::error_list::{Combine, Outcome};
use kernel::validation::require_range;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    pub fn check_number(number: u32) -> AppResult<u32> {
        require_range("PageNumber", "Page number", number, u32::MAX)
    }

    pub fn check_size(size: u32) -> AppResult<u32> {
        require_range("PageSize", "Page size", size, MAX_PAGE_SIZE)
    }

    pub fn new(number: u32, size: u32) -> Outcome<Self> {
        let (number, size) = (Self::check_number(number), Self::check_size(size)).combine()?;
        Ok(Self { number, size })
    }

    /// Lowers the page size to `max` when it is smaller
    pub fn capped(self, max: u32) -> Self {
        Self {
            size: self.size.min(max.max(1)),
            ..self
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Items to skip
    pub fn offset(&self) -> usize {
        (self.number as usize - 1).saturating_mul(self.size as usize)
    }
}
