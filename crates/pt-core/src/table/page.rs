use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageWindowError {
    #[error("page size must be at least 1")]
    ZeroPageSize,
}

/// Client-side page window over a sorted collection.
///
/// 客户端分页窗口。
///
/// The window is never checked against the collection length: a page past the
/// end simply shows nothing. Callers reset to the first page when the
/// underlying collection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page_index: usize,
    page_size: usize,
}

impl PageWindow {
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Rows-per-page choices offered by list screens.
    pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 15, 20, 25];

    pub fn new(page_index: usize, page_size: usize) -> Result<Self, PageWindowError> {
        if page_size == 0 {
            return Err(PageWindowError::ZeroPageSize);
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_page(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    pub fn first_page(self) -> Self {
        self.with_page(0)
    }

    /// Index of the first row on this page, saturating on overflow.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// The `[offset, offset + size)` range clamped to `len`.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let start = self.offset().min(len);
        let end = start.saturating_add(self.page_size).min(len);
        start..end
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Whether this window shows no rows of a `len`-row collection.
    pub fn is_past_end(&self, len: usize) -> bool {
        self.offset() >= len && self.page_index > 0
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
