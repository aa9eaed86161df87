//! Page data and page-window arithmetic.

use crate::constants::PAGE_SIZE_OPTIONS;

/// Page numbers (1-indexed) shown as buttons around `current`.
///
/// The window sticks to the first pages while `current <= 3` and to the
/// last ones once `current >= total - 2`; in between it starts two pages
/// before `current`. These thresholds stay fixed whatever the window size,
/// and the window never runs past `total`.
pub fn compute_page_window(current: usize, total: usize, window: usize) -> Vec<usize> {
    if window == 0 {
        return Vec::new();
    }
    if total <= window {
        return (1..=total).collect();
    }

    let start = if current <= 3 {
        1
    } else if current >= total.saturating_sub(2) {
        total - window + 1
    } else {
        current - 2
    };
    (start..start + window).take_while(|page| *page <= total).collect()
}

/// Allowed page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    Twenty,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [PageSize::Five, PageSize::Ten, PageSize::Twenty, PageSize::Fifty];

    pub fn as_usize(self) -> usize {
        match self {
            PageSize::Five => PAGE_SIZE_OPTIONS[0],
            PageSize::Ten => PAGE_SIZE_OPTIONS[1],
            PageSize::Twenty => PAGE_SIZE_OPTIONS[2],
            PageSize::Fifty => PAGE_SIZE_OPTIONS[3],
        }
    }

    /// The next larger size, wrapping back to the smallest.
    pub fn next(self) -> PageSize {
        match self {
            PageSize::Five => PageSize::Ten,
            PageSize::Ten => PageSize::Twenty,
            PageSize::Twenty => PageSize::Fifty,
            PageSize::Fifty => PageSize::Five,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = usize;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|page_size| page_size.as_usize() == size)
            .ok_or(size)
    }
}

/// One page of rows as delivered by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePage<R> {
    pub rows: Vec<R>,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-indexed.
    pub current_page: usize,
    pub page_size: usize,
}

impl<R> TablePage<R> {
    pub fn new(rows: Vec<R>, total_items: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            rows,
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1)),
            current_page,
            page_size,
        }
    }

    pub fn empty(page_size: usize) -> Self {
        Self::new(Vec::new(), 0, 1, page_size)
    }

    /// Force the page into a consistent shape: at least one page, and the
    /// current page within `[1, total_pages]`.
    pub fn clamped(mut self) -> Self {
        self.total_pages = self.total_pages.max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages);
        self
    }
}

impl<R: Clone> TablePage<R> {
    /// Cut page `page` out of a full in-memory dataset. Out of range pages
    /// are clamped.
    pub fn from_slice(all: &[R], page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = all.len().div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * page_size;
        let rows = all.iter().skip(start).take(page_size).cloned().collect();
        Self::new(rows, all.len(), page, page_size).clamped()
    }
}
