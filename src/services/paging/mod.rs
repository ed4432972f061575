//! Incremental rendering of long result lists.
//!
//! The visible part of a list is a growing prefix: one page at first, one
//! more page each time the viewer scrolls near the end. Replacing the list
//! starts over from the first page with the scroll position at the top.

/// The first `page_size * current_page` items (or all of them, if fewer)
pub fn window<T>(items: &[T], page_size: usize, current_page: usize) -> &[T] {
    let end = page_size.saturating_mul(current_page).min(items.len());
    &items[..end]
}

/// Number of pages needed for `len` items; at least 1, even when empty
pub fn last_page(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// A list with a growing visible prefix
#[derive(Debug, Clone, PartialEq)]
pub struct PagedView<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
    scroll_top: u32,
}

impl<T: PartialEq> PagedView<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            current_page: 1,
            scroll_top: 0,
        }
    }

    pub fn with_items(page_size: usize, items: Vec<T>) -> Self {
        let mut view = Self::new(page_size);
        view.items = items;
        view
    }

    /// Replace the list. When the content differs, paging and scroll reset.
    /// Returns whether anything changed.
    pub fn set_items(&mut self, items: Vec<T>) -> bool {
        if items == self.items {
            return false;
        }
        self.items = items;
        self.reset();
        true
    }

    /// Back to the first page, scrolled to the top
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.scroll_top = 0;
    }

    /// Reveal one more page. Stops at the last page; returns whether the
    /// visible prefix grew.
    pub fn advance(&mut self) -> bool {
        if self.current_page >= self.last_page() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Called when the viewer scrolls close to the end of the visible items
    pub fn on_scrolled_near_end(&mut self) -> bool {
        let advanced = self.advance();
        if advanced {
            log::trace!(
                "Revealed page {}/{} ({} items visible)",
                self.current_page,
                self.last_page(),
                self.visible().len()
            );
        }
        advanced
    }

    pub fn visible(&self) -> &[T] {
        window(&self.items, self.page_size, self.current_page)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn last_page(&self) -> usize {
        last_page(self.items.len(), self.page_size)
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.last_page()
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    pub fn set_scroll_top(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top;
    }
}
