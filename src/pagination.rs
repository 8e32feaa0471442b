//! Page arithmetic for country listings.

use crate::mvi::{Intent, Reducer, UiState};

/// One page of a listing. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub current_page: usize,
    pub items_total: usize,
    pub items_per_page: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            current_page: 1,
            items_total: 0,
            items_per_page: 12,
        }
    }
}

impl UiState for Page {}

impl Page {
    /// A page clamped into `1..=page_count` (page 1 when the listing is empty).
    pub fn new(current_page: usize, items_total: usize, items_per_page: usize) -> Self {
        let mut page = Self {
            current_page: 1,
            items_total,
            items_per_page: items_per_page.max(1),
        };
        page.current_page = current_page.clamp(1, page.page_count().max(1));
        page
    }

    pub fn page_count(&self) -> usize {
        self.items_total.div_ceil(self.items_per_page.max(1))
    }

    pub fn is_prev_disabled(&self) -> bool {
        self.current_page == 1 || self.items_total == 0
    }

    pub fn is_next_disabled(&self) -> bool {
        self.current_page == self.page_count() || self.items_total == 0
    }

    /// 1-based inclusive item range shown on this page.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items_total == 0 {
            return None;
        }
        let first = (self.current_page - 1) * self.items_per_page + 1;
        let last = (self.current_page * self.items_per_page).min(self.items_total);
        Some((first, last))
    }

    /// "Showing 13 to 24 of 250 results"; `None` for an empty listing.
    pub fn summary(&self) -> Option<String> {
        self.range().map(|(first, last)| {
            format!(
                "Showing {} to {} of {} results",
                first, last, self.items_total
            )
        })
    }

    /// The items belonging to this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match self.range() {
            Some((first, last)) if first <= items.len() => &items[first - 1..last.min(items.len())],
            _ => &[],
        }
    }

    pub fn prev(&self) -> Option<Page> {
        (!self.is_prev_disabled()).then(|| Page {
            current_page: self.current_page - 1,
            ..*self
        })
    }

    pub fn next(&self) -> Option<Page> {
        (!self.is_next_disabled()).then(|| Page {
            current_page: self.current_page + 1,
            ..*self
        })
    }
}

#[derive(Debug, Clone)]
pub enum PageIntent {
    Next,
    Prev,
    Goto(usize),
    /// The underlying listing changed size (new region, new search).
    Resize { items_total: usize },
}

impl Intent for PageIntent {}

pub struct PageReducer;

impl Reducer for PageReducer {
    type State = Page;
    type Intent = PageIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            PageIntent::Next => state.next().unwrap_or(state),
            PageIntent::Prev => state.prev().unwrap_or(state),
            PageIntent::Goto(page) => Page::new(page, state.items_total, state.items_per_page),
            PageIntent::Resize { items_total } => {
                Page::new(1, items_total, state.items_per_page)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing_disables_both() {
        let page = Page::new(1, 0, 12);
        assert!(page.is_prev_disabled());
        assert!(page.is_next_disabled());
        assert_eq!(page.range(), None);
        assert_eq!(page.summary(), None);
    }

    #[test]
    fn test_last_page_disables_next() {
        let page = Page::new(3, 25, 12);
        assert_eq!(page.page_count(), 3);
        assert!(!page.is_prev_disabled());
        assert!(page.is_next_disabled());
        assert_eq!(page.range(), Some((25, 25)));
        assert_eq!(page.summary().unwrap(), "Showing 25 to 25 of 25 results");
    }

    #[test]
    fn test_first_page_disables_prev() {
        let page = Page::new(1, 25, 12);
        assert!(page.is_prev_disabled());
        assert!(!page.is_next_disabled());
        assert_eq!(page.range(), Some((1, 12)));
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        assert_eq!(Page::new(9, 25, 12).current_page, 3);
        assert_eq!(Page::new(0, 25, 12).current_page, 1);
    }

    #[test]
    fn test_slice_returns_page_items() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(Page::new(2, 25, 12).slice(&items), &items[12..24]);
        assert_eq!(Page::new(3, 25, 12).slice(&items), &[25]);
        assert!(Page::new(1, 0, 12).slice(&items[..0]).is_empty());
    }

    #[test]
    fn test_reducer_walks_pages() {
        let mut page = Page::new(1, 30, 10);
        page = PageReducer::reduce(page, PageIntent::Prev);
        assert_eq!(page.current_page, 1);
        page = PageReducer::reduce(page, PageIntent::Next);
        page = PageReducer::reduce(page, PageIntent::Next);
        page = PageReducer::reduce(page, PageIntent::Next);
        assert_eq!(page.current_page, 3);
        page = PageReducer::reduce(page, PageIntent::Goto(2));
        assert_eq!(page.current_page, 2);
        page = PageReducer::reduce(page, PageIntent::Resize { items_total: 5 });
        assert_eq!(page, Page::new(1, 5, 10));
    }
}
