//! # Page Collection and Filtered View
//!
//! [`PageList`] owns the ordered pages of a book, the active filter, the
//! filtered view derived from both, and the current-page cursor.
//!
//! ## Invariants
//!
//! - `pages` is never empty.
//! - `current < pages.len()`. The current page does not have to match the
//!   filter (e.g. right after the filter changed).
//! - The filtered view holds exactly the positions of the pages whose tags
//!   are a superset of the filter, in book order. It is recomputed after
//!   every mutation and never edited on its own.
//!
//! Breaking an invariant through the primitives ([`PageList::add_page`],
//! [`PageList::remove_page`]) is a caller bug and panics.
//!
//! ## Navigation
//!
//! Filtered navigation has two modes. When the current page is in the
//! view, [`PageList::next_page`] / [`PageList::previous_page`] step through
//! the view. When it is not, they scan the full sequence from the cursor for
//! the nearest matching page. Either way the cursor stays put when nothing
//! matches in that direction.

use crate::model::Page;
use crate::tags::TagSet;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct PageList {
    pages: Vec<Page>,
    filter: TagSet,
    /// Positions into `pages` of the pages matching `filter`.
    filtered: Vec<usize>,
    current: usize,
}

impl PageList {
    /// Builds a list from restored state and runs the consistency pass:
    /// an empty sequence gets one blank page carrying the filter tags, the
    /// cursor is clamped into range, and the view is computed.
    pub fn restore(pages: Vec<Page>, filter: TagSet, current: i64) -> Self {
        let mut list = Self {
            pages,
            filter,
            filtered: Vec::new(),
            current: 0,
        };
        if list.pages.is_empty() {
            let mut page = Page::new();
            page.tags_mut().extend_from(&list.filter);
            list.pages.push(page);
        }
        let last = list.pages.len() - 1;
        list.current = usize::try_from(current).map_or(0, |c| c.min(last));
        list.refresh_view();
        list
    }

    /// A single blank page, no filter.
    pub fn new() -> Self {
        Self::restore(Vec::new(), TagSet::new(), 0)
    }

    fn refresh_view(&mut self) {
        let filter = &self.filter;
        self.filtered = self
            .pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.tags().is_superset_of(filter))
            .map(|(i, _)| i)
            .collect();
    }

    fn view_position(&self, position: usize) -> Option<usize> {
        self.filtered.iter().position(|&i| i == position)
    }

    fn touch_from(&mut self, position: usize) {
        for page in self.pages.iter_mut().skip(position) {
            page.touch();
        }
    }

    // --- Filter ---

    pub fn filter(&self) -> &TagSet {
        &self.filter
    }

    /// Replaces the filter and recomputes the view. The cursor never moves.
    pub fn set_filter(&mut self, filter: TagSet) {
        let before = self.current_page().id();
        self.filter = filter;
        self.refresh_view();
        assert_eq!(before, self.current_page().id(), "current page must not change");
    }

    pub fn page_matches_filter(&self, page: &Page) -> bool {
        page.tags().is_superset_of(&self.filter)
    }

    // --- Primitives ---

    /// Inserts `page` at `position` and makes it current.
    ///
    /// # Panics
    ///
    /// If a page with the same id is already in the list, or `position` is
    /// past the end.
    pub fn add_page(&mut self, page: Page, position: usize) {
        assert!(!self.contains(page.id()), "page already in book");
        assert!(
            position <= self.pages.len(),
            "insert position {position} out of range"
        );
        self.pages.insert(position, page);
        self.touch_from(position);
        self.refresh_view();
        self.current = position;
        log::debug!("Added page at {position}, {} pages", self.pages.len());
    }

    /// Removes the page at `position`, which must have id `page_id`.
    ///
    /// The new current page is the next page of the filtered view, else the
    /// previous one, else the structurally next page, else the structurally
    /// previous one.
    ///
    /// # Panics
    ///
    /// If the page at `position` is not `page_id`, or if it is the only
    /// page of the book.
    pub fn remove_page(&mut self, page_id: Uuid, position: usize) {
        assert!(
            self.pages.get(position).map(Page::id) == Some(page_id),
            "page {page_id} is not at position {position}"
        );

        let by_view = self.view_position(position).and_then(|vp| {
            if vp + 1 < self.filtered.len() {
                // shifts down once the page is gone
                Some(self.filtered[vp + 1] - 1)
            } else if vp > 0 {
                Some(self.filtered[vp - 1])
            } else {
                None
            }
        });
        let next_current = match by_view {
            Some(c) => c,
            None if position + 1 < self.pages.len() => position,
            None if position > 0 => position - 1,
            None => panic!("cannot create empty book"),
        };

        self.pages.remove(position);
        self.refresh_view();
        self.touch_from(position);
        self.current = next_current;
        log::debug!("Removed page {position}, current = {next_current}");
    }

    // --- Lookup ---

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Never true for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn page(&self, position: usize) -> Option<&Page> {
        self.pages.get(position)
    }

    pub fn filtered_page(&self, n: usize) -> Option<&Page> {
        self.filtered.get(n).map(|&i| &self.pages[i])
    }

    pub fn page_by_id(&self, id: Uuid) -> Option<&Page> {
        self.pages.iter().find(|p| p.id() == id)
    }

    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.position_of(id).is_some()
    }

    /// True when the page with `id` is part of the filtered view.
    pub fn is_in_view(&self, id: Uuid) -> bool {
        self.position_of(id)
            .is_some_and(|pos| self.view_position(pos).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    pub fn filtered_iter(&self) -> impl Iterator<Item = &Page> {
        self.filtered.iter().map(|&i| &self.pages[i])
    }

    pub fn as_slice(&self) -> &[Page] {
        &self.pages
    }

    /// Edits the page at `position` and recomputes the view, since the edit
    /// may change its tags.
    pub fn update_page<T>(&mut self, position: usize, f: impl FnOnce(&mut Page) -> T) -> Option<T> {
        let page = self.pages.get_mut(position)?;
        let out = f(page);
        self.refresh_view();
        Some(out)
    }

    pub fn update_current_page<T>(&mut self, f: impl FnOnce(&mut Page) -> T) -> T {
        let out = f(&mut self.pages[self.current]);
        self.refresh_view();
        out
    }

    pub(crate) fn mark_all_saved(&mut self) {
        for page in &mut self.pages {
            page.mark_saved();
        }
    }

    /// Ids of the empty pages that may be dropped: never the current page,
    /// and never the last page of the filtered view.
    pub(crate) fn removable_empty_pages(&self) -> Vec<Uuid> {
        let mut left_in_view = self.filtered.len();
        let mut empty = Vec::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i == self.current {
                continue;
            }
            let in_view = self.view_position(i).is_some();
            if in_view && left_in_view <= 1 {
                continue;
            }
            if page.is_empty() {
                empty.push(page.id());
                if in_view {
                    left_in_view -= 1;
                }
            }
        }
        empty
    }

    // --- Cursor ---

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> &Page {
        &self.pages[self.current]
    }

    /// Makes the page with `id` current.
    ///
    /// # Panics
    ///
    /// If the page is not in the list.
    pub fn set_current_page(&mut self, id: Uuid) {
        self.current = self
            .position_of(id)
            .unwrap_or_else(|| panic!("page {id} not in book"));
    }

    pub fn next_page(&mut self) -> &Page {
        let next = match self.view_position(self.current) {
            Some(vp) => self.filtered.get(vp + 1).copied(),
            None => (self.current + 1..self.pages.len())
                .find(|&i| self.page_matches_filter(&self.pages[i])),
        };
        if let Some(i) = next {
            self.current = i;
        }
        self.current_page()
    }

    pub fn previous_page(&mut self) -> &Page {
        let prev = match self.view_position(self.current) {
            Some(vp) if vp > 0 => Some(self.filtered[vp - 1]),
            Some(_) => None,
            None => (0..self.current)
                .rev()
                .find(|&i| self.page_matches_filter(&self.pages[i])),
        };
        if let Some(i) = prev {
            self.current = i;
        }
        self.current_page()
    }

    pub fn next_page_unfiltered(&mut self) -> &Page {
        if self.current + 1 < self.pages.len() {
            self.current += 1;
        }
        self.current_page()
    }

    pub fn previous_page_unfiltered(&mut self) -> &Page {
        self.current = self.current.saturating_sub(1);
        self.current_page()
    }

    /// Jumps to the last page of the filtered view. With an empty view the
    /// cursor stays where it is.
    pub fn last_page(&mut self) -> &Page {
        if let Some(&last) = self.filtered.last() {
            self.current = last;
        }
        self.current_page()
    }

    pub fn last_page_unfiltered(&mut self) -> &Page {
        self.current = self.pages.len() - 1;
        self.current_page()
    }

    pub fn is_first_page(&self) -> bool {
        self.filtered.first() == Some(&self.current)
    }

    pub fn is_last_page(&self) -> bool {
        self.filtered.last() == Some(&self.current)
    }

    pub fn is_first_page_unfiltered(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_page_unfiltered(&self) -> bool {
        self.current + 1 == self.pages.len()
    }
}

impl Default for PageList {
    fn default() -> Self {
        Self::new()
    }
}
