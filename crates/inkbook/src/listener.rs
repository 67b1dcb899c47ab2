//! # Mutation Delegation
//!
//! Every structural change a [`Book`](crate::Book) makes on its own (insert,
//! duplicate, delete, empty-page cleanup) goes through its [`MutationSink`].
//!
//! - [`MutationSink::Direct`] applies the primitive right away.
//! - [`MutationSink::Forward`] hands the request to a [`MutationListener`],
//!   typically an undo manager, which becomes responsible for applying it.
//!
//! The listener receives the [`PageList`] alongside each request, so it can
//! record whatever it needs and apply the primitive on the spot. It may also
//! keep the request and apply it later through
//! [`Book::add_page`](crate::Book::add_page) /
//! [`Book::remove_page`](crate::Book::remove_page). Positions are those of
//! the moment the request was made; a listener that defers should resolve
//! removals by page id with [`PageList::position_of`].

use crate::model::Page;
use crate::pages::PageList;
use uuid::Uuid;

pub trait MutationListener {
    /// `page` should be inserted at `position`.
    fn insert_requested(&mut self, pages: &mut PageList, page: Page, position: usize);

    /// The page `page_id`, currently at `position`, should be removed.
    fn remove_requested(&mut self, pages: &mut PageList, page_id: Uuid, position: usize);
}

#[derive(Default)]
pub enum MutationSink {
    #[default]
    Direct,
    Forward(Box<dyn MutationListener>),
}

impl MutationSink {
    pub fn is_direct(&self) -> bool {
        matches!(self, MutationSink::Direct)
    }

    pub(crate) fn add(&mut self, pages: &mut PageList, page: Page, position: usize) {
        match self {
            MutationSink::Direct => pages.add_page(page, position),
            MutationSink::Forward(listener) => listener.insert_requested(pages, page, position),
        }
    }

    pub(crate) fn remove(&mut self, pages: &mut PageList, page_id: Uuid, position: usize) {
        match self {
            MutationSink::Direct => pages.remove_page(page_id, position),
            MutationSink::Forward(listener) => listener.remove_requested(pages, page_id, position),
        }
    }
}

impl std::fmt::Debug for MutationSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationSink::Direct => f.write_str("Direct"),
            MutationSink::Forward(_) => f.write_str("Forward(..)"),
        }
    }
}
