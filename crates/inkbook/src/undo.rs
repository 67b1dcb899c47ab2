//! Undo/redo of structural changes.
//!
//! [`UndoHistory`] is a [`MutationListener`] that records each insert or
//! removal and applies it on the spot. It is a cheap handle: keep one clone
//! and attach another to the book.
//!
//! ```
//! use inkbook::{Book, UndoHistory};
//!
//! let history = UndoHistory::new();
//! let mut book = Book::new("Drafts").with_listener(history.clone());
//! book.update_current_page(|p| p.set_content("first"));
//! book.insert_page_after_current();
//! assert_eq!(book.pages().len(), 2);
//!
//! assert!(history.undo(&mut book));
//! assert_eq!(book.pages().len(), 1);
//! assert!(history.redo(&mut book));
//! assert_eq!(book.pages().len(), 2);
//! ```
//!
//! Steps are recorded per primitive, so an operation that also dropped
//! empty pages takes several undos to revert.

use crate::book::Book;
use crate::listener::MutationListener;
use crate::model::Page;
use crate::pages::PageList;
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug, Clone)]
enum Step {
    Insert { page: Page, position: usize },
    Remove { page: Page, position: usize },
}

#[derive(Debug, Default)]
struct HistoryState {
    undo: Vec<Step>,
    redo: Vec<Step>,
}

#[derive(Debug, Clone, Default)]
pub struct UndoHistory {
    state: Rc<RefCell<HistoryState>>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.state.borrow().undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.state.borrow().redo.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.borrow_mut();
        state.undo.clear();
        state.redo.clear();
    }

    /// Reverts the latest step. Returns false if there is nothing to undo or
    /// the book no longer matches the recorded step.
    pub fn undo(&self, book: &mut Book) -> bool {
        let Some(step) = self.state.borrow_mut().undo.pop() else {
            return false;
        };
        if !revert(&step, book) {
            log::warn!("Dropping undo step that no longer applies");
            return false;
        }
        self.state.borrow_mut().redo.push(step);
        true
    }

    /// Re-applies the latest undone step.
    pub fn redo(&self, book: &mut Book) -> bool {
        let Some(step) = self.state.borrow_mut().redo.pop() else {
            return false;
        };
        if !replay(&step, book) {
            log::warn!("Dropping redo step that no longer applies");
            return false;
        }
        self.state.borrow_mut().undo.push(step);
        true
    }

    fn record(&self, step: Step) {
        let mut state = self.state.borrow_mut();
        state.undo.push(step);
        state.redo.clear();
    }
}

fn insert(book: &mut Book, page: &Page, position: usize) -> bool {
    if book.pages().contains(page.id()) {
        return false;
    }
    let position = position.min(book.pages().len());
    book.add_page(page.clone(), position);
    true
}

fn remove(book: &mut Book, id: Uuid) -> bool {
    match book.pages().position_of(id) {
        Some(position) if book.pages().len() > 1 => {
            book.remove_page(id, position);
            true
        }
        _ => false,
    }
}

fn revert(step: &Step, book: &mut Book) -> bool {
    match step {
        Step::Insert { page, .. } => remove(book, page.id()),
        Step::Remove { page, position } => insert(book, page, *position),
    }
}

fn replay(step: &Step, book: &mut Book) -> bool {
    match step {
        Step::Insert { page, position } => insert(book, page, *position),
        Step::Remove { page, .. } => remove(book, page.id()),
    }
}

impl MutationListener for UndoHistory {
    fn insert_requested(&mut self, pages: &mut PageList, page: Page, position: usize) {
        self.record(Step::Insert {
            page: page.clone(),
            position,
        });
        pages.add_page(page, position);
    }

    fn remove_requested(&mut self, pages: &mut PageList, page_id: Uuid, position: usize) {
        if let Some(page) = pages.page(position).filter(|p| p.id() == page_id) {
            self.record(Step::Remove {
                page: page.clone(),
                position,
            });
        }
        pages.remove_page(page_id, position);
    }
}
