use super::backend::StorageBackend;
use crate::error::{BookError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use uuid::Uuid;

/// In-memory directory-mode backend.
///
/// Uses `RefCell` for interior mutability since a book is single-threaded,
/// so the `StorageBackend` trait can keep `&self` everywhere. Counts writes
/// per page, which is what the partial-save tests look at.
#[derive(Default)]
pub struct MemBackend {
    available: Cell<bool>,
    index: RefCell<Option<Vec<u8>>>,
    pages: RefCell<HashMap<Uuid, Vec<u8>>>,
    page_writes: RefCell<HashMap<Uuid, usize>>,
    index_writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of times the page record `id` was written.
    pub fn page_writes(&self, id: &Uuid) -> usize {
        self.page_writes.borrow().get(id).copied().unwrap_or(0)
    }

    pub fn index_writes(&self) -> usize {
        self.index_writes.get()
    }

    pub fn stored_page_ids(&self) -> Vec<Uuid> {
        self.pages.borrow().keys().copied().collect()
    }

    /// Test helper to plant raw bytes, e.g. a legacy index.
    pub fn put_index(&self, bytes: Vec<u8>) {
        self.available.set(true);
        *self.index.borrow_mut() = Some(bytes);
    }

    pub fn put_page(&self, id: Uuid, bytes: Vec<u8>) {
        self.available.set(true);
        self.pages.borrow_mut().insert(id, bytes);
    }

    fn check_writable(&self) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(BookError::Io(std::io::Error::other("simulated write error")));
        }
        Ok(())
    }
}

impl StorageBackend for MemBackend {
    fn is_available(&self) -> bool {
        self.available.get()
    }

    fn prepare(&self) -> Result<()> {
        self.available.set(true);
        Ok(())
    }

    fn location(&self) -> String {
        "memory://".to_string()
    }

    fn read_index(&self) -> Result<Vec<u8>> {
        self.index.borrow().clone().ok_or_else(|| {
            BookError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no index in memory",
            ))
        })
    }

    fn write_index(&self, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        *self.index.borrow_mut() = Some(bytes.to_vec());
        self.index_writes.set(self.index_writes.get() + 1);
        Ok(())
    }

    fn read_page(&self, id: &Uuid) -> Result<Vec<u8>> {
        self.pages.borrow().get(id).cloned().ok_or_else(|| {
            BookError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no page {id} in memory"),
            ))
        })
    }

    fn write_page(&self, id: &Uuid, bytes: &[u8]) -> Result<()> {
        self.check_writable()?;
        self.pages.borrow_mut().insert(*id, bytes.to_vec());
        *self.page_writes.borrow_mut().entry(*id).or_default() += 1;
        Ok(())
    }
}
