//! Directory-mode load and save on top of a [`StorageBackend`].

use super::backend::StorageBackend;
use super::StoredBook;
use crate::error::{BookError, Result};
use crate::index::IndexRecord;
use crate::model::Page;
use std::io::Cursor;

pub struct DirectoryStore<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> DirectoryStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Reads the index and then every page it lists, stopping after
    /// `page_limit` pages if one is given.
    ///
    /// Only pages named by the index are read. Indexes older than version 4
    /// name no pages, so such a book comes back without pages.
    pub fn load(&self, page_limit: Option<usize>) -> Result<StoredBook> {
        if !self.backend.is_available() {
            return Err(BookError::Load(format!(
                "No such directory: {}",
                self.backend.location()
            )));
        }
        let index = IndexRecord::decode(&mut Cursor::new(self.backend.read_index()?))?;
        if index.page_ids.is_empty() && index.page_count > 0 {
            log::warn!(
                "Index at {} lists {} pages without ids; they cannot be located",
                self.backend.location(),
                index.page_count
            );
        }

        let limit = page_limit.unwrap_or(usize::MAX);
        let mut pages = Vec::new();
        for id in index.page_ids.iter().take(limit) {
            let bytes = self.backend.read_page(id)?;
            let page = Page::read_from(&mut Cursor::new(bytes))?;
            if page.id() != *id {
                return Err(BookError::Malformed(format!(
                    "page file {id} holds page {}",
                    page.id()
                )));
            }
            log::debug!("Loaded book page {id}");
            pages.push(page);
        }
        Ok(StoredBook { index, pages })
    }

    /// Writes the index, then only the pages flagged as modified. Returns the
    /// number of page records written.
    ///
    /// Page records of pages no longer in the book are left in place.
    pub fn save(&self, index: &IndexRecord, pages: &[Page]) -> Result<usize> {
        self.backend.prepare()?;

        let mut buf = Vec::new();
        index.encode(&mut buf)?;
        self.backend.write_index(&buf)?;

        let mut written = 0;
        for page in pages.iter().filter(|p| p.is_modified()) {
            buf.clear();
            page.write_to(&mut buf)?;
            self.backend.write_page(&page.id(), &buf)?;
            log::debug!("Saved book page {}", page.id());
            written += 1;
        }
        Ok(written)
    }
}
