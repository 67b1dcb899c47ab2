//! # Storage Layer
//!
//! A book is persisted in one of two encodings.
//!
//! ## Directory Mode
//!
//! The working copy of a notebook. One directory per book:
//!
//! ```text
//! notebook_{book-uuid}/
//! ├── index.inkbook          # Index record (metadata + page order)
//! └── page_{uuid}.inkbook    # One page record per page
//! ```
//!
//! Saving rewrites the index every time but only the page records of pages
//! flagged as modified. Loading follows the page ids listed by the index.
//!
//! Two gaps are known and kept on purpose until there is a retention
//! policy: page files of removed pages are never deleted, and page files the
//! index does not mention are never picked up.
//!
//! Each file is replaced atomically (write to tmp then rename). A save as a
//! whole is not: a crash halfway leaves some pages updated and some not.
//!
//! ## Archive Mode
//!
//! A single portable file holding the index record immediately followed by
//! every page record. Always a complete snapshot. See [`archive`].
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: directory mode on the filesystem.
//! - [`mem_backend::MemBackend`]: directory mode in memory, for tests.

use crate::index::IndexRecord;
use crate::model::Page;

pub mod archive;
pub mod backend;
pub mod directory;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use directory::DirectoryStore;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

/// Suffix of every file this crate writes.
pub const FILE_SUFFIX: &str = ".inkbook";
pub const INDEX_FILE: &str = "index.inkbook";
pub const PAGE_FILE_PREFIX: &str = "page_";
pub const NOTEBOOK_DIR_PREFIX: &str = "notebook_";

/// What a load produced, before the book's consistency pass.
#[derive(Debug)]
pub struct StoredBook {
    pub index: IndexRecord,
    pub pages: Vec<Page>,
}
