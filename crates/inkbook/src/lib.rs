//! # Inkbook Architecture
//!
//! Inkbook is the storage and page-view engine of a notebook application. It
//! owns the pages of a book, keeps a tag-filtered view over them, and moves
//! the whole thing to and from disk. Rendering and editing page content is
//! left to the application.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Book (book.rs)                                             │
//! │  - Metadata, high-level page operations, load/save          │
//! │  - Routes structural changes through a MutationSink         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  PageList (pages.rs)                                        │
//! │  - Ordered pages, filtered view, cursor                     │
//! │  - add/remove primitives and navigation                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (index.rs, store/)                           │
//! │  - Versioned index record (v1 to v4)                        │
//! │  - Directory mode over a StorageBackend, single-file archive│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! A book always has at least one page and a valid current page. Its
//! filtered view is recomputed after every change. Operations that would
//! leave the view empty add a page carrying the filter's tags. Breaking
//! these through the primitives is a bug in the caller and panics; I/O and
//! decoding failures are returned as [`BookError`].
//!
//! ## Undo
//!
//! Attaching a [`MutationListener`] hands every insert and removal the book
//! makes to the listener. [`UndoHistory`] is the stock listener.
//!
//! ## Module Overview
//!
//! - [`book`]: The [`Book`] aggregate
//! - [`pages`]: Page sequence, filtered view, navigation
//! - [`listener`]: Mutation delegation
//! - [`undo`]: Undo/redo history
//! - [`model`]: [`Page`] and [`Paper`]
//! - [`tags`]: Tag sets, tag registry, name validation
//! - [`index`]: Index record codec
//! - [`store`]: Directory and archive storage
//! - [`wire`]: Big-endian primitives shared by the codecs
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod book;
pub mod config;
pub mod error;
pub mod index;
pub mod listener;
pub mod model;
pub mod pages;
pub mod store;
pub mod tags;
pub mod undo;
pub mod wire;

#[cfg(test)]
pub mod test_utils;

pub use book::Book;
pub use config::BookConfig;
pub use error::{BookError, Result};
pub use listener::{MutationListener, MutationSink};
pub use model::{Page, Paper};
pub use pages::PageList;
pub use tags::{TagRegistry, TagSet};
pub use undo::UndoHistory;
