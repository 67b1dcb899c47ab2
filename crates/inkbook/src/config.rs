//! # Configuration
//!
//! Configuration is loaded with [`confique`], layered in priority order:
//! 1. **Environment variables**: `INKBOOK_DATA_DIR`, `INKBOOK_PREVIEW_PAGES`,
//!    `INKBOOK_DEFAULT_TITLE`.
//! 2. **Config file**: an optional `inkbook.toml` passed to [`BookConfig::load`].
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | platform data dir | Root holding one `notebook_<uuid>` directory per book |
//! | `preview_pages` | `3` | Pages loaded by [`Book::preview`](crate::Book::preview) |
//! | `default_title` | `Untitled notebook` | Title of books made by [`Book::create`](crate::Book::create) |
//!
//! When `data_dir` is unset the platform data directory is resolved with the
//! `directories` crate.

use crate::error::{BookError, Result};
use crate::store::NOTEBOOK_DIR_PREFIX;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Directory holding the notebooks. Defaults to the platform data dir.
    #[config(env = "INKBOOK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Number of pages loaded for a preview.
    #[config(default = 3, env = "INKBOOK_PREVIEW_PAGES")]
    pub preview_pages: usize,

    /// Title given to new books.
    #[config(default = "Untitled notebook", env = "INKBOOK_DEFAULT_TITLE")]
    pub default_title: String,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            preview_pages: 3,
            default_title: "Untitled notebook".to_string(),
        }
    }
}

impl BookConfig {
    /// Loads from the environment and, if given, a TOML file. A missing file
    /// is not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// Configuration rooted at `dir`, everything else default.
    pub fn with_data_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        ProjectDirs::from("org", "inkbook", "inkbook")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(BookError::NoDataDir)
    }

    /// Directory of the book `id`: `<data_dir>/notebook_<id>`.
    pub fn book_dir(&self, id: &Uuid) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(format!("{NOTEBOOK_DIR_PREFIX}{id}")))
    }
}
