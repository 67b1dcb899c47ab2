use super::backend::StorageBackend;
use super::{INDEX_FILE, PAGE_FILE_PREFIX, FILE_SUFFIX};
use crate::error::{BookError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One directory per book: `index.inkbook` plus `page_<uuid>.inkbook` files.
pub struct FsBackend {
    dir: PathBuf,
}

impl FsBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, id: &Uuid) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", PAGE_FILE_PREFIX, id, FILE_SUFFIX))
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn atomic_write(&self, target: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = self.dir.join(format!(".write-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, bytes).map_err(BookError::Io)?;
        if let Err(e) = fs::rename(&tmp, target) {
            let _ = fs::remove_file(&tmp);
            return Err(BookError::Io(e));
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn is_available(&self) -> bool {
        self.dir.is_dir()
    }

    fn prepare(&self) -> Result<()> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                BookError::Save(format!("Error creating directory {}: {e}", self.dir.display()))
            })?;
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    fn read_index(&self) -> Result<Vec<u8>> {
        fs::read(self.index_path()).map_err(BookError::Io)
    }

    fn write_index(&self, bytes: &[u8]) -> Result<()> {
        self.atomic_write(&self.index_path(), bytes)
    }

    fn read_page(&self, id: &Uuid) -> Result<Vec<u8>> {
        fs::read(self.page_path(id)).map_err(BookError::Io)
    }

    fn write_page(&self, id: &Uuid, bytes: &[u8]) -> Result<()> {
        self.atomic_write(&self.page_path(id), bytes)
    }
}
