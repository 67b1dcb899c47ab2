//! Single-file archives: the index record followed by every page record.
//!
//! Archives are full snapshots. Saving writes every page regardless of its
//! dirty flag; loading reads sequentially and may stop early for previews,
//! leaving the rest of the stream unread.

use super::StoredBook;
use crate::error::{BookError, Result};
use crate::index::IndexRecord;
use crate::model::Page;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use uuid::Uuid;

const PREALLOC_LIMIT: usize = 1024;

/// Reads an archive stream. Pages are read by count, so archives with a
/// pre-version-4 index (which lists no page ids) load fully.
pub fn read_archive<R: Read>(reader: &mut R, page_limit: Option<usize>) -> Result<StoredBook> {
    let index = IndexRecord::decode(reader)?;
    let to_read = index.page_count.min(page_limit.unwrap_or(usize::MAX));
    // The count comes from the file; a lying one ends in an EOF error.
    let mut pages = Vec::with_capacity(to_read.min(PREALLOC_LIMIT));
    for _ in 0..to_read {
        let page = Page::read_from(reader)?;
        log::debug!("Loaded archived page {}", page.id());
        pages.push(page);
    }
    if !index.page_ids.is_empty() && index.page_ids.iter().zip(&pages).any(|(id, p)| *id != p.id()) {
        log::warn!("Archive page order differs from its index; keeping stream order");
    }
    Ok(StoredBook { index, pages })
}

pub fn write_archive<W: Write>(writer: &mut W, index: &IndexRecord, pages: &[Page]) -> Result<()> {
    index.encode(writer)?;
    for page in pages {
        page.write_to(writer)?;
    }
    Ok(())
}

pub fn load_archive(path: &Path, page_limit: Option<usize>) -> Result<StoredBook> {
    let file = File::open(path)
        .map_err(|e| BookError::Load(format!("Cannot open {}: {e}", path.display())))?;
    let mut reader = BufReader::new(file);
    read_archive(&mut reader, page_limit)
}

/// Writes the archive to a temporary sibling and renames it over `path`.
pub fn save_archive(path: &Path, index: &IndexRecord, pages: &[Page]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = dir.join(format!(".archive-{}.tmp", Uuid::new_v4()));

    let result = (|| {
        let file = File::create(&tmp)
            .map_err(|e| BookError::Save(format!("Cannot create {}: {e}", tmp.display())))?;
        let mut writer = BufWriter::new(file);
        write_archive(&mut writer, index, pages)?;
        writer.flush()?;
        drop(writer);
        fs::rename(&tmp, path).map_err(BookError::Io)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
