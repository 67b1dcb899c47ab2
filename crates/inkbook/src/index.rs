//! # Book Index Record
//!
//! The index holds a book's metadata and page order. Writers always emit
//! version 4; readers accept versions 1 through 4 and normalize all of them
//! into one [`IndexRecord`].
//!
//! ## Version 4 layout
//!
//! ```text
//! i32    version = 4
//! i32    page_count
//! string page_id × page_count
//! i32    current_page
//! string title
//! i64    created_at (ms since epoch)
//! i64    modified_at (ms since epoch)
//! string book_id
//! <TagSet> filter
//! ```
//!
//! ## Older versions
//!
//! | Version | Missing on the wire | Filled with |
//! |---------|---------------------|-------------|
//! | 3 | page ids | empty list |
//! | 2 | page ids, title, times, book id | placeholder title, now, fresh id |
//! | 1 | as v2, plus the filter | as v2, empty filter |
//!
//! Any other version is rejected with [`BookError::UnknownVersion`].

use crate::error::{BookError, Result};
use crate::tags::TagSet;
use crate::wire::{ReadExt, WriteExt};
use chrono::{DateTime, SubsecRound, Utc};
use std::io::{Read, Write};
use uuid::Uuid;

pub const CURRENT_VERSION: i32 = 4;

pub const IMPORTED_V1_TITLE: &str = "Imported notebook (v1)";
pub const IMPORTED_V2_TITLE: &str = "Imported notebook (v2)";

/// Current time at the precision the index stores.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexVersion {
    V1,
    V2,
    V3,
    V4,
}

impl TryFrom<i32> for IndexVersion {
    type Error = BookError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            1 => Ok(Self::V1),
            2 => Ok(Self::V2),
            3 => Ok(Self::V3),
            4 => Ok(Self::V4),
            other => Err(BookError::UnknownVersion(other)),
        }
    }
}

/// A decoded index, independent of the version it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRecord {
    pub page_count: usize,
    /// Empty for versions before 4.
    pub page_ids: Vec<Uuid>,
    /// As stored; may be out of range.
    pub current_page: i32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub book_id: Uuid,
    pub filter: TagSet,
}

impl IndexRecord {
    pub fn decode<R: Read>(reader: &mut R) -> Result<Self> {
        let raw = reader.read_i32_be()?;
        let version = IndexVersion::try_from(raw)?;
        log::debug!("Decoding book index v{raw}");
        match version {
            IndexVersion::V4 => decode_v4(reader),
            IndexVersion::V3 => decode_v3(reader),
            IndexVersion::V2 => decode_v2(reader),
            IndexVersion::V1 => decode_v1(reader),
        }
    }

    /// Writes the record as version 4. `page_count` is taken from
    /// `page_ids`.
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32_be(CURRENT_VERSION)?;
        writer.write_count(self.page_ids.len())?;
        for id in &self.page_ids {
            writer.write_uuid(id)?;
        }
        writer.write_i32_be(self.current_page)?;
        writer.write_string(&self.title)?;
        writer.write_i64_be(self.created_at.timestamp_millis())?;
        writer.write_i64_be(self.modified_at.timestamp_millis())?;
        writer.write_uuid(&self.book_id)?;
        self.filter.write_to(writer)
    }
}

fn read_time<R: Read>(reader: &mut R) -> Result<DateTime<Utc>> {
    let millis = reader.read_i64_be()?;
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| BookError::Malformed(format!("timestamp {millis} out of range")))
}

fn decode_v4<R: Read>(reader: &mut R) -> Result<IndexRecord> {
    let page_count = reader.read_count("page")?;
    let mut page_ids = Vec::new();
    for _ in 0..page_count {
        page_ids.push(reader.read_uuid()?);
    }
    Ok(IndexRecord {
        page_count,
        page_ids,
        current_page: reader.read_i32_be()?,
        title: reader.read_string()?,
        created_at: read_time(reader)?,
        modified_at: read_time(reader)?,
        book_id: reader.read_uuid()?,
        filter: TagSet::read_from(reader)?,
    })
}

fn decode_v3<R: Read>(reader: &mut R) -> Result<IndexRecord> {
    Ok(IndexRecord {
        page_count: reader.read_count("page")?,
        page_ids: Vec::new(),
        current_page: reader.read_i32_be()?,
        title: reader.read_string()?,
        created_at: read_time(reader)?,
        modified_at: read_time(reader)?,
        book_id: reader.read_uuid()?,
        filter: TagSet::read_from(reader)?,
    })
}

fn decode_v2<R: Read>(reader: &mut R) -> Result<IndexRecord> {
    let page_count = reader.read_count("page")?;
    let current_page = reader.read_i32_be()?;
    let filter = TagSet::read_from(reader)?;
    Ok(imported(page_count, current_page, IMPORTED_V2_TITLE, filter))
}

fn decode_v1<R: Read>(reader: &mut R) -> Result<IndexRecord> {
    let page_count = reader.read_count("page")?;
    let current_page = reader.read_i32_be()?;
    Ok(imported(page_count, current_page, IMPORTED_V1_TITLE, TagSet::new()))
}

fn imported(page_count: usize, current_page: i32, title: &str, filter: TagSet) -> IndexRecord {
    let stamp = now();
    IndexRecord {
        page_count,
        page_ids: Vec::new(),
        current_page,
        title: title.to_string(),
        created_at: stamp,
        modified_at: stamp,
        book_id: Uuid::new_v4(),
        filter,
    }
}
