//! # Domain Model: Pages
//!
//! A [`Page`] is one sheet of a notebook. The book only relies on a small
//! part of it:
//!
//! - a stable [`Uuid`] identity (pages are compared by id, never by value)
//! - a [`TagSet`] used by the book's filter
//! - a dirty flag, so directory saves can skip unchanged pages
//! - a self-delimiting binary record
//!
//! The page body is kept as text. Layout lives in [`Paper`]; it is what a
//! new page inherits from its template, while the body is only copied by
//! [`Page::duplicate`].
//!
//! ## Dirty Tracking
//!
//! Fresh pages start dirty. Pages decoded from storage start clean. Every
//! mutator marks the page dirty, and the book calls [`Page::touch`] on pages
//! whose position changed. The flag is never persisted.
//!
//! ## Wire format
//!
//! ```text
//! i32 version = 1
//! string id
//! i32 paper
//! <TagSet>
//! i32 content length (bytes)
//! content bytes (UTF-8)
//! ```

use crate::error::{BookError, Result};
use crate::tags::TagSet;
use crate::wire::{ReadExt, WriteExt};
use std::io::{Read, Write};
use uuid::Uuid;

const PAGE_VERSION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Paper {
    #[default]
    Plain,
    Ruled,
    Quad,
}

impl Paper {
    fn to_wire(self) -> i32 {
        match self {
            Paper::Plain => 0,
            Paper::Ruled => 1,
            Paper::Quad => 2,
        }
    }

    fn from_wire(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Paper::Plain),
            1 => Ok(Paper::Ruled),
            2 => Ok(Paper::Quad),
            other => Err(BookError::Malformed(format!("unknown paper type {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    id: Uuid,
    paper: Paper,
    tags: TagSet,
    content: String,
    modified: bool,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A blank page with a fresh id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            paper: Paper::default(),
            tags: TagSet::new(),
            content: String::new(),
            modified: true,
        }
    }

    /// A blank page laid out like `template`.
    pub fn from_template(template: &Page) -> Self {
        Self {
            paper: template.paper,
            ..Self::new()
        }
    }

    /// A copy of this page under a fresh id, body and tags included.
    pub fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            paper: self.paper,
            tags: self.tags.clone(),
            content: self.content.clone(),
            modified: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn paper(&self) -> Paper {
        self.paper
    }

    pub fn set_paper(&mut self, paper: Paper) {
        self.paper = paper;
        self.modified = true;
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Mutable access to the tags. Marks the page dirty.
    pub fn tags_mut(&mut self) -> &mut TagSet {
        self.modified = true;
        &mut self.tags
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.modified = true;
    }

    /// A page with nothing written on it. Tags do not count.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Marks the page as needing to be written on the next directory save.
    pub fn touch(&mut self) {
        self.modified = true;
    }

    pub(crate) fn mark_saved(&mut self) {
        self.modified = false;
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let version = reader.read_i32_be()?;
        if version != PAGE_VERSION {
            return Err(BookError::UnknownVersion(version));
        }
        let id = reader.read_uuid()?;
        let paper = Paper::from_wire(reader.read_i32_be()?)?;
        let tags = TagSet::read_from(reader)?;
        let len = reader.read_count("content byte")?;
        let mut bytes = Vec::new();
        reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(BookError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("page {id} content is {} of {len} bytes", bytes.len()),
            )));
        }
        let content = String::from_utf8(bytes)
            .map_err(|e| BookError::Malformed(format!("page {id} content: {e}")))?;

        Ok(Self {
            id,
            paper,
            tags,
            content,
            modified: false,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32_be(PAGE_VERSION)?;
        writer.write_uuid(&self.id)?;
        writer.write_i32_be(self.paper.to_wire())?;
        self.tags.write_to(writer)?;
        writer.write_count(self.content.len())?;
        writer.write_all(self.content.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_new_page_is_blank_and_dirty() {
        let page = Page::new();
        assert!(page.is_empty());
        assert!(page.is_modified());
        assert!(page.tags().is_empty());
    }

    #[test]
    fn test_whitespace_only_content_is_empty() {
        let mut page = Page::new();
        page.set_content("  \n\t ");
        assert!(page.is_empty());
        page.set_content("x");
        assert!(!page.is_empty());
    }

    #[test]
    fn test_template_copies_layout_only() {
        let mut template = Page::new();
        template.set_paper(Paper::Ruled);
        template.set_content("notes");
        template.tags_mut().insert("work");

        let page = Page::from_template(&template);
        assert_ne!(page.id(), template.id());
        assert_eq!(page.paper(), Paper::Ruled);
        assert!(page.is_empty());
        assert!(page.tags().is_empty());
    }

    #[test]
    fn test_duplicate_copies_body_and_tags() {
        let mut original = Page::new();
        original.set_content("draft");
        original.tags_mut().insert("ideas");

        let copy = original.duplicate();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.content(), "draft");
        assert!(copy.tags().contains("ideas"));
    }

    #[test]
    fn test_decoded_page_is_clean() {
        let mut page = Page::new();
        page.set_paper(Paper::Quad);
        page.set_content("Grocery list\n- eggs");
        page.tags_mut().insert("home");

        let mut buf = Vec::new();
        page.write_to(&mut buf).unwrap();
        let loaded = Page::read_from(&mut Cursor::new(buf)).unwrap();

        assert_eq!(loaded.id(), page.id());
        assert_eq!(loaded.paper(), Paper::Quad);
        assert_eq!(loaded.content(), page.content());
        assert!(loaded.tags().contains("home"));
        assert!(!loaded.is_modified());
    }

    #[test]
    fn test_records_are_self_delimiting() {
        let a = Page::new();
        let mut b = Page::new();
        b.set_content("second");

        let mut buf = Vec::new();
        a.write_to(&mut buf).unwrap();
        b.write_to(&mut buf).unwrap();

        let mut cursor = Cursor::new(buf);
        assert_eq!(Page::read_from(&mut cursor).unwrap().id(), a.id());
        assert_eq!(Page::read_from(&mut cursor).unwrap().content(), "second");
    }

    #[test]
    fn test_huge_content_length_fails_at_end_of_stream() {
        let page = Page::new();
        let mut buf = Vec::new();
        page.write_to(&mut buf).unwrap();
        // empty content: the length is the last field
        let at = buf.len() - 4;
        buf[at..].copy_from_slice(&i32::MAX.to_be_bytes());
        buf.extend_from_slice(b"short");

        let result = Page::read_from(&mut Cursor::new(buf));
        assert!(matches!(result, Err(BookError::Io(_))));
    }

    #[test]
    fn test_unknown_paper_is_malformed() {
        let page = Page::new();
        let mut buf = Vec::new();
        page.write_to(&mut buf).unwrap();
        // version (4) + id string (2 + 36) precede the paper field
        buf[42..46].copy_from_slice(&9i32.to_be_bytes());
        let result = Page::read_from(&mut Cursor::new(buf));
        assert!(matches!(result, Err(BookError::Malformed(_))));
    }
}
