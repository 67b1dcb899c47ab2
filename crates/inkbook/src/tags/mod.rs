//! Tags and tag filters.
//!
//! Every page carries a [`TagSet`]. The book's active filter is also a
//! [`TagSet`]; a page matches the filter when its tags are a superset of
//! the filter's tags, so the empty filter matches everything.
//!
//! The [`TagRegistry`] is the book's tag manager: the list of tags known to
//! the notebook. New names go through [`validate_tag_name`]; tags read back
//! from storage are registered as-is.
//!
//! ## Wire format
//!
//! ```text
//! i32 version = 1
//! i32 count
//! count × string tag
//! ```

pub mod validation;

use crate::error::{BookError, Result};
use crate::wire::{ReadExt, WriteExt};
use std::io::{Read, Write};

pub use validation::{validate_tag_name, TagValidationError};

const TAG_SET_VERSION: i32 = 1;

/// Ordered, duplicate-free set of tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tag; returns false if it was already present.
    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Adds every tag of `other`.
    pub fn extend_from(&mut self, other: &TagSet) {
        for tag in other.iter() {
            self.insert(tag);
        }
    }

    /// True when every tag of `filter` is in this set.
    pub fn is_superset_of(&self, filter: &TagSet) -> bool {
        filter.iter().all(|t| self.contains(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let version = reader.read_i32_be()?;
        if version != TAG_SET_VERSION {
            return Err(BookError::UnknownVersion(version));
        }
        let count = reader.read_count("tag")?;
        let mut set = TagSet::new();
        for _ in 0..count {
            set.insert(reader.read_string()?);
        }
        Ok(set)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_i32_be(TAG_SET_VERSION)?;
        writer.write_count(self.tags.len())?;
        for tag in &self.tags {
            writer.write_string(tag)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    names: Vec<String>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new tag name after validating it. Creating a tag that
    /// already exists is a no-op.
    pub fn create(&mut self, name: &str) -> Result<()> {
        validate_tag_name(name)?;
        self.register(name);
        Ok(())
    }

    /// Registers every tag of `set` without validation.
    pub fn register_all(&mut self, set: &TagSet) {
        for tag in set.iter() {
            self.register(tag);
        }
    }

    fn register(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Builds a tag set from registered names; unknown names are an error.
    pub fn tag_set<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<TagSet> {
        let mut set = TagSet::new();
        for name in names {
            if !self.contains(name) {
                return Err(BookError::UnknownTag(name.to_string()));
            }
            set.insert(name);
        }
        Ok(set)
    }
}
