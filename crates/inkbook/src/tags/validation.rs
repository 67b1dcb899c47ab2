//! Tag name rules.
//!
//! Tags are shown as chips next to a page, so names stay short and
//! printable:
//! - Not empty and at most [`MAX_TAG_LEN`] characters
//! - No leading or trailing whitespace
//! - No control characters
//! - No commas (the tag editor splits input on them)

use thiserror::Error;

pub const MAX_TAG_LEN: usize = 48;

/// Checks a proposed tag name.
///
/// # Examples
/// ```
/// use inkbook::tags::validate_tag_name;
///
/// assert!(validate_tag_name("work").is_ok());
/// assert!(validate_tag_name("Trip to Lisbon").is_ok());
///
/// assert!(validate_tag_name("").is_err());
/// assert!(validate_tag_name(" padded").is_err());
/// assert!(validate_tag_name("a,b").is_err());
/// ```
pub fn validate_tag_name(name: &str) -> Result<(), TagValidationError> {
    if name.is_empty() {
        return Err(TagValidationError::Empty);
    }

    let len = name.chars().count();
    if len > MAX_TAG_LEN {
        return Err(TagValidationError::TooLong(len));
    }

    if name.trim() != name {
        return Err(TagValidationError::SurroundingWhitespace);
    }

    if let Some(ch) = name.chars().find(|c| c.is_control() || *c == ',') {
        return Err(TagValidationError::InvalidCharacter(ch));
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagValidationError {
    #[error("tag name cannot be empty")]
    Empty,
    #[error("tag name is {0} characters long (at most {max} allowed)", max = MAX_TAG_LEN)]
    TooLong(usize),
    #[error("tag name cannot start or end with whitespace")]
    SurroundingWhitespace,
    #[error("tag name contains invalid character {0:?}")]
    InvalidCharacter(char),
}
