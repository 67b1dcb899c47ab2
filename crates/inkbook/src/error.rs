use crate::tags::TagValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Failed to load book: {0}")]
    Load(String),

    #[error("Failed to save book: {0}")]
    Save(String),

    #[error("Unknown format version: {0}")]
    UnknownVersion(i32),

    #[error("Malformed book data: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid tag: {0}")]
    InvalidTag(#[from] TagValidationError),

    #[error("Tag '{0}' is not registered")]
    UnknownTag(String),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("No data directory could be determined for this platform")]
    NoDataDir,
}

pub type Result<T> = std::result::Result<T, BookError>;

impl BookError {
    /// Short message suitable for a notification, without the error chain.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(msg) => format!("Could not open notebook: {msg}"),
            Self::Save(msg) => format!("Could not save notebook: {msg}"),
            Self::UnknownVersion(v) => {
                format!("Notebook was written by an unsupported version ({v})")
            }
            Self::Malformed(msg) => format!("Notebook data is damaged: {msg}"),
            Self::Io(e) => format!("File error: {e}"),
            Self::InvalidTag(e) => e.to_string(),
            Self::UnknownTag(name) => format!("No tag named '{name}'"),
            Self::Config(e) => format!("Bad configuration: {e}"),
            Self::NoDataDir => "Set data_dir to choose where notebooks are kept".to_string(),
        }
    }

    /// True for errors raised while decoding stored data.
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, Self::UnknownVersion(_) | Self::Malformed(_))
    }
}
