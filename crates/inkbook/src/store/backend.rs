use crate::error::Result;
use uuid::Uuid;

/// Raw I/O for one book stored in directory mode.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`DirectoryStore`](super::directory::DirectoryStore) handles the "what"
/// (index framing, page limits, dirty-only writes).
pub trait StorageBackend {
    /// True if the book's storage exists and can be read.
    fn is_available(&self) -> bool;

    /// Creates the book's storage if it does not exist yet.
    fn prepare(&self) -> Result<()>;

    /// Human-readable location, for error messages and logs.
    fn location(&self) -> String;

    // --- Index ---

    fn read_index(&self) -> Result<Vec<u8>>;

    /// MUST replace the previous index atomically.
    fn write_index(&self, bytes: &[u8]) -> Result<()>;

    // --- Pages ---

    fn read_page(&self, id: &Uuid) -> Result<Vec<u8>>;

    /// MUST replace the previous page record atomically.
    fn write_page(&self, id: &Uuid, bytes: &[u8]) -> Result<()>;
}
