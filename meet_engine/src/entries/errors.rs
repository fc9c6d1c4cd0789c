//! Entry pool error types.

use super::models::EntryId;
use thiserror::Error;

/// Entry pool validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryPoolError {
    /// The same entry id appears twice
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(EntryId),

    /// Time seeds and mark seeds in the same event
    #[error("Entry {entry_id} has a {found} seed but the pool is seeded by {expected}")]
    MixedSeedKinds {
        entry_id: EntryId,
        expected: String,
        found: String,
    },
}

/// Result type for entry pool operations
pub type EntryPoolResult<T> = Result<T, EntryPoolError>;
