//! Vertical recording and snapshot error types.

use crate::entries::EntryId;
use thiserror::Error;

/// Errors rejecting a vertical attempt. The state the attempt was recorded
/// against is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordingError {
    /// Height already cleared by this athlete
    #[error("Entry {entry_id} already cleared {height_cm}cm")]
    AlreadyCleared { entry_id: EntryId, height_cm: u32 },

    /// Athlete is out of the competition
    #[error("Entry {0} is eliminated")]
    AthleteEliminated(EntryId),

    /// Three attempts already used at this height
    #[error("Entry {entry_id} has no attempts left at {height_cm}cm")]
    TooManyAttempts { entry_id: EntryId, height_cm: u32 },

    /// Athlete retired and cannot attempt again
    #[error("Entry {0} has retired")]
    AthleteRetired(EntryId),

    /// Athlete passed this height
    #[error("Entry {entry_id} passed {height_cm}cm")]
    HeightPassed { entry_id: EntryId, height_cm: u32 },

    /// Bar cannot go back below a height already attempted
    #[error("Entry {entry_id} cannot attempt {height_cm}cm after {current_cm}cm")]
    HeightBelowProgression {
        entry_id: EntryId,
        height_cm: u32,
        current_cm: u32,
    },

    /// Entry not registered in the event
    #[error("Unknown entry: {0}")]
    UnknownEntry(EntryId),

    /// Entry registered twice
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(EntryId),

    /// Undo with an empty attempt log
    #[error("No attempt to undo")]
    NothingToUndo,
}

/// Result type for vertical recording operations
pub type RecordingResult<T> = Result<T, RecordingError>;

/// Errors encoding or decoding a vertical snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Failed to encode a snapshot
    #[error("Failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Failed to decode a snapshot
    #[error("Failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    /// Snapshot larger than allowed
    #[error("Snapshot size {actual} exceeds maximum {max}")]
    TooLarge { actual: usize, max: usize },

    /// Decoded attempt log rejected on replay
    #[error("Snapshot replay failed: {0}")]
    Replay(#[from] RecordingError),
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;
