//! Seeding error types.

use thiserror::Error;

/// Seeding errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedingError {
    /// No active entries to seed
    #[error("No eligible entries to seed")]
    NoEligibleEntries,

    /// Lane or position capacity not usable
    #[error("Invalid capacity: {reason}")]
    InvalidCapacity { reason: String },

    /// Explicit heat count outside 1..=active entries
    #[error("Invalid heat count {requested}: must be between 1 and {active}")]
    InvalidHeatCount { requested: u32, active: usize },

    /// Explicit heat count cannot hold every active entry
    #[error("{heats} heat(s) of {capacity} cannot hold {active} entries")]
    CapacityExceeded {
        heats: u32,
        capacity: u32,
        active: usize,
    },

    /// Explicit lane order is not a permutation of the lanes
    #[error("Invalid lane order {order:?}: must list lanes 1..={capacity} exactly once")]
    InvalidLaneOrder { order: Vec<u32>, capacity: u32 },

    /// The engine produced an assignment breaking its own invariants
    #[error("Internal seeding invariant violated: {0}")]
    InternalInvariant(String),
}

/// Result type for seeding operations
pub type SeedingResult<T> = Result<T, SeedingError>;
