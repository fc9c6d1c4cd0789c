//! Entry pool for a single event.
//!
//! An [`EntryPool`] is the normalized view of the registrations an event is
//! seeded and ranked from. It is validated once on construction:
//! - Entry ids are unique within the pool
//! - Seeds are all times or all marks, never a mix
//!
//! Withdrawn entries stay in the pool for display but never take part in
//! seeding.

pub mod errors;
pub mod models;

pub use errors::{EntryPoolError, EntryPoolResult};
pub use models::{
    ClubId, Entry, EntryId, EntryPool, EntryStatus, SeedKind, SeedPerformance, compare_seeds,
};
