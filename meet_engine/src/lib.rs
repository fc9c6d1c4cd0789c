//! # Meet Engine
//!
//! Heat seeding and results ranking for track and field competitions.
//!
//! The engine is a set of pure, synchronous functions. Loading entries,
//! capturing performances and persisting heat sheets or results are the
//! caller's job and happen strictly before or after an engine call.
//!
//! ## Core Modules
//!
//! - [`entries`]: The entry pool an event is seeded and ranked from
//! - [`seeding`]: Heat distribution and lane/position assignment
//! - [`ranking`]: Track, horizontal/throw and vertical ranking, including the
//!   attempt-by-height tracker for high jump and pole vault
//!
//! ## Example
//!
//! ```
//! use meet_engine::entries::{Entry, EntryPool, SeedPerformance};
//! use meet_engine::seeding::{SeedingRule, assign};
//!
//! let pool = EntryPool::new(vec![
//!     Entry::new(1).with_seed(SeedPerformance::TimeMs(10_450)),
//!     Entry::new(2).with_seed(SeedPerformance::TimeMs(10_320)),
//!     Entry::new(3),
//! ])
//! .unwrap();
//!
//! let assignments = assign(&pool, &SeedingRule::federation(8)).unwrap();
//! assert_eq!(assignments.len(), 3);
//! ```

/// Competition-wide constants.
pub mod constants;

/// Entries eligible for seeding and ranking.
pub mod entries;

/// Results ranking per discipline.
pub mod ranking;

/// Heat and lane seeding.
pub mod seeding;

pub use entries::{Entry, EntryId, EntryPool, EntryPoolError, EntryStatus, SeedPerformance};
pub use ranking::{
    EventPerformances, FieldRecord, RankEvent, RankedResult, RecordingError, TrackRecord,
    VerticalOutcome, VerticalState, rank_field, rank_track, rank_vertical,
};
pub use seeding::{HeatAssignment, SeedingError, SeedingPreset, SeedingRule, assign};
