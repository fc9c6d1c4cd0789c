//! Heat and lane seeding.
//!
//! Partitions an event's active entries into heats and assigns each entry a
//! lane or position. One algorithm, parameterized by a [`SeedingRule`]:
//! - **Heat count**: explicit, or the fewest heats the capacity allows
//! - **Distribution**: ranked zigzag, random, or zigzag with club separation
//! - **Lanes**: best seed first through a [`LanePolicy`] ordering
//!
//! Every heat sheet is checked against the seeding invariants before it is
//! returned. Club separation is best-effort and never fails a run.
//!
//! ## Example
//!
//! ```
//! use meet_engine::entries::{Entry, EntryPool, SeedPerformance};
//! use meet_engine::seeding::{SeedingRule, assign_with_report};
//!
//! let pool = EntryPool::new(
//!     (1..=12)
//!         .map(|id| Entry::new(id).with_seed(SeedPerformance::TimeMs(10_000 + id as u64 * 7)))
//!         .collect(),
//! )
//! .unwrap();
//!
//! let report = assign_with_report(&pool, &SeedingRule::federation(8)).unwrap();
//! assert_eq!(report.heat_count, 2);
//! ```

mod club;
pub mod engine;
pub mod errors;
pub mod lanes;
pub mod models;
pub mod sheet;

pub use engine::{assign, assign_with_report, assign_with_rng, verify_assignments};
pub use errors::{SeedingError, SeedingResult};
pub use lanes::center_out;
pub use models::{
    ClubConflict, DistributionStrategy, HeatAssignment, HeatCapacity, LanePolicy, SeedingPreset,
    SeedingReport, SeedingRule,
};
pub use sheet::{EventSeeding, HeatSheet};
