//! Results ranking.
//!
//! One ranking function per discipline, all pure and all tolerant of live,
//! incomplete data:
//! - **Track**: by finish time, equal times share a place
//! - **Field**: by best valid mark with countback on the following marks
//! - **Vertical**: by best height, then failures at that height, then total
//!   failures, over an immutable attempt-by-height [`VerticalState`]
//!
//! Places use competition numbering: two results tied for 1st are followed by
//! 3rd. Anything that cannot be ranked yet is returned unranked with its
//! status rather than rejected.

pub mod errors;
pub mod event;
pub mod field;
pub mod models;
mod places;
pub mod snapshot;
pub mod track;
pub mod vertical;

pub use errors::{RecordingError, RecordingResult, SnapshotError, SnapshotResult};
pub use event::{Discipline, EventPerformances, FieldEvent, RankEvent, TrackEvent};
pub use field::{FieldAttempt, FieldRecord, FieldStatus, Wind, rank_field};
pub use models::{Performance, RankedResult, RecordFlags, ResultStatus, TieBreakKey};
pub use snapshot::{decode_snapshot, encode_snapshot};
pub use track::{TrackRecord, TrackStatus, rank_track};
pub use vertical::{
    AttemptLogEntry, EliminationRule, VerticalOutcome, VerticalRecord, VerticalSnapshot,
    VerticalState, VerticalStatus, rank_vertical,
};
