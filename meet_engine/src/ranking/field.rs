//! Horizontal jump and throw ranking.

use super::models::{Performance, RankedResult, RecordFlags, ResultStatus, TieBreakKey};
use super::places::competition_places;
use crate::constants::LEGAL_WIND_LIMIT_DMPS;
use crate::entries::EntryId;
use log::debug;
use serde::{Deserialize, Serialize};

/// Competition status of a field entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldStatus {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "NM")]
    NoMark,
    #[serde(rename = "ND")]
    NoDistance,
}

/// Wind reading in tenths of a metre per second (positive = tail wind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wind(pub i16);

impl Wind {
    pub fn from_mps(mps: f64) -> Self {
        Self((mps * 10.0).round() as i16)
    }

    /// Legal for record purposes: at most +2.0 m/s
    pub fn is_legal(&self) -> bool {
        self.0 <= LEGAL_WIND_LIMIT_DMPS
    }
}

impl std::fmt::Display for Wind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "+" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

/// One trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldAttempt {
    Mark {
        distance_cm: u32,
        #[serde(default)]
        wind: Option<Wind>,
    },
    Foul,
    Pass,
}

impl FieldAttempt {
    pub fn mark(distance_cm: u32) -> Self {
        FieldAttempt::Mark {
            distance_cm,
            wind: None,
        }
    }

    pub fn mark_with_wind(distance_cm: u32, wind: Wind) -> Self {
        FieldAttempt::Mark {
            distance_cm,
            wind: Some(wind),
        }
    }
}

/// Trials of one entry in a horizontal jump or throw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub entry_id: EntryId,
    #[serde(default)]
    pub status: FieldStatus,
    #[serde(default)]
    pub attempts: Vec<FieldAttempt>,
    #[serde(default)]
    pub flags: RecordFlags,
}

impl FieldRecord {
    pub fn new(entry_id: EntryId, attempts: Vec<FieldAttempt>) -> Self {
        Self {
            entry_id,
            status: FieldStatus::Active,
            attempts,
            flags: RecordFlags::default(),
        }
    }

    pub fn with_status(mut self, status: FieldStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Valid marks, best first
    pub fn valid_marks(&self) -> Vec<u32> {
        let mut marks: Vec<u32> = self
            .attempts
            .iter()
            .filter_map(|attempt| match attempt {
                FieldAttempt::Mark { distance_cm, .. } => Some(*distance_cm),
                FieldAttempt::Foul | FieldAttempt::Pass => None,
            })
            .collect();
        marks.sort_unstable_by(|a, b| b.cmp(a));
        marks
    }

    pub fn best(&self) -> Option<u32> {
        self.valid_marks().first().copied()
    }

    /// Best mark with no wind reading or a legal one
    pub fn legal_best(&self) -> Option<u32> {
        self.attempts
            .iter()
            .filter_map(|attempt| match attempt {
                FieldAttempt::Mark { distance_cm, wind } if wind.is_none_or(|w| w.is_legal()) => {
                    Some(*distance_cm)
                }
                _ => None,
            })
            .max()
    }

    fn is_ranked(&self) -> bool {
        !matches!(self.status, FieldStatus::NoMark | FieldStatus::NoDistance)
            && self.best().is_some()
    }

    fn display_status(&self) -> ResultStatus {
        let no_mark = self.best().is_none();
        match self.status {
            FieldStatus::NoMark => ResultStatus::NoMark,
            FieldStatus::NoDistance => ResultStatus::NoDistance,
            FieldStatus::Complete | FieldStatus::Retired if no_mark => ResultStatus::NoMark,
            FieldStatus::Complete => ResultStatus::Complete,
            FieldStatus::Retired => ResultStatus::Retired,
            FieldStatus::Active => ResultStatus::Active,
        }
    }
}

/// Rank a horizontal jump or throw.
///
/// Entries are ordered by best valid mark; equal bests go to countback on the
/// second-best mark, then the third, and so on. An entry with more valid marks
/// beats one whose marks are an equal prefix of its own. Identical mark lists
/// share a place. NM/ND entries and entries without a valid mark are unranked
/// and follow the ranked ones in input order. Wind never affects placing.
pub fn rank_field(records: &[FieldRecord]) -> Vec<RankedResult> {
    let mut ranked: Vec<(&FieldRecord, Vec<u32>)> = records
        .iter()
        .filter(|r| r.is_ranked())
        .map(|r| (r, r.valid_marks()))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let places = competition_places(&ranked, |a, b| a.1 == b.1);

    let mut results: Vec<RankedResult> = ranked
        .iter()
        .zip(places)
        .map(|((record, marks), (place, tied))| {
            let best = marks.first().copied();
            let legal_best = record.legal_best();
            RankedResult {
                entry_id: record.entry_id,
                place: Some(place),
                tied,
                status: record.display_status(),
                best: best.map(Performance::DistanceCm),
                tie_break: TieBreakKey::Countback(marks.clone()),
                flags: record.flags,
                legal_best: legal_best.map(Performance::DistanceCm),
                wind_assisted: best.is_some() && legal_best != best,
            }
        })
        .collect();

    results.extend(
        records
            .iter()
            .filter(|r| !r.is_ranked())
            .map(|r| RankedResult::unranked(r.entry_id, r.display_status(), r.flags)),
    );

    debug!(
        "Ranked field event: {} with marks of {} records",
        ranked.len(),
        records.len()
    );

    results
}
