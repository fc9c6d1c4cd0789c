//! Track ranking.

use super::models::{Performance, RankedResult, RecordFlags, ResultStatus, TieBreakKey};
use super::places::competition_places;
use crate::entries::EntryId;
use log::debug;
use serde::{Deserialize, Serialize};

/// Outcome of a race for one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackStatus {
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "DNS")]
    DidNotStart,
    #[serde(rename = "DNF")]
    DidNotFinish,
    #[serde(rename = "DQ")]
    Disqualified,
    #[serde(rename = "FS")]
    FalseStart,
}

impl From<TrackStatus> for ResultStatus {
    fn from(status: TrackStatus) -> Self {
        match status {
            TrackStatus::Finished => ResultStatus::Finished,
            TrackStatus::DidNotStart => ResultStatus::DidNotStart,
            TrackStatus::DidNotFinish => ResultStatus::DidNotFinish,
            TrackStatus::Disqualified => ResultStatus::Disqualified,
            TrackStatus::FalseStart => ResultStatus::FalseStart,
        }
    }
}

/// Raw result of one entry in a race
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub entry_id: EntryId,
    pub status: TrackStatus,
    /// Finish time in milliseconds, set for finishers
    #[serde(default)]
    pub time_ms: Option<u64>,
    /// Reaction time in milliseconds (informational, never ranked)
    #[serde(default)]
    pub reaction_time_ms: Option<u32>,
    #[serde(default)]
    pub flags: RecordFlags,
}

impl TrackRecord {
    pub fn finished(entry_id: EntryId, time_ms: u64) -> Self {
        Self {
            entry_id,
            status: TrackStatus::Finished,
            time_ms: Some(time_ms),
            reaction_time_ms: None,
            flags: RecordFlags::default(),
        }
    }

    /// A non-finisher (DNS, DNF, DQ, FS)
    pub fn with_status(entry_id: EntryId, status: TrackStatus) -> Self {
        Self {
            entry_id,
            status,
            time_ms: None,
            reaction_time_ms: None,
            flags: RecordFlags::default(),
        }
    }

    pub fn with_reaction_time(mut self, reaction_time_ms: u32) -> Self {
        self.reaction_time_ms = Some(reaction_time_ms);
        self
    }

    pub fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Time to rank on: only finishers with a recorded time
    fn ranking_time(&self) -> Option<u64> {
        match self.status {
            TrackStatus::Finished => self.time_ms,
            _ => None,
        }
    }
}

/// Rank a race.
///
/// Finishers are ordered by time; equal times share a place and the next
/// time takes its position in the list (1, 1, 3). Everyone else is returned
/// unranked after the finishers, in input order. A finisher with no time yet
/// is unranked too.
pub fn rank_track(records: &[TrackRecord]) -> Vec<RankedResult> {
    let mut finishers: Vec<(&TrackRecord, u64)> = records
        .iter()
        .filter_map(|r| r.ranking_time().map(|t| (r, t)))
        .collect();
    finishers.sort_by_key(|(_, time)| *time);

    let places = competition_places(&finishers, |a, b| a.1 == b.1);

    let mut results: Vec<RankedResult> = finishers
        .iter()
        .zip(places)
        .map(|((record, time), (place, tied))| RankedResult {
            entry_id: record.entry_id,
            place: Some(place),
            tied,
            status: ResultStatus::Finished,
            best: Some(Performance::TimeMs(*time)),
            tie_break: TieBreakKey::Time(*time),
            flags: record.flags,
            legal_best: None,
            wind_assisted: false,
        })
        .collect();

    results.extend(
        records
            .iter()
            .filter(|r| r.ranking_time().is_none())
            .map(|r| RankedResult::unranked(r.entry_id, r.status.into(), r.flags)),
    );

    debug!(
        "Ranked track event: {} finishers of {} records",
        finishers.len(),
        records.len()
    );

    results
}
