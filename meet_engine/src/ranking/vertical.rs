//! High jump and pole vault progression and ranking.
//!
//! [`VerticalState`] is an immutable value built from an attempt log. Each
//! recorded attempt returns a new state with the attempt appended, so undo is
//! a replay of the log without its last entry, and a persisted log can always
//! be replayed into the same state.

use super::errors::{RecordingError, RecordingResult};
use super::models::{Performance, RankedResult, RecordFlags, ResultStatus, TieBreakKey};
use super::places::competition_places;
use crate::constants::{ELIMINATION_FAILURES, MAX_ATTEMPTS_PER_HEIGHT};
use crate::entries::{EntryId, EntryPool};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Result of one jump, or a decision not to jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalOutcome {
    Clear,
    Fail,
    Pass,
    Retire,
}

impl std::fmt::Display for VerticalOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerticalOutcome::Clear => write!(f, "o"),
            VerticalOutcome::Fail => write!(f, "x"),
            VerticalOutcome::Pass => write!(f, "-"),
            VerticalOutcome::Retire => write!(f, "r"),
        }
    }
}

/// Competition status of a vertical entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalStatus {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "eliminated")]
    Eliminated,
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "NH")]
    NoHeight,
}

/// When failures knock an athlete out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationRule {
    /// Three failures at one height without a clearance
    #[default]
    PerHeight,
    /// Three consecutive failures, whatever the heights (passes do not reset)
    Consecutive,
}

/// One line of the attempt log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptLogEntry {
    pub entry_id: EntryId,
    pub height_cm: u32,
    pub outcome: VerticalOutcome,
}

/// Attempt history of one athlete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalRecord {
    pub entry_id: EntryId,
    pub status: VerticalStatus,
    pub attempts_by_height: BTreeMap<u32, Vec<VerticalOutcome>>,
    pub flags: RecordFlags,
}

impl VerticalRecord {
    fn new(entry_id: EntryId, flags: RecordFlags) -> Self {
        Self {
            entry_id,
            status: VerticalStatus::Active,
            attempts_by_height: BTreeMap::new(),
            flags,
        }
    }

    fn outcomes_at(&self, height_cm: u32) -> &[VerticalOutcome] {
        self.attempts_by_height
            .get(&height_cm)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highest cleared height
    pub fn best_height(&self) -> Option<u32> {
        self.attempts_by_height
            .iter()
            .rev()
            .find(|(_, outcomes)| outcomes.contains(&VerticalOutcome::Clear))
            .map(|(height, _)| *height)
    }

    pub fn fails_at(&self, height_cm: u32) -> usize {
        self.outcomes_at(height_cm)
            .iter()
            .filter(|o| **o == VerticalOutcome::Fail)
            .count()
    }

    pub fn total_fails(&self) -> usize {
        self.attempts_by_height
            .values()
            .flatten()
            .filter(|o| **o == VerticalOutcome::Fail)
            .count()
    }

    /// Highest height with a clear, fail or pass recorded
    pub fn highest_attempted(&self) -> Option<u32> {
        self.attempts_by_height
            .iter()
            .rev()
            .find(|(_, outcomes)| outcomes.iter().any(|o| *o != VerticalOutcome::Retire))
            .map(|(height, _)| *height)
    }

    /// Failures since the last clearance, ignoring passes
    pub fn consecutive_fails(&self) -> usize {
        let mut run = 0;
        for outcome in self.attempts_by_height.values().flatten() {
            match outcome {
                VerticalOutcome::Fail => run += 1,
                VerticalOutcome::Clear => run = 0,
                VerticalOutcome::Pass | VerticalOutcome::Retire => {}
            }
        }
        run
    }

    /// Status for display: out of the competition without a clearance is NH
    pub fn display_status(&self) -> VerticalStatus {
        match self.status {
            VerticalStatus::Eliminated | VerticalStatus::Retired
                if self.best_height().is_none() =>
            {
                VerticalStatus::NoHeight
            }
            status => status,
        }
    }

    fn check_attempt(&self, height_cm: u32, outcome: VerticalOutcome) -> RecordingResult<()> {
        let entry_id = self.entry_id;

        match self.status {
            VerticalStatus::Eliminated => return Err(RecordingError::AthleteEliminated(entry_id)),
            VerticalStatus::Retired | VerticalStatus::NoHeight => {
                return Err(RecordingError::AthleteRetired(entry_id));
            }
            VerticalStatus::Active => {}
        }

        if outcome == VerticalOutcome::Retire {
            return Ok(());
        }

        let current_cm = self.highest_attempted().unwrap_or(0);
        if height_cm < current_cm {
            return Err(RecordingError::HeightBelowProgression {
                entry_id,
                height_cm,
                current_cm,
            });
        }

        let outcomes = self.outcomes_at(height_cm);
        if outcomes.contains(&VerticalOutcome::Clear) {
            return Err(RecordingError::AlreadyCleared {
                entry_id,
                height_cm,
            });
        }
        let taken = outcomes
            .iter()
            .filter(|o| **o != VerticalOutcome::Retire)
            .count();
        if taken >= MAX_ATTEMPTS_PER_HEIGHT {
            return Err(RecordingError::TooManyAttempts {
                entry_id,
                height_cm,
            });
        }
        if outcomes.contains(&VerticalOutcome::Pass) {
            return Err(RecordingError::HeightPassed {
                entry_id,
                height_cm,
            });
        }

        Ok(())
    }

    fn is_out(&self, height_cm: u32, rule: EliminationRule) -> bool {
        match rule {
            EliminationRule::PerHeight => {
                self.fails_at(height_cm) >= ELIMINATION_FAILURES
                    && !self.outcomes_at(height_cm).contains(&VerticalOutcome::Clear)
            }
            EliminationRule::Consecutive => self.consecutive_fails() >= ELIMINATION_FAILURES,
        }
    }
}

/// Persistable form of a [`VerticalState`]: roster, rule and attempt log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalSnapshot {
    pub elimination: EliminationRule,
    pub roster: Vec<(EntryId, RecordFlags)>,
    pub log: Vec<AttemptLogEntry>,
}

/// Attempt-by-height state of one vertical event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VerticalSnapshot", into = "VerticalSnapshot")]
pub struct VerticalState {
    elimination: EliminationRule,
    athletes: Vec<VerticalRecord>,
    log: Vec<AttemptLogEntry>,
}

impl VerticalState {
    /// Register athletes in start order
    pub fn new(
        entry_ids: impl IntoIterator<Item = EntryId>,
        elimination: EliminationRule,
    ) -> RecordingResult<Self> {
        Self::with_flags(
            entry_ids
                .into_iter()
                .map(|id| (id, RecordFlags::default())),
            elimination,
        )
    }

    /// Register athletes with their record flags
    pub fn with_flags(
        roster: impl IntoIterator<Item = (EntryId, RecordFlags)>,
        elimination: EliminationRule,
    ) -> RecordingResult<Self> {
        let mut seen = HashSet::new();
        let mut athletes = Vec::new();
        for (entry_id, flags) in roster {
            if !seen.insert(entry_id) {
                return Err(RecordingError::DuplicateEntry(entry_id));
            }
            athletes.push(VerticalRecord::new(entry_id, flags));
        }

        Ok(Self {
            elimination,
            athletes,
            log: Vec::new(),
        })
    }

    /// Register the pool's active entries
    pub fn from_pool(pool: &EntryPool, elimination: EliminationRule) -> RecordingResult<Self> {
        Self::new(pool.active().map(|e| e.entry_id), elimination)
    }

    /// Rebuild a state by replaying an attempt log
    pub fn replay(
        roster: impl IntoIterator<Item = (EntryId, RecordFlags)>,
        elimination: EliminationRule,
        log: &[AttemptLogEntry],
    ) -> RecordingResult<Self> {
        let mut state = Self::with_flags(roster, elimination)?;
        for entry in log {
            state.apply(*entry)?;
        }
        Ok(state)
    }

    /// Record an attempt, returning the next state.
    ///
    /// # Errors
    ///
    /// * `AthleteEliminated` / `AthleteRetired` - the athlete is out
    /// * `AlreadyCleared` - the height is already cleared
    /// * `HeightPassed` - the athlete passed this height
    /// * `TooManyAttempts` - three attempts already taken at this height
    /// * `HeightBelowProgression` - the bar is below a height already attempted
    /// * `UnknownEntry` - the entry is not registered
    pub fn record_attempt(
        &self,
        entry_id: EntryId,
        height_cm: u32,
        outcome: VerticalOutcome,
    ) -> RecordingResult<Self> {
        let mut next = self.clone();
        next.apply(AttemptLogEntry {
            entry_id,
            height_cm,
            outcome,
        })?;
        Ok(next)
    }

    /// The state before the last recorded attempt
    pub fn undo(&self) -> RecordingResult<Self> {
        let Some((_, earlier)) = self.log.split_last() else {
            return Err(RecordingError::NothingToUndo);
        };
        Self::replay(self.roster(), self.elimination, earlier)
    }

    fn apply(&mut self, entry: AttemptLogEntry) -> RecordingResult<()> {
        let elimination = self.elimination;
        let record = self
            .athletes
            .iter_mut()
            .find(|a| a.entry_id == entry.entry_id)
            .ok_or(RecordingError::UnknownEntry(entry.entry_id))?;

        record.check_attempt(entry.height_cm, entry.outcome)?;

        record
            .attempts_by_height
            .entry(entry.height_cm)
            .or_default()
            .push(entry.outcome);

        match entry.outcome {
            VerticalOutcome::Retire => record.status = VerticalStatus::Retired,
            VerticalOutcome::Fail if record.is_out(entry.height_cm, elimination) => {
                debug!(
                    "Entry {} eliminated at {}cm",
                    entry.entry_id, entry.height_cm
                );
                record.status = VerticalStatus::Eliminated;
            }
            _ => {}
        }

        self.log.push(entry);
        Ok(())
    }

    /// Number of attempts recorded; every recorded attempt is a new version
    pub fn version(&self) -> usize {
        self.log.len()
    }

    pub fn elimination_rule(&self) -> EliminationRule {
        self.elimination
    }

    pub fn log(&self) -> &[AttemptLogEntry] {
        &self.log
    }

    pub fn athletes(&self) -> &[VerticalRecord] {
        &self.athletes
    }

    pub fn athlete(&self, entry_id: EntryId) -> Option<&VerticalRecord> {
        self.athletes.iter().find(|a| a.entry_id == entry_id)
    }

    /// Athletes still jumping
    pub fn active_count(&self) -> usize {
        self.athletes
            .iter()
            .filter(|a| a.status == VerticalStatus::Active)
            .count()
    }

    pub fn roster(&self) -> Vec<(EntryId, RecordFlags)> {
        self.athletes.iter().map(|a| (a.entry_id, a.flags)).collect()
    }

    pub fn to_snapshot(&self) -> VerticalSnapshot {
        VerticalSnapshot {
            elimination: self.elimination,
            roster: self.roster(),
            log: self.log.clone(),
        }
    }

    pub fn from_snapshot(snapshot: VerticalSnapshot) -> RecordingResult<Self> {
        Self::replay(snapshot.roster, snapshot.elimination, &snapshot.log)
    }
}

impl TryFrom<VerticalSnapshot> for VerticalState {
    type Error = RecordingError;

    fn try_from(snapshot: VerticalSnapshot) -> Result<Self, Self::Error> {
        Self::from_snapshot(snapshot)
    }
}

impl From<VerticalState> for VerticalSnapshot {
    fn from(state: VerticalState) -> Self {
        state.to_snapshot()
    }
}

/// Rank a vertical event.
///
/// Athletes with a clearance are ordered by best height, then by fewer
/// failures at that height, then by fewer failures overall. Athletes still
/// tied share a place. Athletes without a clearance are unranked and follow
/// in start order.
pub fn rank_vertical(state: &VerticalState) -> Vec<RankedResult> {
    let mut ranked: Vec<(&VerticalRecord, (u32, usize, usize))> = state
        .athletes
        .iter()
        .filter_map(|a| {
            a.best_height()
                .map(|best| (a, (best, a.fails_at(best), a.total_fails())))
        })
        .collect();
    ranked.sort_by(|(_, a), (_, b)| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));

    let places = competition_places(&ranked, |a, b| a.1 == b.1);

    let mut results: Vec<RankedResult> = ranked
        .iter()
        .zip(places)
        .map(|((record, (best_cm, fails_at_best, total_fails)), (place, tied))| {
            RankedResult {
                entry_id: record.entry_id,
                place: Some(place),
                tied,
                status: record.display_status().into(),
                best: Some(Performance::HeightCm(*best_cm)),
                tie_break: TieBreakKey::Height {
                    best_cm: *best_cm,
                    fails_at_best: *fails_at_best,
                    total_fails: *total_fails,
                },
                flags: record.flags,
                legal_best: None,
                wind_assisted: false,
            }
        })
        .collect();

    results.extend(
        state
            .athletes
            .iter()
            .filter(|a| a.best_height().is_none())
            .map(|a| RankedResult::unranked(a.entry_id, a.display_status().into(), a.flags)),
    );

    debug!(
        "Ranked vertical event: {} with a clearance of {} athletes (version {})",
        ranked.len(),
        state.athletes.len(),
        state.version()
    );

    results
}

impl From<VerticalStatus> for ResultStatus {
    fn from(status: VerticalStatus) -> Self {
        match status {
            VerticalStatus::Active => ResultStatus::Active,
            VerticalStatus::Eliminated => ResultStatus::Eliminated,
            VerticalStatus::Retired => ResultStatus::Retired,
            VerticalStatus::NoHeight => ResultStatus::NoHeight,
        }
    }
}
