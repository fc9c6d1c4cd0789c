//! Ranked result models shared by every discipline.

use crate::entries::EntryId;
use serde::{Deserialize, Serialize};

/// Status shown next to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultStatus {
    /// Still competing
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "finished")]
    Finished,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "eliminated")]
    Eliminated,
    #[serde(rename = "DNS")]
    DidNotStart,
    #[serde(rename = "DNF")]
    DidNotFinish,
    #[serde(rename = "DQ")]
    Disqualified,
    #[serde(rename = "FS")]
    FalseStart,
    #[serde(rename = "NM")]
    NoMark,
    #[serde(rename = "ND")]
    NoDistance,
    #[serde(rename = "NH")]
    NoHeight,
}

impl ResultStatus {
    /// Whether the status ends the athlete's competition without a result
    pub fn is_terminal_without_result(&self) -> bool {
        matches!(
            self,
            ResultStatus::DidNotStart
                | ResultStatus::DidNotFinish
                | ResultStatus::Disqualified
                | ResultStatus::FalseStart
                | ResultStatus::NoMark
                | ResultStatus::NoDistance
                | ResultStatus::NoHeight
        )
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            ResultStatus::Active => "active",
            ResultStatus::Finished => "finished",
            ResultStatus::Complete => "complete",
            ResultStatus::Retired => "retired",
            ResultStatus::Eliminated => "eliminated",
            ResultStatus::DidNotStart => "DNS",
            ResultStatus::DidNotFinish => "DNF",
            ResultStatus::Disqualified => "DQ",
            ResultStatus::FalseStart => "FS",
            ResultStatus::NoMark => "NM",
            ResultStatus::NoDistance => "ND",
            ResultStatus::NoHeight => "NH",
        };
        write!(f, "{repr}")
    }
}

/// The performance a result is ranked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Performance {
    TimeMs(u64),
    DistanceCm(u32),
    HeightCm(u32),
}

impl std::fmt::Display for Performance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Performance::TimeMs(ms) => write!(f, "{}.{:03}", ms / 1000, ms % 1000),
            Performance::DistanceCm(cm) | Performance::HeightCm(cm) => {
                write!(f, "{}.{:02}", cm / 100, cm % 100)
            }
        }
    }
}

/// Everything that decided a result's order, in comparison order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakKey {
    /// Unranked
    #[default]
    None,
    /// Finish time
    Time(u64),
    /// Valid marks, best first
    Countback(Vec<u32>),
    /// Best height, failures there, failures overall
    Height {
        best_cm: u32,
        fails_at_best: usize,
        total_fails: usize,
    },
}

/// Record flags computed elsewhere and carried through untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordFlags {
    #[serde(default)]
    pub personal_best: bool,
    #[serde(default)]
    pub season_best: bool,
}

/// One line of a results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    pub entry_id: EntryId,
    /// Place (None when unranked)
    pub place: Option<u32>,
    /// Shares its place with another result
    pub tied: bool,
    pub status: ResultStatus,
    /// Best performance, if any
    pub best: Option<Performance>,
    pub tie_break: TieBreakKey,
    pub flags: RecordFlags,
    /// Best wind-legal mark (horizontal events only)
    pub legal_best: Option<Performance>,
    /// Best mark was achieved with an illegal tail wind
    pub wind_assisted: bool,
}

impl RankedResult {
    /// An unranked line carrying only a status
    pub fn unranked(entry_id: EntryId, status: ResultStatus, flags: RecordFlags) -> Self {
        Self {
            entry_id,
            place: None,
            tied: false,
            status,
            best: None,
            tie_break: TieBreakKey::None,
            flags,
            legal_best: None,
            wind_assisted: false,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.place.is_some()
    }
}
