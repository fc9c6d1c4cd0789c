//! Per-discipline performance shapes behind one ranking entry point.
//!
//! Each discipline keeps its own record type, so a track time can never end
//! up in a throw, and each ranking function only sees its own shape.

use super::field::{FieldRecord, rank_field};
use super::models::RankedResult;
use super::track::{TrackRecord, rank_track};
use super::vertical::{VerticalState, rank_vertical};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// Event discipline families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Track,
    Field,
    Vertical,
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::Track => write!(f, "track"),
            Discipline::Field => write!(f, "field"),
            Discipline::Vertical => write!(f, "vertical"),
        }
    }
}

impl std::str::FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "track" => Ok(Discipline::Track),
            "field" => Ok(Discipline::Field),
            "vertical" => Ok(Discipline::Vertical),
            other => Err(format!("unknown discipline '{other}'")),
        }
    }
}

/// Ranking shared by every discipline's performances
#[enum_dispatch]
pub trait RankEvent {
    /// Current results list; ranking never fails on partial data
    #[must_use]
    fn rank(&self) -> Vec<RankedResult>;

    fn discipline(&self) -> Discipline;
}

/// Race results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEvent(pub Vec<TrackRecord>);

/// Horizontal jump or throw series
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvent(pub Vec<FieldRecord>);

impl RankEvent for TrackEvent {
    fn rank(&self) -> Vec<RankedResult> {
        rank_track(&self.0)
    }

    fn discipline(&self) -> Discipline {
        Discipline::Track
    }
}

impl RankEvent for FieldEvent {
    fn rank(&self) -> Vec<RankedResult> {
        rank_field(&self.0)
    }

    fn discipline(&self) -> Discipline {
        Discipline::Field
    }
}

impl RankEvent for VerticalState {
    fn rank(&self) -> Vec<RankedResult> {
        rank_vertical(self)
    }

    fn discipline(&self) -> Discipline {
        Discipline::Vertical
    }
}

/// Performances of one event, tagged by discipline
#[enum_dispatch(RankEvent)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "discipline", content = "performances", rename_all = "lowercase")]
pub enum EventPerformances {
    Track(TrackEvent),
    Field(FieldEvent),
    Vertical(VerticalState),
}
