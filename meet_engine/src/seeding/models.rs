//! Seeding rule and assignment models.

use super::errors::{SeedingError, SeedingResult};
use crate::constants::STANDARD_LANE_COUNTS;
use crate::entries::{ClubId, EntryId};
use serde::{Deserialize, Serialize};

/// How active entries are spread across heats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionStrategy {
    /// Best seeds dealt serpentine across heats
    RankedZigzag,
    /// Shuffled, then dealt round-robin
    Random,
    /// Ranked zigzag followed by a club-separation repair pass
    ClubSeparated,
}

impl std::fmt::Display for DistributionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionStrategy::RankedZigzag => write!(f, "ranked_zigzag"),
            DistributionStrategy::Random => write!(f, "random"),
            DistributionStrategy::ClubSeparated => write!(f, "club_separated"),
        }
    }
}

/// Slots available in one heat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatCapacity {
    /// Track lanes (6, 8 or 9)
    Lanes(u32),
    /// Running-order positions for non-lane disciplines
    Positions(u32),
}

impl HeatCapacity {
    pub fn size(&self) -> u32 {
        match self {
            HeatCapacity::Lanes(n) | HeatCapacity::Positions(n) => *n,
        }
    }
}

/// Order in which lanes are handed out, best seed first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanePolicy {
    /// Middle lanes first, alternating outwards
    CenterOut,
    /// Lane 1 first
    Sequential,
    /// Best seed takes the last position of the heat
    ReverseSequential,
    /// A fixed lane permutation supplied by the organizer
    Explicit(Vec<u32>),
}

/// Named seeding presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingPreset {
    /// Federation standard: zigzag, club separation, center-out lanes
    Federation,
    /// Simplified club meet: zigzag, sequential lanes
    ClubMeet,
    /// School meet: random heats, sequential lanes
    SchoolMeet,
}

impl std::fmt::Display for SeedingPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedingPreset::Federation => write!(f, "federation"),
            SeedingPreset::ClubMeet => write!(f, "club_meet"),
            SeedingPreset::SchoolMeet => write!(f, "school_meet"),
        }
    }
}

/// Seeding configuration, passed explicitly to every seeding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedingRule {
    /// Lanes or positions per heat
    pub capacity: HeatCapacity,
    /// Explicit heat count (computed from capacity when unset)
    pub heat_count: Option<u32>,
    /// Heat distribution strategy
    pub strategy: DistributionStrategy,
    /// Run the club-separation repair pass regardless of strategy
    pub club_separation_enabled: bool,
    /// Lane assignment order within a heat
    pub lane_policy: LanePolicy,
}

impl SeedingRule {
    /// Create a ranked-zigzag rule. Lane events default to center-out lanes,
    /// positional events to sequential order.
    pub fn new(capacity: HeatCapacity) -> Self {
        let lane_policy = match capacity {
            HeatCapacity::Lanes(_) => LanePolicy::CenterOut,
            HeatCapacity::Positions(_) => LanePolicy::Sequential,
        };

        Self {
            capacity,
            heat_count: None,
            strategy: DistributionStrategy::RankedZigzag,
            club_separation_enabled: false,
            lane_policy,
        }
    }

    /// Federation-standard preset
    pub fn federation(lane_count: u32) -> Self {
        Self::new(HeatCapacity::Lanes(lane_count))
            .with_strategy(DistributionStrategy::ClubSeparated)
            .with_club_separation(true)
            .with_lane_policy(LanePolicy::CenterOut)
    }

    /// Simplified club-meet preset
    pub fn club_meet(lane_count: u32) -> Self {
        Self::new(HeatCapacity::Lanes(lane_count)).with_lane_policy(LanePolicy::Sequential)
    }

    /// Fully random school-meet preset
    pub fn school_meet(lane_count: u32) -> Self {
        Self::new(HeatCapacity::Lanes(lane_count))
            .with_strategy(DistributionStrategy::Random)
            .with_lane_policy(LanePolicy::Sequential)
    }

    pub fn from_preset(preset: SeedingPreset, lane_count: u32) -> Self {
        match preset {
            SeedingPreset::Federation => Self::federation(lane_count),
            SeedingPreset::ClubMeet => Self::club_meet(lane_count),
            SeedingPreset::SchoolMeet => Self::school_meet(lane_count),
        }
    }

    pub fn with_heat_count(mut self, heat_count: u32) -> Self {
        self.heat_count = Some(heat_count);
        self
    }

    pub fn with_strategy(mut self, strategy: DistributionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_club_separation(mut self, enabled: bool) -> Self {
        self.club_separation_enabled = enabled;
        self
    }

    pub fn with_lane_policy(mut self, lane_policy: LanePolicy) -> Self {
        self.lane_policy = lane_policy;
        self
    }

    /// Whether the club-separation repair pass runs for this rule
    pub fn separates_clubs(&self) -> bool {
        self.club_separation_enabled || self.strategy == DistributionStrategy::ClubSeparated
    }

    /// Validate the parts of the rule that do not depend on the entries
    pub fn validate(&self) -> SeedingResult<()> {
        let size = self.capacity.size();

        if size < 1 {
            return Err(SeedingError::InvalidCapacity {
                reason: "capacity must be at least 1".to_string(),
            });
        }

        if let HeatCapacity::Lanes(lanes) = self.capacity {
            if !STANDARD_LANE_COUNTS.contains(&lanes) {
                return Err(SeedingError::InvalidCapacity {
                    reason: format!("{lanes} lanes; lane events use {STANDARD_LANE_COUNTS:?}"),
                });
            }
        }

        if let LanePolicy::Explicit(order) = &self.lane_policy {
            let mut sorted = order.clone();
            sorted.sort_unstable();
            if !sorted.iter().copied().eq(1..=size) {
                return Err(SeedingError::InvalidLaneOrder {
                    order: order.clone(),
                    capacity: size,
                });
            }
        }

        Ok(())
    }
}

/// One entry's place on the heat sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatAssignment {
    pub entry_id: EntryId,
    /// Heat number (1-indexed)
    pub heat_number: u32,
    /// Lane or position within the heat (1-indexed)
    pub lane: u32,
    /// Number of entries actually in this heat
    pub heat_size: u32,
}

/// Two or more entries of one club left in the same heat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubConflict {
    pub club_id: ClubId,
    pub heat_number: u32,
    pub entry_ids: Vec<EntryId>,
}

/// Assignments plus what the seeding run did to produce them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedingReport {
    pub assignments: Vec<HeatAssignment>,
    pub heat_count: u32,
    /// Swaps made by the club-separation pass
    pub club_swaps: usize,
    /// Club conflicts the separation pass could not resolve
    pub unresolved_conflicts: Vec<ClubConflict>,
}
