//! Heat sheets and re-seeding.

use super::engine::assign_with_rng;
use super::errors::SeedingResult;
use super::models::{HeatAssignment, SeedingReport, SeedingRule};
use crate::entries::{EntryId, EntryPool};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Assignments for one event, ordered by heat then lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatSheet {
    assignments: Vec<HeatAssignment>,
}

impl HeatSheet {
    pub fn new(mut assignments: Vec<HeatAssignment>) -> Self {
        assignments.sort_by_key(|a| (a.heat_number, a.lane));
        Self { assignments }
    }

    pub fn assignments(&self) -> &[HeatAssignment] {
        &self.assignments
    }

    pub fn heat_count(&self) -> u32 {
        self.assignments
            .iter()
            .map(|a| a.heat_number)
            .max()
            .unwrap_or(0)
    }

    /// Entries of one heat in lane order
    pub fn heat(&self, heat_number: u32) -> Vec<&HeatAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.heat_number == heat_number)
            .collect()
    }

    pub fn heats(&self) -> BTreeMap<u32, Vec<&HeatAssignment>> {
        let mut heats: BTreeMap<u32, Vec<&HeatAssignment>> = BTreeMap::new();
        for assignment in &self.assignments {
            heats.entry(assignment.heat_number).or_default().push(assignment);
        }
        heats
    }

    pub fn assignment_for(&self, entry_id: EntryId) -> Option<&HeatAssignment> {
        self.assignments.iter().find(|a| a.entry_id == entry_id)
    }
}

/// The current heat sheet of an event.
///
/// Re-seeding replaces the sheet only when the new run succeeds; a failed
/// run leaves the previous sheet in place.
#[derive(Debug, Clone, Default)]
pub struct EventSeeding {
    sheet: Option<HeatSheet>,
    runs: u32,
}

impl EventSeeding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&HeatSheet> {
        self.sheet.as_ref()
    }

    /// Successful seeding runs so far
    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn reseed(&mut self, pool: &EntryPool, rule: &SeedingRule) -> SeedingResult<SeedingReport> {
        let mut rng = rand::rng();
        self.reseed_with_rng(pool, rule, &mut rng)
    }

    pub fn reseed_with_rng<R: Rng + ?Sized>(
        &mut self,
        pool: &EntryPool,
        rule: &SeedingRule,
        rng: &mut R,
    ) -> SeedingResult<SeedingReport> {
        let report = assign_with_rng(pool, rule, rng)?;

        if self.sheet.is_some() {
            info!("Replacing heat sheet ({} heats)", report.heat_count);
        }
        self.sheet = Some(HeatSheet::new(report.assignments.clone()));
        self.runs += 1;

        Ok(report)
    }

    pub fn clear(&mut self) {
        self.sheet = None;
    }
}
