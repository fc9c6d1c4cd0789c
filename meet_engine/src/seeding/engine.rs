//! Heat distribution and lane assignment.

use super::club::{self, Placement};
use super::errors::{SeedingError, SeedingResult};
use super::models::{DistributionStrategy, HeatAssignment, SeedingReport, SeedingRule};
use crate::entries::{Entry, EntryId, EntryPool, compare_seeds};
use log::{debug, error, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

/// Seed the active entries of `pool` into heats and lanes.
///
/// Seeded strategies are deterministic; [`DistributionStrategy::Random`]
/// draws from the thread RNG.
///
/// # Errors
///
/// * `NoEligibleEntries` - the pool has no active entries
/// * `InvalidCapacity` / `InvalidLaneOrder` - the rule itself is unusable
/// * `InvalidHeatCount` / `CapacityExceeded` - the explicit heat count does
///   not fit the pool
pub fn assign(pool: &EntryPool, rule: &SeedingRule) -> SeedingResult<Vec<HeatAssignment>> {
    assign_with_report(pool, rule).map(|report| report.assignments)
}

/// Like [`assign`], also reporting club swaps and unresolved conflicts.
pub fn assign_with_report(pool: &EntryPool, rule: &SeedingRule) -> SeedingResult<SeedingReport> {
    let mut rng = rand::rng();
    assign_with_rng(pool, rule, &mut rng)
}

/// Seed with a caller-supplied RNG, used only by the random strategy.
pub fn assign_with_rng<R: Rng + ?Sized>(
    pool: &EntryPool,
    rule: &SeedingRule,
    rng: &mut R,
) -> SeedingResult<SeedingReport> {
    rule.validate()?;

    let active: Vec<&Entry> = pool.active().collect();
    if active.is_empty() {
        return Err(SeedingError::NoEligibleEntries);
    }

    let capacity = rule.capacity.size();
    let heat_count = resolve_heat_count(rule, capacity, active.len())?;

    let dealing_order = match rule.strategy {
        DistributionStrategy::Random => {
            let mut order: Vec<usize> = (0..active.len()).collect();
            order.shuffle(rng);
            order
        }
        DistributionStrategy::RankedZigzag | DistributionStrategy::ClubSeparated => {
            ranked_order(&active)
        }
    };

    let mut placements = deal(&active, &dealing_order, heat_count, rule.strategy);

    let (club_swaps, unresolved_conflicts) = if rule.separates_clubs() {
        let outcome = club::separate_clubs(&mut placements);
        if !outcome.unresolved.is_empty() {
            warn!(
                "Club separation left {} conflict(s) across {} heat(s)",
                outcome.unresolved.len(),
                heat_count
            );
        }
        (outcome.swaps, outcome.unresolved)
    } else {
        (0, Vec::new())
    };

    let assignments = assign_lanes(&active, &placements, heat_count, rule);

    if let Err(err) = verify_assignments(&assignments, pool, capacity) {
        error!("Seeding produced an invalid heat sheet: {err}");
        return Err(err);
    }

    debug!(
        "Seeded {} entries into {} heat(s) of {} ({}, {} club swap(s))",
        active.len(),
        heat_count,
        capacity,
        rule.strategy,
        club_swaps
    );

    Ok(SeedingReport {
        assignments,
        heat_count: heat_count as u32,
        club_swaps,
        unresolved_conflicts,
    })
}

fn resolve_heat_count(rule: &SeedingRule, capacity: u32, active: usize) -> SeedingResult<usize> {
    match rule.heat_count {
        Some(requested) => {
            if requested < 1 || requested as usize > active {
                return Err(SeedingError::InvalidHeatCount { requested, active });
            }
            if (requested as usize) * (capacity as usize) < active {
                return Err(SeedingError::CapacityExceeded {
                    heats: requested,
                    capacity,
                    active,
                });
            }
            Ok(requested as usize)
        }
        None => Ok(active.div_ceil(capacity as usize)),
    }
}

/// Indices into `active`, best seed first; unseeded entries keep pool order.
fn ranked_order(active: &[&Entry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..active.len()).collect();
    order.sort_by(|&a, &b| compare_seeds(active[a].seed.as_ref(), active[b].seed.as_ref()));
    order
}

/// Deal entries into heats. Zigzag strategies go serpentine (1..H, H..1, ...),
/// random goes round-robin. Either way heat sizes differ by at most one.
fn deal(
    active: &[&Entry],
    dealing_order: &[usize],
    heat_count: usize,
    strategy: DistributionStrategy,
) -> Vec<Placement> {
    dealing_order
        .iter()
        .enumerate()
        .map(|(rank, &idx)| {
            let tier = rank / heat_count;
            let offset = rank % heat_count;
            let heat = match strategy {
                DistributionStrategy::Random => offset,
                _ if tier % 2 == 0 => offset,
                _ => heat_count - 1 - offset,
            };

            Placement {
                entry_id: active[idx].entry_id,
                club_id: active[idx].club_id,
                rank,
                tier,
                heat,
            }
        })
        .collect()
}

/// Order each heat best seed first and hand out lanes by the rule's policy.
fn assign_lanes(
    active: &[&Entry],
    placements: &[Placement],
    heat_count: usize,
    rule: &SeedingRule,
) -> Vec<HeatAssignment> {
    let pool_order: HashMap<EntryId, usize> = active
        .iter()
        .enumerate()
        .map(|(idx, entry)| (entry.entry_id, idx))
        .collect();

    let mut heats: Vec<Vec<usize>> = vec![Vec::new(); heat_count];
    for placement in placements {
        if let Some(&idx) = pool_order.get(&placement.entry_id) {
            heats[placement.heat].push(idx);
        }
    }

    let mut assignments = Vec::with_capacity(placements.len());
    for (heat_idx, members) in heats.iter_mut().enumerate() {
        members.sort_by(|&a, &b| {
            compare_seeds(active[a].seed.as_ref(), active[b].seed.as_ref()).then(a.cmp(&b))
        });

        let lanes = rule
            .lane_policy
            .lane_order(rule.capacity.size(), members.len());

        for (&idx, lane) in members.iter().zip(lanes) {
            assignments.push(HeatAssignment {
                entry_id: active[idx].entry_id,
                heat_number: heat_idx as u32 + 1,
                lane,
                heat_size: members.len() as u32,
            });
        }
    }

    assignments.sort_by_key(|a| (a.heat_number, a.lane));
    assignments
}

/// Check a heat sheet against the seeding invariants.
///
/// Every active entry appears exactly once and nothing else appears; heat
/// numbers run contiguously from 1; no heat holds more than `capacity`;
/// lanes are unique within a heat and lie in `1..=capacity`; `heat_size`
/// matches the heat's actual size.
pub fn verify_assignments(
    assignments: &[HeatAssignment],
    pool: &EntryPool,
    capacity: u32,
) -> SeedingResult<()> {
    let invariant = |msg: String| Err(SeedingError::InternalInvariant(msg));

    let active: HashSet<EntryId> = pool.active().map(|e| e.entry_id).collect();
    let mut seen = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        if !active.contains(&assignment.entry_id) {
            return invariant(format!("entry {} is not active", assignment.entry_id));
        }
        if !seen.insert(assignment.entry_id) {
            return invariant(format!("entry {} assigned twice", assignment.entry_id));
        }
    }
    if seen.len() != active.len() {
        return invariant(format!(
            "{} of {} active entries assigned",
            seen.len(),
            active.len()
        ));
    }

    let mut heats: HashMap<u32, Vec<&HeatAssignment>> = HashMap::new();
    for assignment in assignments {
        heats.entry(assignment.heat_number).or_default().push(assignment);
    }

    for heat_number in 1..=heats.len() as u32 {
        let Some(members) = heats.get(&heat_number) else {
            return invariant(format!("heat {heat_number} missing"));
        };

        if members.len() > capacity as usize {
            return invariant(format!(
                "heat {heat_number} holds {} entries, capacity {capacity}",
                members.len()
            ));
        }

        let mut lanes = HashSet::with_capacity(members.len());
        for member in members {
            if member.lane < 1 || member.lane > capacity {
                return invariant(format!(
                    "lane {} out of range in heat {heat_number}",
                    member.lane
                ));
            }
            if !lanes.insert(member.lane) {
                return invariant(format!(
                    "lane {} used twice in heat {heat_number}",
                    member.lane
                ));
            }
            if member.heat_size as usize != members.len() {
                return invariant(format!(
                    "heat {heat_number} reports size {} but holds {}",
                    member.heat_size,
                    members.len()
                ));
            }
        }
    }

    Ok(())
}
