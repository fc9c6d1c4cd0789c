//! Best-effort club separation.
//!
//! After heats are dealt, entries sharing a club in the same heat are swapped
//! with an entry of the same or an adjacent dealing pass in another heat, but
//! only when the swap leaves neither entry in conflict. A swap across passes
//! never puts two entries of one pass in the same heat, so the fastest heat's
//! worth of entries stays spread one per heat. Every swap removes at
//! least one same-club pair and nothing else is ever moved, so the search is
//! bounded and heat sizes never change. Conflicts with no valid swap are left
//! as dealt and reported back to the caller.

use super::models::ClubConflict;
use crate::entries::{ClubId, EntryId};
use std::collections::BTreeMap;

/// An entry's heat during distribution
#[derive(Debug, Clone)]
pub(super) struct Placement {
    pub entry_id: EntryId,
    pub club_id: Option<ClubId>,
    /// Position in the dealing order (0 = dealt first)
    pub rank: usize,
    /// Dealing pass the entry was dealt in
    pub tier: usize,
    /// Heat index (0-based)
    pub heat: usize,
}

#[derive(Debug, Default)]
pub(super) struct SeparationOutcome {
    pub swaps: usize,
    pub unresolved: Vec<ClubConflict>,
}

/// Swap entries until no conflict-free swap remains.
pub(super) fn separate_clubs(placements: &mut [Placement]) -> SeparationOutcome {
    let mut swaps = 0;

    // Each swap removes a conflicting pair, so the pairs bound the rounds.
    for _ in 0..placements.len() {
        let mut swapped = false;

        // Weakest first: the lower-ranked member of a pair is the one moved.
        for idx in (0..placements.len()).rev() {
            if !in_conflict(placements, idx) {
                continue;
            }

            if let Some(other) = find_swap(placements, idx) {
                let heat = placements[idx].heat;
                placements[idx].heat = placements[other].heat;
                placements[other].heat = heat;
                swaps += 1;
                swapped = true;
            }
        }

        if !swapped {
            break;
        }
    }

    SeparationOutcome {
        swaps,
        unresolved: conflicts(placements),
    }
}

/// Club conflicts remaining, ordered by heat then club
pub(super) fn conflicts(placements: &[Placement]) -> Vec<ClubConflict> {
    let mut groups: BTreeMap<(usize, ClubId), Vec<EntryId>> = BTreeMap::new();
    for placement in placements {
        if let Some(club_id) = placement.club_id {
            groups
                .entry((placement.heat, club_id))
                .or_default()
                .push(placement.entry_id);
        }
    }

    groups
        .into_iter()
        .filter(|(_, entry_ids)| entry_ids.len() > 1)
        .map(|((heat, club_id), entry_ids)| ClubConflict {
            club_id,
            heat_number: heat as u32 + 1,
            entry_ids,
        })
        .collect()
}

fn in_conflict(placements: &[Placement], idx: usize) -> bool {
    match placements[idx].club_id {
        Some(club_id) => club_in_heat(placements, club_id, placements[idx].heat, idx),
        None => false,
    }
}

/// Whether `club_id` appears in `heat` on any entry other than `skip`
fn club_in_heat(placements: &[Placement], club_id: ClubId, heat: usize, skip: usize) -> bool {
    placements
        .iter()
        .enumerate()
        .any(|(i, p)| i != skip && p.heat == heat && p.club_id == Some(club_id))
}

/// Whether an entry of dealing pass `tier` sits in `heat`, other than `skip`
fn tier_in_heat(placements: &[Placement], tier: usize, heat: usize, skip: usize) -> bool {
    placements
        .iter()
        .enumerate()
        .any(|(i, p)| i != skip && p.heat == heat && p.tier == tier)
}

/// Closest-ranked swap partner that resolves `idx` without creating a conflict
fn find_swap(placements: &[Placement], idx: usize) -> Option<usize> {
    let current = &placements[idx];

    placements
        .iter()
        .enumerate()
        .filter(|(j, candidate)| {
            *j != idx
                && candidate.heat != current.heat
                && candidate.tier.abs_diff(current.tier) <= 1
        })
        .filter(|(j, candidate)| {
            let moved_clear = current
                .club_id
                .is_none_or(|club| !club_in_heat(placements, club, candidate.heat, *j));
            let incoming_clear = candidate
                .club_id
                .is_none_or(|club| !club_in_heat(placements, club, current.heat, idx));
            moved_clear && incoming_clear
        })
        // Across passes, each pass keeps at most one entry per heat.
        .filter(|(j, candidate)| {
            candidate.tier == current.tier
                || (!tier_in_heat(placements, current.tier, candidate.heat, *j)
                    && !tier_in_heat(placements, candidate.tier, current.heat, idx))
        })
        .min_by_key(|(j, candidate)| (candidate.rank.abs_diff(current.rank), *j))
        .map(|(j, _)| j)
}
