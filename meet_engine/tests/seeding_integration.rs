//! Integration tests for heat seeding
//!
//! These tests drive `assign` and `EventSeeding` through whole events: pool
//! in, heat sheet out, with the heat sheet invariants checked on every run.

#[cfg(test)]
mod seeding_tests {
    use meet_engine::entries::{Entry, EntryId, EntryPool, SeedPerformance};
    use meet_engine::seeding::{
        DistributionStrategy, EventSeeding, HeatAssignment, HeatCapacity, HeatSheet, LanePolicy,
        SeedingError, SeedingRule, assign, assign_with_report, assign_with_rng,
        verify_assignments,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    /// Entries 1..=n, entry 1 fastest
    fn sprint_pool(n: i64) -> EntryPool {
        EntryPool::new(
            (1..=n)
                .map(|id| {
                    Entry::new(id).with_seed(SeedPerformance::TimeMs(10_000 + id as u64 * 10))
                })
                .collect(),
        )
        .unwrap()
    }

    fn heat_sizes(assignments: &[HeatAssignment]) -> Vec<usize> {
        let mut sizes: HashMap<u32, usize> = HashMap::new();
        for a in assignments {
            *sizes.entry(a.heat_number).or_default() += 1;
        }
        let mut sizes: Vec<usize> = sizes.into_values().collect();
        sizes.sort_unstable();
        sizes
    }

    fn heat_of(assignments: &[HeatAssignment], entry_id: EntryId) -> u32 {
        assignments
            .iter()
            .find(|a| a.entry_id == entry_id)
            .map(|a| a.heat_number)
            .unwrap()
    }

    #[test]
    fn test_federation_twenty_entries_three_heats() {
        let pool = sprint_pool(20);
        let report = assign_with_report(&pool, &SeedingRule::federation(8)).unwrap();

        assert_eq!(report.heat_count, 3);
        assert_eq!(report.assignments.len(), 20);
        assert_eq!(heat_sizes(&report.assignments), vec![6, 7, 7]);
        verify_assignments(&report.assignments, &pool, 8).unwrap();

        // The three fastest lead three different heats from lane 4
        let leaders: HashSet<u32> = (1..=3).map(|id| heat_of(&report.assignments, id)).collect();
        assert_eq!(leaders.len(), 3);
        for id in 1..=3 {
            let lane = report
                .assignments
                .iter()
                .find(|a| a.entry_id == id)
                .unwrap()
                .lane;
            assert_eq!(lane, 4);
        }
    }

    #[test]
    fn test_center_out_lanes_in_a_short_heat() {
        let pool = sprint_pool(5);
        let assignments = assign(&pool, &SeedingRule::federation(9)).unwrap();

        let lanes: Vec<(EntryId, u32)> = {
            let mut by_seed: Vec<&HeatAssignment> = assignments.iter().collect();
            by_seed.sort_by_key(|a| a.entry_id);
            by_seed.iter().map(|a| (a.entry_id, a.lane)).collect()
        };
        assert_eq!(lanes, vec![(1, 5), (2, 6), (3, 4), (4, 7), (5, 3)]);
        assert!(assignments.iter().all(|a| a.heat_size == 5));
    }

    #[test]
    fn test_withdrawn_entries_never_seeded() {
        let pool = EntryPool::new(vec![
            Entry::new(1).with_seed(SeedPerformance::TimeMs(10_100)),
            Entry::new(2).with_seed(SeedPerformance::TimeMs(10_200)).withdrawn(),
            Entry::new(3),
        ])
        .unwrap();

        let assignments = assign(&pool, &SeedingRule::club_meet(6)).unwrap();
        let ids: HashSet<EntryId> = assignments.iter().map(|a| a.entry_id).collect();
        assert_eq!(ids, HashSet::from([1, 3]));
    }

    #[test]
    fn test_positions_for_non_lane_events() {
        let pool = EntryPool::new(
            (1..=30)
                .map(|id| Entry::new(id).with_seed(SeedPerformance::MarkCm(600 + id as u32)))
                .collect(),
        )
        .unwrap();
        let rule = SeedingRule::new(HeatCapacity::Positions(12));
        let report = assign_with_report(&pool, &rule).unwrap();

        assert_eq!(report.heat_count, 3);
        let sheet = HeatSheet::new(report.assignments);
        for heat in sheet.heats().values() {
            let positions: Vec<u32> = heat.iter().map(|a| a.lane).collect();
            assert_eq!(positions, (1..=10).collect::<Vec<u32>>());
        }

        // Longest mark seeds first
        let first = sheet.heat(1)[0];
        assert_eq!(first.entry_id, 30);
    }

    #[test]
    fn test_club_separation_splits_teammates() {
        // Serpentine over 2 heats puts ranks 1 and 4 together; make them teammates
        let pool = EntryPool::new(
            (1..=8)
                .map(|id| {
                    let club = if id == 1 || id == 4 { 10 } else { 100 + id };
                    Entry::new(id)
                        .with_seed(SeedPerformance::TimeMs(20_000 + id as u64 * 50))
                        .with_club(club)
                })
                .collect(),
        )
        .unwrap();

        let zigzag = assign(&pool, &SeedingRule::club_meet(6)).unwrap();
        assert_eq!(heat_of(&zigzag, 1), heat_of(&zigzag, 4));

        let report = assign_with_report(&pool, &SeedingRule::federation(6)).unwrap();
        assert!(report.club_swaps >= 1);
        assert!(report.unresolved_conflicts.is_empty());
        assert_ne!(
            heat_of(&report.assignments, 1),
            heat_of(&report.assignments, 4)
        );
        assert_eq!(heat_sizes(&report.assignments), vec![4, 4]);
    }

    #[test]
    fn test_club_separation_keeps_fastest_entries_apart() {
        // Clubs by rank: the fastest and slowest share a club, and the only
        // swap that would split them moves the fastest in with the second.
        let clubs = [1, 2, 3, 4, 2, 4, 4, 1];
        let pool = EntryPool::new(
            (1..=8)
                .map(|id| {
                    Entry::new(id)
                        .with_seed(SeedPerformance::TimeMs(10_000 + id as u64 * 10))
                        .with_club(clubs[id as usize - 1])
                })
                .collect(),
        )
        .unwrap();

        let rule = SeedingRule::federation(6).with_heat_count(2);
        let report = assign_with_report(&pool, &rule).unwrap();

        assert_ne!(
            heat_of(&report.assignments, 1),
            heat_of(&report.assignments, 2)
        );
        assert!(!report.unresolved_conflicts.is_empty());
        verify_assignments(&report.assignments, &pool, 6).unwrap();
    }

    #[test]
    fn test_club_separation_is_best_effort() {
        let pool = EntryPool::new((1..=3).map(|id| Entry::new(id).with_club(7)).collect()).unwrap();
        let report = assign_with_report(&pool, &SeedingRule::federation(6)).unwrap();

        assert_eq!(report.heat_count, 1);
        assert_eq!(report.unresolved_conflicts.len(), 1);
        assert_eq!(report.unresolved_conflicts[0].club_id, 7);
        assert_eq!(report.assignments.len(), 3);
    }

    #[test]
    fn test_separation_toggle_on_plain_zigzag() {
        let pool = EntryPool::new(
            (1..=8)
                .map(|id| {
                    let club = if id == 1 || id == 4 { 10 } else { 100 + id };
                    Entry::new(id)
                        .with_seed(SeedPerformance::TimeMs(20_000 + id as u64 * 50))
                        .with_club(club)
                })
                .collect(),
        )
        .unwrap();
        let rule = SeedingRule::club_meet(6).with_club_separation(true);
        assert_eq!(rule.strategy, DistributionStrategy::RankedZigzag);

        let assignments = assign(&pool, &rule).unwrap();
        assert_ne!(heat_of(&assignments, 1), heat_of(&assignments, 4));
    }

    #[test]
    fn test_seeded_strategies_are_deterministic() {
        let pool = sprint_pool(17);
        for rule in [SeedingRule::federation(8), SeedingRule::club_meet(6)] {
            assert_eq!(assign(&pool, &rule).unwrap(), assign(&pool, &rule).unwrap());
        }
    }

    #[test]
    fn test_random_strategy_valid_and_reproducible_with_seed() {
        let pool = sprint_pool(23);
        let rule = SeedingRule::school_meet(8);

        let first = assign_with_rng(&pool, &rule, &mut StdRng::seed_from_u64(7)).unwrap();
        let again = assign_with_rng(&pool, &rule, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, again);

        let unseeded = assign(&pool, &rule).unwrap();
        verify_assignments(&unseeded, &pool, 8).unwrap();
        assert_eq!(heat_sizes(&unseeded), vec![7, 8, 8]);
    }

    #[test]
    fn test_explicit_lane_order() {
        let pool = sprint_pool(3);
        let rule = SeedingRule::club_meet(6)
            .with_lane_policy(LanePolicy::Explicit(vec![3, 4, 2, 5, 1, 6]));
        let assignments = assign(&pool, &rule).unwrap();

        let lanes: HashMap<EntryId, u32> =
            assignments.iter().map(|a| (a.entry_id, a.lane)).collect();
        assert_eq!(lanes[&1], 3);
        assert_eq!(lanes[&2], 4);
        assert_eq!(lanes[&3], 2);
    }

    #[test]
    fn test_rule_and_pool_errors() {
        let empty = EntryPool::new(vec![]).unwrap();
        assert_eq!(
            assign(&empty, &SeedingRule::federation(8)).unwrap_err(),
            SeedingError::NoEligibleEntries
        );

        let all_withdrawn = EntryPool::new(vec![Entry::new(1).withdrawn()]).unwrap();
        assert_eq!(
            assign(&all_withdrawn, &SeedingRule::federation(8)).unwrap_err(),
            SeedingError::NoEligibleEntries
        );

        let pool = sprint_pool(10);
        assert!(matches!(
            assign(&pool, &SeedingRule::federation(7)),
            Err(SeedingError::InvalidCapacity { .. })
        ));
        assert!(matches!(
            assign(&pool, &SeedingRule::new(HeatCapacity::Positions(0))),
            Err(SeedingError::InvalidCapacity { .. })
        ));
        assert_eq!(
            assign(&pool, &SeedingRule::federation(8).with_heat_count(1)).unwrap_err(),
            SeedingError::CapacityExceeded {
                heats: 1,
                capacity: 8,
                active: 10
            }
        );
        assert_eq!(
            assign(&pool, &SeedingRule::federation(8).with_heat_count(11)).unwrap_err(),
            SeedingError::InvalidHeatCount {
                requested: 11,
                active: 10
            }
        );
        assert!(matches!(
            assign(
                &pool,
                &SeedingRule::club_meet(6).with_lane_policy(LanePolicy::Explicit(vec![1, 2, 3]))
            ),
            Err(SeedingError::InvalidLaneOrder { .. })
        ));
    }

    #[test]
    fn test_explicit_heat_count_spreads_evenly() {
        let pool = sprint_pool(10);
        let assignments = assign(&pool, &SeedingRule::federation(8).with_heat_count(4)).unwrap();
        assert_eq!(heat_sizes(&assignments), vec![2, 2, 3, 3]);
    }

    #[test]
    fn test_failed_reseed_keeps_previous_sheet() {
        let pool = sprint_pool(12);
        let mut event = EventSeeding::new();

        event.reseed(&pool, &SeedingRule::federation(8)).unwrap();
        let before = event.current().cloned().unwrap();
        assert_eq!(before.heat_count(), 2);

        let err = event
            .reseed(&pool, &SeedingRule::federation(8).with_heat_count(1))
            .unwrap_err();
        assert!(matches!(err, SeedingError::CapacityExceeded { .. }));
        assert_eq!(event.current(), Some(&before));
        assert_eq!(event.runs(), 1);

        event.reseed(&pool, &SeedingRule::federation(6)).unwrap();
        assert_eq!(event.current().unwrap().heat_count(), 2);
        assert_eq!(event.runs(), 2);
    }

    #[test]
    fn test_pool_from_json() {
        let json = r#"[
            {"entry_id": 1, "seed": {"time_ms": 10480}, "club_id": 3},
            {"entry_id": 2, "bib": "214", "seed": {"time_ms": 10390}},
            {"entry_id": 3, "status": "withdrawn"}
        ]"#;
        let pool: EntryPool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.active_count(), 2);

        let assignments = assign(&pool, &SeedingRule::federation(8)).unwrap();
        assert_eq!(assignments[0].entry_id, 2);
        assert_eq!(assignments[0].lane, 4);
    }

    #[test]
    fn test_duplicate_entries_rejected_in_json() {
        let json = r#"[{"entry_id": 1}, {"entry_id": 1}]"#;
        assert!(serde_json::from_str::<EntryPool>(json).is_err());
    }
}
