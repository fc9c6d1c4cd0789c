/// Property-based tests for seeding and ranking using proptest
///
/// These tests check the heat sheet invariants and the ranking guarantees
/// over randomly generated pools and results.
use meet_engine::entries::{Entry, EntryPool, SeedPerformance, compare_seeds};
use meet_engine::ranking::{
    FieldAttempt, FieldRecord, TrackRecord, TrackStatus, rank_field, rank_track,
};
use meet_engine::seeding::{
    DistributionStrategy, HeatCapacity, SeedingRule, assign, assign_with_rng, verify_assignments,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{HashMap, HashSet};

// Strategy to generate a pool of timed entries, some unseeded, some sharing clubs
fn pool_strategy(max: usize) -> impl Strategy<Value = EntryPool> {
    prop::collection::vec(
        (prop::option::weighted(0.85, 9_500u64..14_000), prop::option::of(0i64..6)),
        1..=max,
    )
    .prop_map(|specs| {
        let entries = specs
            .into_iter()
            .enumerate()
            .map(|(idx, (seed, club))| {
                let mut entry = Entry::new(idx as i64 + 1);
                entry.seed = seed.map(SeedPerformance::TimeMs);
                entry.club_id = club;
                entry
            })
            .collect();
        EntryPool::new(entries).unwrap()
    })
}

fn lanes_strategy() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![6u32, 8, 9])
}

fn strategy_strategy() -> impl Strategy<Value = DistributionStrategy> {
    prop_oneof![
        Just(DistributionStrategy::RankedZigzag),
        Just(DistributionStrategy::Random),
        Just(DistributionStrategy::ClubSeparated),
    ]
}

fn track_record_strategy() -> impl Strategy<Value = (Option<u64>, u8)> {
    (prop::option::weighted(0.8, 9_900u64..10_100), 0u8..5)
}

proptest! {
    #[test]
    fn test_heat_sizes_differ_by_at_most_one(
        pool in pool_strategy(60),
        lanes in lanes_strategy(),
        strategy in strategy_strategy(),
    ) {
        let rule = SeedingRule::federation(lanes).with_strategy(strategy);
        let assignments = assign(&pool, &rule).unwrap();

        let mut sizes: HashMap<u32, usize> = HashMap::new();
        for a in &assignments {
            *sizes.entry(a.heat_number).or_default() += 1;
        }
        let max = sizes.values().max().copied().unwrap_or(0);
        let min = sizes.values().min().copied().unwrap_or(0);
        prop_assert!(max - min <= 1, "heat sizes {:?}", sizes);
        prop_assert!(max <= lanes as usize);
    }

    #[test]
    fn test_one_assignment_per_entry_unique_lanes(
        pool in pool_strategy(60),
        lanes in lanes_strategy(),
        strategy in strategy_strategy(),
    ) {
        let rule = SeedingRule::federation(lanes).with_strategy(strategy);
        let assignments = assign(&pool, &rule).unwrap();

        prop_assert_eq!(assignments.len(), pool.active_count());
        let ids: HashSet<_> = assignments.iter().map(|a| a.entry_id).collect();
        prop_assert_eq!(ids.len(), assignments.len());

        let lanes_used: HashSet<_> = assignments.iter().map(|a| (a.heat_number, a.lane)).collect();
        prop_assert_eq!(lanes_used.len(), assignments.len());

        prop_assert!(verify_assignments(&assignments, &pool, lanes).is_ok());
    }

    #[test]
    fn test_zigzag_spreads_fastest_entries(
        pool in pool_strategy(60),
        lanes in lanes_strategy(),
        rule_idx in 0usize..4,
    ) {
        let rule = match rule_idx {
            0 => SeedingRule::club_meet(lanes),
            1 => SeedingRule::federation(lanes),
            2 => SeedingRule::club_meet(lanes).with_strategy(DistributionStrategy::ClubSeparated),
            _ => SeedingRule::club_meet(lanes).with_club_separation(true),
        };
        let assignments = assign(&pool, &rule).unwrap();
        let heat_count = assignments.iter().map(|a| a.heat_number).max().unwrap_or(0) as usize;
        prop_assume!(heat_count >= 2);

        let mut ranked: Vec<&Entry> = pool.active().collect();
        ranked.sort_by(|a, b| compare_seeds(a.seed.as_ref(), b.seed.as_ref()));

        let heats_of_fastest: HashSet<u32> = ranked
            .iter()
            .take(heat_count)
            .map(|e| {
                assignments
                    .iter()
                    .find(|a| a.entry_id == e.entry_id)
                    .map(|a| a.heat_number)
                    .unwrap_or(0)
            })
            .collect();
        prop_assert_eq!(heats_of_fastest.len(), heat_count);
    }

    #[test]
    fn test_seeded_assign_is_deterministic(pool in pool_strategy(40), lanes in lanes_strategy()) {
        let rule = SeedingRule::federation(lanes);
        prop_assert_eq!(assign(&pool, &rule).unwrap(), assign(&pool, &rule).unwrap());
    }

    #[test]
    fn test_random_assign_reproducible_from_seed(pool in pool_strategy(40), seed in any::<u64>()) {
        let rule = SeedingRule::new(HeatCapacity::Positions(10))
            .with_strategy(DistributionStrategy::Random);
        let a = assign_with_rng(&pool, &rule, &mut StdRng::seed_from_u64(seed)).unwrap();
        let b = assign_with_rng(&pool, &rule, &mut StdRng::seed_from_u64(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn test_track_places_follow_times(
        specs in prop::collection::vec(track_record_strategy(), 0..30),
    ) {
        let records: Vec<TrackRecord> = specs
            .iter()
            .enumerate()
            .map(|(idx, (time, status))| match (time, status) {
                (Some(ms), 0..=3) => TrackRecord::finished(idx as i64, *ms),
                (_, 0) => TrackRecord::with_status(idx as i64, TrackStatus::DidNotFinish),
                (_, _) => TrackRecord::with_status(idx as i64, TrackStatus::DidNotStart),
            })
            .collect();

        let results = rank_track(&records);
        prop_assert_eq!(results.len(), records.len());
        prop_assert_eq!(&results, &rank_track(&records));

        // Ranked results come first; places never decrease and equal times share one
        let ranked: Vec<_> = results.iter().take_while(|r| r.place.is_some()).collect();
        prop_assert!(results[ranked.len()..].iter().all(|r| r.place.is_none()));
        for (idx, pair) in ranked.windows(2).enumerate() {
            prop_assert!(pair[0].place <= pair[1].place);
            if pair[0].best == pair[1].best {
                prop_assert_eq!(pair[0].place, pair[1].place);
            } else {
                prop_assert_eq!(pair[1].place, Some(idx as u32 + 2));
            }
        }
    }

    #[test]
    fn test_field_ranking_idempotent(
        series in prop::collection::vec(
            prop::collection::vec(prop::option::of(500u32..900), 0..6),
            0..20,
        ),
    ) {
        let records: Vec<FieldRecord> = series
            .iter()
            .enumerate()
            .map(|(idx, marks)| {
                let attempts = marks
                    .iter()
                    .map(|m| m.map(FieldAttempt::mark).unwrap_or(FieldAttempt::Foul))
                    .collect();
                FieldRecord::new(idx as i64, attempts)
            })
            .collect();

        let results = rank_field(&records);
        prop_assert_eq!(results.len(), records.len());
        prop_assert_eq!(&results, &rank_field(&records));
    }
}
