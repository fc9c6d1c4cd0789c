//! Command bodies: read JSON input, run the engine, hand back the result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use log::{info, warn};
use meet_engine::entries::{EntryId, EntryPool};
use meet_engine::ranking::{
    AttemptLogEntry, Discipline, EventPerformances, FieldEvent, FieldRecord, RankEvent,
    RankedResult, RecordFlags, TrackEvent, TrackRecord, VerticalState, encode_snapshot,
};
use meet_engine::seeding::{
    HeatCapacity, LanePolicy, SeedingReport, SeedingRule, assign_with_report, assign_with_rng,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;

use crate::config::CliConfig;

pub struct SeedArgs {
    pub entries: PathBuf,
    pub positions: Option<u32>,
    pub heats: Option<u32>,
    pub rng_seed: Option<u64>,
}

pub struct RankArgs {
    pub discipline: Discipline,
    pub records: PathBuf,
    pub snapshot: Option<PathBuf>,
}

/// One athlete on a vertical roster
#[derive(Debug, Deserialize)]
struct VerticalEntry {
    entry_id: EntryId,
    #[serde(default)]
    flags: RecordFlags,
}

/// Vertical input: start list plus the attempts recorded so far
#[derive(Debug, Deserialize)]
struct VerticalInput {
    entries: Vec<VerticalEntry>,
    #[serde(default)]
    attempts: Vec<AttemptLogEntry>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Seed the entries in `args.entries` under the configured preset.
pub fn seed(config: &CliConfig, args: &SeedArgs) -> Result<SeedingReport, Error> {
    let pool: EntryPool = read_json(&args.entries)?;

    let mut rule = SeedingRule::from_preset(config.preset, config.lane_count);
    if let Some(positions) = args.positions {
        rule.capacity = HeatCapacity::Positions(positions);
        rule.lane_policy = LanePolicy::Sequential;
    }
    if let Some(heats) = args.heats {
        rule = rule.with_heat_count(heats);
    }

    info!(
        "Seeding {} active entries with preset {}",
        pool.active_count(),
        config.preset
    );

    let report = match args.rng_seed {
        Some(seed) => assign_with_rng(&pool, &rule, &mut StdRng::seed_from_u64(seed))?,
        None => assign_with_report(&pool, &rule)?,
    };
    Ok(report)
}

/// Rank the performances in `args.records`, writing a vertical snapshot if asked.
pub fn rank(config: &CliConfig, args: &RankArgs) -> Result<Vec<RankedResult>, Error> {
    if args.snapshot.is_some() && args.discipline != Discipline::Vertical {
        warn!("--snapshot only applies to vertical events; ignored");
    }

    let event: EventPerformances = match args.discipline {
        Discipline::Track => TrackEvent(read_json::<Vec<TrackRecord>>(&args.records)?).into(),
        Discipline::Field => FieldEvent(read_json::<Vec<FieldRecord>>(&args.records)?).into(),
        Discipline::Vertical => {
            let input: VerticalInput = read_json(&args.records)?;
            let state = VerticalState::replay(
                input.entries.iter().map(|e| (e.entry_id, e.flags)),
                config.elimination_rule,
                &input.attempts,
            )
            .context("Attempt log does not replay")?;

            if let Some(path) = &args.snapshot {
                let bytes = encode_snapshot(&state)?;
                fs::write(path, &bytes)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Wrote {} byte snapshot to {}", bytes.len(), path.display());
            }
            state.into()
        }
    };

    let results = event.rank();
    info!("Ranked {} results ({})", results.len(), event.discipline());
    Ok(results)
}
