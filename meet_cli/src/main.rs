//! Command-line front end for the meet engine.
//!
//! Reads entries or performances from JSON files, runs one engine call and
//! prints the result as JSON on stdout. Logs go to stderr.

mod commands;
mod config;

use anyhow::{Error, bail};
use pico_args::Arguments;
use std::path::PathBuf;

use commands::{RankArgs, SeedArgs};
use config::{CliConfig, ConfigError, parse_elimination_rule};

const HELP: &str = "\
Seed heats and rank results for a track and field meet

USAGE:
  meet_cli seed --entries FILE [OPTIONS]
  meet_cli rank --discipline track|field|vertical --records FILE [OPTIONS]

SEED OPTIONS:
  --entries    FILE        JSON list of entries
  --preset     NAME        federation, club_meet or school_meet
                           [default: env MEET_DEFAULT_PRESET or federation]
  --lanes      N           Lanes per heat (6, 8 or 9)  [default: env MEET_LANE_COUNT or 8]
  --positions  N           Seed into running-order positions instead of lanes
  --heats      N           Explicit heat count  [default: fewest heats that fit]
  --rng-seed   N           Seed for reproducible random draws

RANK OPTIONS:
  --discipline NAME        track, field or vertical
  --records    FILE        JSON performances (vertical: roster and attempt log)
  --elimination NAME       per_height or consecutive
                           [default: env MEET_ELIMINATION_RULE or per_height]
  --snapshot   FILE        Also write the vertical state as a binary snapshot

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  MEET_DEFAULT_PRESET      Seeding preset
  MEET_LANE_COUNT          Lanes per heat
  MEET_ELIMINATION_RULE    Vertical elimination rule
  RUST_LOG                 Log filter (e.g., debug)
";

fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    env_logger::builder().format_target(false).init();

    let subcommand = pargs.subcommand()?;
    match subcommand.as_deref() {
        Some("seed") => {
            let config = CliConfig::from_env(
                pargs.opt_value_from_str("--preset")?,
                pargs.opt_value_from_str("--lanes")?,
            )?;
            config.validate()?;

            let args = SeedArgs {
                entries: required_path(&mut pargs, "--entries", "Pass a JSON list of entries")?,
                positions: pargs.opt_value_from_str("--positions")?,
                heats: pargs.opt_value_from_str("--heats")?,
                rng_seed: pargs.opt_value_from_str("--rng-seed")?,
            };
            reject_leftovers(pargs)?;

            let report = commands::seed(&config, &args)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Some("rank") => {
            let mut config = CliConfig::from_env(None, None)?;
            if let Some(name) = pargs.opt_value_from_str::<_, String>("--elimination")? {
                config.elimination_rule = parse_elimination_rule(&name)?;
            }

            let discipline: String = pargs.value_from_str("--discipline").map_err(|_| {
                ConfigError::MissingRequired {
                    var: "--discipline".to_string(),
                    hint: "One of track, field, vertical".to_string(),
                }
            })?;
            let args = RankArgs {
                discipline: discipline
                    .parse()
                    .map_err(|reason| ConfigError::Invalid {
                        var: "--discipline".to_string(),
                        reason,
                    })?,
                records: required_path(&mut pargs, "--records", "Pass a JSON performance file")?,
                snapshot: pargs.opt_value_from_str("--snapshot")?,
            };
            reject_leftovers(pargs)?;

            let results = commands::rank(&config, &args)?;
            println!("{}", serde_json::to_string_pretty(&results)?);
            Ok(())
        }
        Some(other) => bail!("Unknown command '{other}'\n\n{HELP}"),
        None => {
            print!("{HELP}");
            Ok(())
        }
    }
}

fn required_path(pargs: &mut Arguments, key: &'static str, hint: &str) -> Result<PathBuf, Error> {
    pargs.value_from_str(key).map_err(|_| {
        ConfigError::MissingRequired {
            var: key.to_string(),
            hint: hint.to_string(),
        }
        .into()
    })
}

fn reject_leftovers(pargs: Arguments) -> Result<(), Error> {
    let remaining = pargs.finish();
    if !remaining.is_empty() {
        bail!("Unexpected arguments: {remaining:?}");
    }
    Ok(())
}
