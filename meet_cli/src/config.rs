//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use meet_engine::constants::STANDARD_LANE_COUNTS;
use meet_engine::ranking::EliminationRule;
use meet_engine::seeding::SeedingPreset;

/// Defaults applied when a command line leaves them out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Seeding preset
    pub preset: SeedingPreset,
    /// Lanes per heat for lane events
    pub lane_count: u32,
    /// Vertical elimination rule
    pub elimination_rule: EliminationRule,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `preset_override` - Optional preset name (from CLI args)
    /// * `lane_count_override` - Optional lane count (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a preset or elimination rule name is not recognised
    pub fn from_env(
        preset_override: Option<String>,
        lane_count_override: Option<u32>,
    ) -> Result<Self, ConfigError> {
        let preset = match preset_override.or_else(|| std::env::var("MEET_DEFAULT_PRESET").ok()) {
            Some(name) => parse_preset(&name)?,
            None => SeedingPreset::Federation,
        };

        let lane_count = lane_count_override.unwrap_or_else(|| parse_env_or("MEET_LANE_COUNT", 8));

        let elimination_rule = match std::env::var("MEET_ELIMINATION_RULE").ok() {
            Some(name) => parse_elimination_rule(&name)?,
            None => EliminationRule::PerHeight,
        };

        Ok(CliConfig {
            preset,
            lane_count,
            elimination_rule,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !STANDARD_LANE_COUNTS.contains(&self.lane_count) {
            return Err(ConfigError::Invalid {
                var: "MEET_LANE_COUNT".to_string(),
                reason: format!("Must be one of {STANDARD_LANE_COUNTS:?}"),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required argument: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

pub fn parse_preset(name: &str) -> Result<SeedingPreset, ConfigError> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "federation" => Ok(SeedingPreset::Federation),
        "club_meet" | "club" => Ok(SeedingPreset::ClubMeet),
        "school_meet" | "school" => Ok(SeedingPreset::SchoolMeet),
        _ => Err(ConfigError::Invalid {
            var: "MEET_DEFAULT_PRESET".to_string(),
            reason: format!("Unknown preset '{name}' (federation, club_meet, school_meet)"),
        }),
    }
}

pub fn parse_elimination_rule(name: &str) -> Result<EliminationRule, ConfigError> {
    match name.to_lowercase().replace('-', "_").as_str() {
        "per_height" => Ok(EliminationRule::PerHeight),
        "consecutive" => Ok(EliminationRule::Consecutive),
        _ => Err(ConfigError::Invalid {
            var: "MEET_ELIMINATION_RULE".to_string(),
            reason: format!("Unknown elimination rule '{name}' (per_height, consecutive)"),
        }),
    }
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
