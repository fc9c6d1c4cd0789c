/// Lane counts accepted for lane-based track events.
pub const STANDARD_LANE_COUNTS: [u32; 3] = [6, 8, 9];

/// Attempts (clear, fail or pass) an athlete may take at one height.
pub const MAX_ATTEMPTS_PER_HEIGHT: usize = 3;

/// Failures that eliminate an athlete from a vertical event.
pub const ELIMINATION_FAILURES: usize = 3;

/// Tail wind above which a mark is wind-assisted, in tenths of a metre per second.
pub const LEGAL_WIND_LIMIT_DMPS: i16 = 20;

/// Largest encoded vertical snapshot accepted (1MB).
pub const MAX_SNAPSHOT_SIZE: usize = 1024 * 1024;
