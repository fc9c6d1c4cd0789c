//! Compact binary persistence for vertical events.
//!
//! A snapshot stores the roster, the elimination rule and the attempt log,
//! never derived state. Decoding replays the log, so a snapshot that would
//! not replay cleanly is rejected rather than loaded half-way.

use super::errors::{SnapshotError, SnapshotResult};
use super::vertical::{VerticalSnapshot, VerticalState};
use crate::constants::MAX_SNAPSHOT_SIZE;
use bincode::config;
use bincode::serde::{decode_from_slice, encode_to_vec};
use log::debug;

/// Encode a vertical event's state
pub fn encode_snapshot(state: &VerticalState) -> SnapshotResult<Vec<u8>> {
    let bytes = encode_to_vec(state.to_snapshot(), config::standard())?;
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::TooLarge {
            actual: bytes.len(),
            max: MAX_SNAPSHOT_SIZE,
        });
    }

    debug!(
        "Encoded vertical snapshot: {} attempts in {} bytes",
        state.version(),
        bytes.len()
    );
    Ok(bytes)
}

/// Decode and replay a vertical event's state
pub fn decode_snapshot(bytes: &[u8]) -> SnapshotResult<VerticalState> {
    if bytes.len() > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::TooLarge {
            actual: bytes.len(),
            max: MAX_SNAPSHOT_SIZE,
        });
    }

    let (snapshot, _): (VerticalSnapshot, usize) = decode_from_slice(bytes, config::standard())?;
    Ok(VerticalState::from_snapshot(snapshot)?)
}
