//! Lane and position ordering within a heat.

use super::models::LanePolicy;

/// Lanes from the middle outwards: the centre lane (the lower of the two
/// middle lanes on an even track), then one outside, one inside, and so on.
///
/// 8 lanes give `[4, 5, 3, 6, 2, 7, 1, 8]`, 9 lanes `[5, 6, 4, 7, 3, 8, 2, 9, 1]`.
/// Lanes are produced on demand, so taking a few from a large capacity is cheap.
pub fn center_out(lane_count: u32) -> impl Iterator<Item = u32> {
    let center = lane_count.div_ceil(2);

    // Both sides of the centre alternate without gaps until the last lane.
    (0..lane_count).map(move |k| match k {
        0 => center,
        k if k % 2 == 1 => center + k.div_ceil(2),
        k => center - k / 2,
    })
}

impl LanePolicy {
    /// Lanes to hand out, best seed first, for a heat of `heat_size` entries.
    ///
    /// The returned list has exactly `heat_size` distinct lanes, all within
    /// `1..=capacity`. `heat_size` never exceeds `capacity`.
    pub fn lane_order(&self, capacity: u32, heat_size: usize) -> Vec<u32> {
        match self {
            LanePolicy::CenterOut => center_out(capacity).take(heat_size).collect(),
            LanePolicy::Sequential => (1..=heat_size as u32).collect(),
            LanePolicy::ReverseSequential => (1..=heat_size as u32).rev().collect(),
            LanePolicy::Explicit(order) => order.iter().copied().take(heat_size).collect(),
        }
    }
}
