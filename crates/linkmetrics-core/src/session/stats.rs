//! Streaming-audio session statistics
//!
//! The audio pipeline reports partial measurements repeatedly over a
//! session's lifetime; each report is folded into one running record. On
//! the wire, `0` on any field means "no observation yet", and the merge
//! treats it as the identity so repeated partial merges stay
//! order-independent.

use serde::{Deserialize, Serialize};

/// Statistics for the streaming-audio half of a link session.
///
/// All fields default to `0`, the "no observation" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AudioSessionStats {
    /// Total audio streaming time in milliseconds
    pub audio_duration_ms: i64,
    /// Shortest observed media-timer interval in milliseconds
    pub media_timer_min_ms: i64,
    /// Longest observed media-timer interval in milliseconds
    pub media_timer_max_ms: i64,
    /// Mean media-timer interval, weighted by `total_scheduling_count`
    pub media_timer_avg_ms: f64,
    /// Scheduling events behind `media_timer_avg_ms`
    pub total_scheduling_count: i64,
    /// Largest single buffer-overrun burst
    pub buffer_overruns_max_count: i32,
    /// Buffer overruns across the session
    pub buffer_overruns_total: i32,
    /// Mean underrun depth, weighted by `buffer_underruns_count`
    pub buffer_underruns_average: f64,
    /// Underrun observations behind `buffer_underruns_average`
    pub buffer_underruns_count: i64,
}

impl AudioSessionStats {
    /// True when every field still holds the sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Combine two stat records field by field.
    ///
    /// Sums add unconditionally; extrema coalesce around the `0` sentinel;
    /// a weighted average drops a side whose average or weight is absent,
    /// otherwise combines as `(a*na + b*nb) / (na + nb)`. Absence is the
    /// identity, and on present fields the operation is associative and
    /// commutative, so partial reports may arrive in any order and
    /// grouping.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let media_timer = merge_weighted(
            Weighted::observed(self.media_timer_avg_ms, self.total_scheduling_count),
            Weighted::observed(other.media_timer_avg_ms, other.total_scheduling_count),
        );
        let underruns = merge_weighted(
            Weighted::observed(self.buffer_underruns_average, self.buffer_underruns_count),
            Weighted::observed(other.buffer_underruns_average, other.buffer_underruns_count),
        );

        Self {
            audio_duration_ms: self.audio_duration_ms + other.audio_duration_ms,
            media_timer_min_ms: coalesce(self.media_timer_min_ms, other.media_timer_min_ms, i64::min),
            media_timer_max_ms: coalesce(self.media_timer_max_ms, other.media_timer_max_ms, i64::max),
            media_timer_avg_ms: media_timer.map_or(0.0, |w| w.avg),
            total_scheduling_count: media_timer.map_or(0, |w| w.count),
            buffer_overruns_max_count: coalesce(
                self.buffer_overruns_max_count,
                other.buffer_overruns_max_count,
                i32::max,
            ),
            buffer_overruns_total: self.buffer_overruns_total + other.buffer_overruns_total,
            buffer_underruns_average: underruns.map_or(0.0, |w| w.avg),
            buffer_underruns_count: underruns.map_or(0, |w| w.count),
        }
    }
}

/// Pick the present side around the `0` sentinel, or combine when both are.
fn coalesce<T: PartialEq + Default>(a: T, b: T, combine: fn(T, T) -> T) -> T {
    if a == T::default() {
        b
    } else if b == T::default() {
        a
    } else {
        combine(a, b)
    }
}

/// A weighted average that is known to have been observed.
#[derive(Debug, Clone, Copy)]
struct Weighted {
    avg: f64,
    count: i64,
}

impl Weighted {
    /// Lift a (value, weight) pair out of the wire convention; either half
    /// at `0` means the pair was never observed.
    fn observed(avg: f64, count: i64) -> Option<Self> {
        (avg != 0.0 && count != 0).then_some(Self { avg, count })
    }
}

fn merge_weighted(a: Option<Weighted>, b: Option<Weighted>) -> Option<Weighted> {
    match (a, b) {
        (Some(a), Some(b)) => {
            let count = a.count + b.count;
            Some(Weighted {
                avg: (a.avg * a.count as f64 + b.avg * b.count as f64) / count as f64,
                count,
            })
        }
        (side, None) | (None, side) => side,
    }
}
