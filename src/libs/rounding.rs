//! Snapping of timestamps and minute counts to a fixed interval.
//!
//! All rounding in a report goes through [`round_minutes_offset`], so session
//! boundaries and break totals share one tie-break rule: an exact half
//! interval rounds down.
//!
//! ## Examples
//!
//! ```rust
//! use worklog::libs::rounding::round_minutes_offset;
//!
//! assert_eq!(round_minutes_offset(8, 15), 7);   // 08 -> 15
//! assert_eq!(round_minutes_offset(7, 15), -7);  // 07 -> 00
//! assert_eq!(round_minutes_offset(10, 20), -10); // exact half rounds down
//! ```

use chrono::{Duration, NaiveDateTime, Timelike};

/// Returns the signed offset that moves `minutes` to the nearest multiple
/// of `interval`.
///
/// The remainder is taken with truncating division, so a negative minute
/// count keeps a non-positive remainder and is moved toward zero.
///
/// `interval` must be positive. Settings validation guarantees this for
/// every value that reaches the aggregation engine.
pub fn round_minutes_offset(minutes: i64, interval: u32) -> i64 {
    let interval = i64::from(interval);
    let rest = minutes % interval;

    // rest > interval / 2, without leaving integer arithmetic
    if rest * 2 > interval {
        interval - rest
    } else {
        -rest
    }
}

/// Rounds a timestamp to the nearest interval boundary.
///
/// Seconds and sub-second components are dropped before the minute offset
/// is applied, and the offset may carry into the next hour or day
/// (`23:53` rounds to `00:00` of the following day with a 15 minute
/// interval).
pub fn round_timestamp(timestamp: NaiveDateTime, interval: u32) -> NaiveDateTime {
    let offset = round_minutes_offset(i64::from(timestamp.minute()), interval);
    let truncated =
        timestamp - Duration::seconds(i64::from(timestamp.second())) - Duration::nanoseconds(i64::from(timestamp.nanosecond()));

    truncated + Duration::minutes(offset)
}

/// Rounds a fractional minute count to whole minutes, then to the nearest
/// interval multiple.
///
/// Whole-minute rounding sends ties toward positive infinity, so `-2.5`
/// becomes `-2` and `2.5` becomes `3`.
pub fn round_minute_count(minutes: f64, interval: u32) -> i64 {
    let whole = (minutes + 0.5).floor() as i64;
    whole + round_minutes_offset(whole, interval)
}
