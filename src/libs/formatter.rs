//! Fractional-hour formatting for report cells.
//!
//! Durations are written as decimal hours with a decimal comma, the way
//! German timesheet templates expect them:
//!
//! - 495 minutes → `"8,25"`
//! - 45 minutes → `"0,75"`
//! - 480 minutes → `"8"`
//! - 20 minutes → `"0,3333333333333333"`
//!
//! The number is printed with the shortest representation that round-trips,
//! so whole hours carry no fraction and thirds keep full precision.

/// Separator used in place of the decimal point.
pub const DECIMAL_SEPARATOR: char = ',';

/// Converts a minute count into fractional hours with a decimal comma.
///
/// Hours and the minute remainder use Euclidean division, so negative
/// inputs keep their exact value: -45 minutes is written as `"-0,75"`.
///
/// # Examples
///
/// ```rust
/// use worklog::libs::formatter::format_duration;
///
/// assert_eq!(format_duration(495), "8,25");
/// assert_eq!(format_duration(0), "0");
/// assert_eq!(format_duration(-45), "-0,75");
/// ```
pub fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes.div_euclid(60);
    let minutes_fraction = total_minutes.rem_euclid(60) as f64 / 60.0;

    (hours as f64 + minutes_fraction).to_string().replace('.', &DECIMAL_SEPARATOR.to_string())
}
