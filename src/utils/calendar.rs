//! Calendar constants and day-of-year helpers.

use chrono::{DateTime, Datelike, TimeZone};

/// Average length of a year in days.
pub const DAYS_IN_YEAR: f64 = 365.25;

/// Average length of a month in days.
pub const DAYS_IN_MONTH: f64 = DAYS_IN_YEAR / 12.0;

/// Day of the year (1-based) for each timestamp, as `f64`.
///
/// # Example
///
/// ```
/// use anofox_seasonality::utils::day_of_year;
/// use chrono::{TimeZone, Utc};
///
/// let dates = vec![
///     Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2023, 2, 1, 12, 0, 0).unwrap(),
/// ];
/// assert_eq!(day_of_year(&dates), vec![1.0, 32.0]);
/// ```
pub fn day_of_year<Tz: TimeZone>(dates: &[DateTime<Tz>]) -> Vec<f64> {
    dates.iter().map(|d| d.ordinal() as f64).collect()
}
