//! Utility functions.

pub mod calendar;

pub use calendar::{day_of_year, DAYS_IN_MONTH, DAYS_IN_YEAR};
