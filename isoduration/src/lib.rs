//! This crate parses and formats ISO 8601 durations such as `P4W` or
//! `PT36H34M12.987S`. Every duration is normalized to a single signed count of
//! milliseconds, which makes the parsed values cheap to store, compare, and
//! convert.
//!
//! ```
//! use isoduration::Duration;
//!
//! let duration: Duration = "PT36H34M12.987S".parse().unwrap();
//! assert_eq!(duration.as_millis(), 131_652_987);
//! assert_eq!(duration.to_full_string(), "P1DT12H34M12.987S");
//! assert_eq!(duration.to_week_string(), "P0W");
//! ```
//!
//! Two textual forms are recognized. The week form (`P<n>W`) cannot be
//! combined with any other component. The full form
//! (`P[nY][nM][nD][T[nH][nM][n[.f]S]]`) allows every component to carry its
//! own sign, which compounds with the sign placed before the `P`.
//!
//! The calendar is not modeled. Years are always 365 days long and months are
//! always 30 days long.

mod duration;
mod error;
mod format;
mod parser;

#[cfg(feature = "serde-serialize")]
mod serialize;

pub use duration::Duration;
pub use error::{Error, Field};
pub use parser::parse;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;
/// Approximated as 30 days.
pub const SECONDS_PER_MONTH: i64 = 30 * SECONDS_PER_DAY;
/// Approximated as 365 days.
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const NANOS_PER_MILLI: i64 = 1_000_000;
