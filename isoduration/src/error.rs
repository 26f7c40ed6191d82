use core::fmt::Display;
use thiserror::Error;

/// Errors returned when parsing or converting durations.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid duration string")]
    InvalidDuration,
    #[error("fractional component out of range, must be less than 1000: {0}")]
    FractionOutOfRange(i64),
    #[error("unable to convert {field} value {value} to integer")]
    InvalidInteger { field: Field, value: String },
    #[error("the {field} component overflows the representable range")]
    Overflow { field: Field },
    #[error("overflow converting {millis} milliseconds to nanoseconds")]
    IntervalOverflow { millis: i64 },
}

/// Identifies a single component of a duration string.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum Field {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Years => "years",
            Self::Months => "months",
            Self::Weeks => "weeks",
            Self::Days => "days",
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
            Self::Milliseconds => "milliseconds",
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}
