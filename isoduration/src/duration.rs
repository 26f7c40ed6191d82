use crate::{Error, NANOS_PER_MILLI};
use core::str::FromStr;

/// A duration represents a signed span of time. The internal representation
/// is a single `i64` count of milliseconds, which allows for spans of roughly
/// 292 million years in either direction.
///
/// Durations are produced by parsing ISO 8601 text, by converting from a
/// nanosecond interval, or directly from a millisecond count.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    pub(crate) millis: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { millis: 0 };

    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// Create a duration from a nanosecond count, truncating toward zero.
    pub const fn from_nanos(nanos: i64) -> Self {
        Self {
            millis: nanos / NANOS_PER_MILLI,
        }
    }

    /// Create a duration from a `time::Duration`, truncating any
    /// sub-millisecond part toward zero. Intervals beyond the representable
    /// range saturate.
    pub fn from_interval(interval: time::Duration) -> Self {
        let millis = interval.whole_milliseconds();
        let millis = millis.clamp(i64::MIN as i128, i64::MAX as i128) as i64;

        Self { millis }
    }

    pub const fn as_millis(&self) -> i64 {
        self.millis
    }

    /// Returns the duration as a nanosecond count.
    ///
    /// # Errors
    /// Returns [`Error::IntervalOverflow`] unless the millisecond count lies
    /// strictly between `i64::MIN / 1_000_000` and `i64::MAX / 1_000_000`.
    pub fn as_nanos(&self) -> Result<i64, Error> {
        if self.millis >= i64::MAX / NANOS_PER_MILLI || self.millis <= i64::MIN / NANOS_PER_MILLI {
            return Err(Error::IntervalOverflow {
                millis: self.millis,
            });
        }

        Ok(self.millis * NANOS_PER_MILLI)
    }

    /// Returns the duration as a `time::Duration`. The range is bounded the
    /// same way as [`Duration::as_nanos`].
    pub fn to_interval(&self) -> Result<time::Duration, Error> {
        self.as_nanos().map(time::Duration::nanoseconds)
    }

    pub const fn is_zero(&self) -> bool {
        self.millis == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.millis < 0
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse(s)
    }
}

impl From<time::Duration> for Duration {
    fn from(other: time::Duration) -> Self {
        Duration::from_interval(other)
    }
}

impl TryFrom<Duration> for time::Duration {
    type Error = Error;

    fn try_from(other: Duration) -> Result<Self, Self::Error> {
        other.to_interval()
    }
}
