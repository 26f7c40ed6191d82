//! Canonical text forms of a duration.
//!
//! The largest unit in the full form is days, since years and months only
//! have approximate lengths. Components are always written unsigned and a
//! negative duration is prefixed with a single `-`.

use crate::{
    Duration, MILLIS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
    SECONDS_PER_WEEK,
};
use core::fmt::{Display, Write};

const MILLIS_PER_SECOND_U64: u64 = MILLIS_PER_SECOND as u64;

impl Duration {
    /// Returns the full form, e.g. `P1DT12H34M12.987S`.
    ///
    /// A zero duration is `PT0S`. Units are carved out greedily from days
    /// down to seconds, and a value exactly equal to a unit is written in
    /// that unit (`PT1H`, not `PT60M`). When present, the seconds component
    /// always carries three fractional digits.
    pub fn to_full_string(&self) -> String {
        let mut s = String::with_capacity(32);
        // writing to a String does not fail
        let _ = self.write_full(&mut s);
        s
    }

    /// Returns the number of whole weeks, e.g. `P2W`. Any remainder smaller
    /// than a week is truncated, and durations shorter than a week are
    /// `P0W`.
    pub fn to_week_string(&self) -> String {
        let magnitude = self.millis.unsigned_abs();
        let weeks = magnitude / MILLIS_PER_SECOND_U64 / SECONDS_PER_WEEK as u64;

        if weeks == 0 {
            return "P0W".to_string();
        }

        format!("{}P{weeks}W", self.sign())
    }

    fn sign(&self) -> &'static str {
        if self.millis < 0 {
            "-"
        } else {
            ""
        }
    }

    fn write_full<W: Write>(&self, w: &mut W) -> core::fmt::Result {
        if self.millis == 0 {
            return w.write_str("PT0S");
        }

        let magnitude = self.millis.unsigned_abs();
        let mut secs = magnitude / MILLIS_PER_SECOND_U64;
        let millis = magnitude % MILLIS_PER_SECOND_U64;

        write!(w, "{}P", self.sign())?;

        let day = SECONDS_PER_DAY as u64;
        if secs >= day {
            write!(w, "{}D", secs / day)?;
            secs %= day;
        }

        if secs == 0 && millis == 0 {
            return Ok(());
        }

        w.write_char('T')?;

        let hour = SECONDS_PER_HOUR as u64;
        if secs >= hour {
            write!(w, "{}H", secs / hour)?;
            secs %= hour;
        }

        let minute = SECONDS_PER_MINUTE as u64;
        if secs >= minute {
            write!(w, "{}M", secs / minute)?;
            secs %= minute;
        }

        if secs > 0 || millis > 0 {
            write!(w, "{secs}.{millis:03}S")?;
        }

        Ok(())
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        self.write_full(f)
    }
}
