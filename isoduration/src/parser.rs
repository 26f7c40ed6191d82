//! Recursive descent parsers for the two ISO 8601 duration grammars.
//!
//! Parsing happens in two phases. The first phase only recognizes the shape
//! of the input and records the digit runs of each component. The second
//! phase converts the recorded components into a millisecond count with
//! checked arithmetic, which is where integer and range errors are reported.

use crate::{
    Duration, Error, Field, MILLIS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE, SECONDS_PER_MONTH, SECONDS_PER_WEEK, SECONDS_PER_YEAR,
};
use log::{debug, trace};

/// Parse an ISO 8601 duration string.
///
/// The week form (`[+-]P[+-]<n>W`) is tried first, followed by the full form
/// (`[+-]P[nY][nM][nD][T[nH][nM][[+-]n[.f]S]]`). Designators are matched
/// without regard to case.
///
/// The fractional seconds are read as a whole number of milliseconds, so
/// `PT1.98S` is 1098 milliseconds and `PT1.1000S` is rejected.
pub fn parse(input: &str) -> Result<Duration, Error> {
    let bytes = input.as_bytes();

    if let Some(form) = week_form(bytes) {
        trace!("parsing {input:?} as a week duration");
        return form.into_duration();
    }

    if let Some(form) = full_form(bytes) {
        trace!("parsing {input:?} as a full duration");
        return form.into_duration();
    }

    debug!("{input:?} does not match any duration format");
    Err(Error::InvalidDuration)
}

/// A recognized value along with the input that remains after it.
struct Parsed<'i, T> {
    value: T,
    input: &'i [u8],
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    fn get(self) -> i64 {
        match self {
            Self::Positive => 1,
            Self::Negative => -1,
        }
    }
}

/// An optionally signed run of decimal digits.
#[derive(Copy, Clone, Debug)]
struct Number<'i> {
    sign: Sign,
    digits: &'i [u8],
    // sign and digits exactly as written, for error reporting
    text: &'i [u8],
}

impl Number<'_> {
    fn value(&self, field: Field) -> Result<i64, Error> {
        let mut value: i64 = 0;

        for digit in self.digits {
            let digit = i64::from(digit - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| match self.sign {
                    Sign::Positive => v.checked_add(digit),
                    Sign::Negative => v.checked_sub(digit),
                })
                .ok_or_else(|| Error::InvalidInteger {
                    field,
                    value: String::from_utf8_lossy(self.text).into_owned(),
                })?;
        }

        Ok(value)
    }
}

struct WeekForm<'i> {
    sign: Sign,
    weeks: Number<'i>,
}

impl WeekForm<'_> {
    fn into_duration(self) -> Result<Duration, Error> {
        let weeks = self.weeks.value(Field::Weeks)?;

        MILLIS_PER_SECOND
            .checked_mul(SECONDS_PER_WEEK)
            .and_then(|v| v.checked_mul(self.sign.get()))
            .and_then(|v| v.checked_mul(weeks))
            .map(Duration::from_millis)
            .ok_or(Error::Overflow {
                field: Field::Weeks,
            })
    }
}

/// The seconds component, whose sign covers only the whole seconds and the
/// fraction.
struct Seconds<'i> {
    sign: Sign,
    whole: Number<'i>,
    fraction: Option<Number<'i>>,
}

#[derive(Default)]
struct FullForm<'i> {
    sign: Sign,
    years: Option<Number<'i>>,
    months: Option<Number<'i>>,
    days: Option<Number<'i>>,
    hours: Option<Number<'i>>,
    minutes: Option<Number<'i>>,
    seconds: Option<Seconds<'i>>,
}

impl FullForm<'_> {
    fn into_duration(self) -> Result<Duration, Error> {
        let units = [
            (self.years, Field::Years, SECONDS_PER_YEAR),
            (self.months, Field::Months, SECONDS_PER_MONTH),
            (self.days, Field::Days, SECONDS_PER_DAY),
            (self.hours, Field::Hours, SECONDS_PER_HOUR),
            (self.minutes, Field::Minutes, SECONDS_PER_MINUTE),
        ];

        let mut total: i64 = 0;

        for (number, field, seconds) in units {
            let Some(number) = number else {
                continue;
            };

            total = number
                .value(field)?
                .checked_mul(seconds)
                .and_then(|v| total.checked_add(v))
                .ok_or(Error::Overflow { field })?;
        }

        let (seconds_sign, whole, millis) = match self.seconds {
            Some(seconds) => {
                let whole = seconds.whole.value(Field::Seconds)?;
                let millis = match seconds.fraction {
                    Some(fraction) => {
                        let millis = fraction.value(Field::Milliseconds)?;
                        if millis >= MILLIS_PER_SECOND {
                            return Err(Error::FractionOutOfRange(millis));
                        }
                        millis
                    }
                    None => 0,
                };
                (seconds.sign.get(), whole, millis)
            }
            None => (1, 0, 0),
        };

        whole
            .checked_mul(seconds_sign)
            .and_then(|v| total.checked_add(v))
            .and_then(|v| v.checked_mul(MILLIS_PER_SECOND))
            .and_then(|v| v.checked_add(seconds_sign * millis))
            .and_then(|v| v.checked_mul(self.sign.get()))
            .map(Duration::from_millis)
            .ok_or(Error::Overflow {
                field: Field::Seconds,
            })
    }
}

/// `[+-]P[+-]<digits>W`
fn week_form(input: &[u8]) -> Option<WeekForm<'_>> {
    let Parsed { value: sign, input } = sign(input);
    let input = designator(input, b'P')?;
    let Parsed {
        value: weeks,
        input,
    } = component(input, b'W')?;

    input.is_empty().then_some(WeekForm { sign, weeks })
}

/// `[+-]P[<n>Y][<n>M][<n>D][T[<n>H][<n>M][[+-]<digits>[(.|,)<digits>]S]]`
fn full_form(input: &[u8]) -> Option<FullForm<'_>> {
    let Parsed { value: sign, input } = sign(input);
    let mut input = designator(input, b'P')?;

    let mut form = FullForm {
        sign,
        ..Default::default()
    };

    form.years = optional(&mut input, b'Y');
    form.months = optional(&mut input, b'M');
    form.days = optional(&mut input, b'D');

    if let Some(rest) = designator(input, b'T') {
        input = rest;

        form.hours = optional(&mut input, b'H');
        form.minutes = optional(&mut input, b'M');

        if let Some(parsed) = seconds(input) {
            form.seconds = Some(parsed.value);
            input = parsed.input;
        }
    }

    input.is_empty().then_some(form)
}

/// Consume a component with the given designator if one is next, leaving the
/// input untouched otherwise.
fn optional<'i>(input: &mut &'i [u8], unit: u8) -> Option<Number<'i>> {
    let parsed = component(*input, unit)?;
    *input = parsed.input;
    Some(parsed.value)
}

/// `[+-]<digits><unit>`
fn component(input: &[u8], unit: u8) -> Option<Parsed<'_, Number<'_>>> {
    let Parsed {
        value: number,
        input,
    } = number(input)?;
    let input = designator(input, unit)?;

    Some(Parsed {
        value: number,
        input,
    })
}

/// `[+-]<digits>[(.|,)<digits>]S`
fn seconds(input: &[u8]) -> Option<Parsed<'_, Seconds<'_>>> {
    let Parsed {
        value: number,
        input,
    } = number(input)?;

    let whole = Number {
        sign: Sign::Positive,
        digits: number.digits,
        text: number.digits,
    };

    let (fraction, input) = match input.split_first() {
        Some((b'.' | b',', rest)) => {
            let Parsed { value, input } = digits(rest)?;
            let fraction = Number {
                sign: Sign::Positive,
                digits: value,
                text: value,
            };
            (Some(fraction), input)
        }
        _ => (None, input),
    };

    let input = designator(input, b'S')?;

    Some(Parsed {
        value: Seconds {
            sign: number.sign,
            whole,
            fraction,
        },
        input,
    })
}

fn number(input: &[u8]) -> Option<Parsed<'_, Number<'_>>> {
    let start = input;
    let Parsed { value: sign, input } = sign(input);
    let Parsed {
        value: digits,
        input,
    } = digits(input)?;
    let text = &start[..start.len() - input.len()];

    Some(Parsed {
        value: Number { sign, digits, text },
        input,
    })
}

fn sign(input: &[u8]) -> Parsed<'_, Sign> {
    match input.split_first() {
        Some((b'+', rest)) => Parsed {
            value: Sign::Positive,
            input: rest,
        },
        Some((b'-', rest)) => Parsed {
            value: Sign::Negative,
            input: rest,
        },
        _ => Parsed {
            value: Sign::Positive,
            input,
        },
    }
}

/// One or more ASCII digits.
fn digits(input: &[u8]) -> Option<Parsed<'_, &[u8]>> {
    let len = input.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }

    let (value, input) = input.split_at(len);
    Some(Parsed { value, input })
}

fn designator(input: &[u8], designator: u8) -> Option<&[u8]> {
    match input.split_first() {
        Some((byte, rest)) if byte.eq_ignore_ascii_case(&designator) => Some(rest),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(input: &str) -> i64 {
        parse(input).unwrap().as_millis()
    }

    #[test]
    fn weeks() {
        let four_weeks = 4 * SECONDS_PER_WEEK * MILLIS_PER_SECOND;

        assert_eq!(millis("P4W"), 2_419_200_000);
        assert_eq!(millis("-P4W"), -four_weeks);
        assert_eq!(millis("+P-4W"), -four_weeks);
        assert_eq!(millis("-P-4W"), four_weeks);
        assert_eq!(millis("P-4W"), -four_weeks);
        assert_eq!(millis("P+4W"), four_weeks);
        assert_eq!(millis("P0W"), 0);
    }

    #[test]
    fn weeks_are_exclusive() {
        assert_eq!(parse("P4WT13M"), Err(Error::InvalidDuration));
        assert_eq!(parse("P-4WT54S"), Err(Error::InvalidDuration));
        assert_eq!(parse("P1Y4W"), Err(Error::InvalidDuration));
        assert_eq!(parse("P4W1D"), Err(Error::InvalidDuration));
    }

    #[test]
    fn full() {
        assert_eq!(
            millis("P23DT23H"),
            MILLIS_PER_SECOND * (23 * SECONDS_PER_DAY + 23 * SECONDS_PER_HOUR)
        );
        assert_eq!(millis("P4Y"), MILLIS_PER_SECOND * 4 * SECONDS_PER_YEAR);
        assert_eq!(millis("P2M"), MILLIS_PER_SECOND * 2 * SECONDS_PER_MONTH);
        assert_eq!(
            millis("P1DT12H"),
            MILLIS_PER_SECOND * (SECONDS_PER_DAY + 12 * SECONDS_PER_HOUR)
        );
        assert_eq!(millis("PT36H"), MILLIS_PER_SECOND * 36 * SECONDS_PER_HOUR);
        assert_eq!(
            millis("PT36H34M12.987S"),
            MILLIS_PER_SECOND * (36 * SECONDS_PER_HOUR + 34 * SECONDS_PER_MINUTE + 12) + 987
        );
        assert_eq!(
            millis("P1Y2M3DT4H5M6S"),
            MILLIS_PER_SECOND
                * (SECONDS_PER_YEAR
                    + 2 * SECONDS_PER_MONTH
                    + 3 * SECONDS_PER_DAY
                    + 4 * SECONDS_PER_HOUR
                    + 5 * SECONDS_PER_MINUTE
                    + 6)
        );
    }

    #[test]
    fn component_signs() {
        assert_eq!(
            millis("PT36H-34M-12.987S"),
            MILLIS_PER_SECOND * (36 * SECONDS_PER_HOUR - 34 * SECONDS_PER_MINUTE - 12) - 987
        );
        assert_eq!(millis("-PT1H-30M"), -30 * SECONDS_PER_MINUTE * MILLIS_PER_SECOND);
        assert_eq!(millis("P+1D"), SECONDS_PER_DAY * MILLIS_PER_SECOND);
        assert_eq!(millis("PT-1.5S"), -1_005);
        assert_eq!(millis("-PT-1.5S"), 1_005);
    }

    #[test]
    fn fraction() {
        assert_eq!(millis("PT1.987S"), 1_987);
        // the fraction is a count of milliseconds, not a decimal
        assert_eq!(millis("PT1.98S"), 1_098);
        assert_eq!(millis("PT1.0987S"), 1_987);
        assert_eq!(millis("PT1,5S"), 1_005);
        assert_eq!(millis("PT0.999S"), 999);

        assert_eq!(parse("PT1.1000S"), Err(Error::FractionOutOfRange(1000)));
        assert_eq!(parse("PT1.S"), Err(Error::InvalidDuration));
        assert_eq!(parse("PT.5S"), Err(Error::InvalidDuration));
        assert_eq!(parse("PT1.-5S"), Err(Error::InvalidDuration));
    }

    #[test]
    fn empty_components() {
        assert_eq!(millis("P"), 0);
        assert_eq!(millis("PT"), 0);
        assert_eq!(millis("-PT"), 0);
        assert_eq!(millis("PT0S"), 0);
        // a bare time designator is allowed by the grammar
        assert_eq!(millis("P1DT"), SECONDS_PER_DAY * MILLIS_PER_SECOND);
    }

    #[test]
    fn lowercase() {
        assert_eq!(millis("p4w"), millis("P4W"));
        assert_eq!(millis("p1dt2h3m4.5s"), millis("P1DT2H3M4.5S"));
    }

    #[test]
    fn invalid() {
        for input in [
            "",
            "4W",
            "PP",
            "P1",
            "P-",
            "P-D",
            "P1D2Y",
            "PT1H2H",
            "P1H",
            "PT1D",
            "PT36.0H-34M-12.987S",
            "P1D ",
            " P1D",
            "+-P1D",
            "P--1D",
            "P1.5D",
            "PT1.5.5S",
            "PT+-1S",
            "P１D",
        ] {
            assert_eq!(parse(input), Err(Error::InvalidDuration), "input: {input:?}");
        }
    }

    #[test]
    fn integer_overflow() {
        assert_eq!(
            parse("P99999999999999999999D"),
            Err(Error::InvalidInteger {
                field: Field::Days,
                value: "99999999999999999999".to_string(),
            })
        );
        assert_eq!(
            parse("P-99999999999999999999W"),
            Err(Error::InvalidInteger {
                field: Field::Weeks,
                value: "-99999999999999999999".to_string(),
            })
        );
        assert_eq!(
            parse("PT1.99999999999999999999S"),
            Err(Error::InvalidInteger {
                field: Field::Milliseconds,
                value: "99999999999999999999".to_string(),
            })
        );
    }

    #[test]
    fn arithmetic_overflow() {
        assert_eq!(
            parse("P9223372036854775807Y"),
            Err(Error::Overflow {
                field: Field::Years
            })
        );
        assert_eq!(
            parse("P9223372036854775807W"),
            Err(Error::Overflow {
                field: Field::Weeks
            })
        );
        assert_eq!(
            parse("PT9223372036854775807S"),
            Err(Error::Overflow {
                field: Field::Seconds
            })
        );
    }
}
