//! Ride date and boarding time parsing.
//!
//! Dates are entered as "YYYY-MM-DD" or the keyword "today"; boarding times
//! as "HH:MM" on a 24-hour clock, with a single-digit hour ("9:05") allowed.

use chrono::{NaiveDate, NaiveTime};

use super::RideError;
use crate::clock::Clock;

/// Keyword accepted in place of a date, resolved through a [`Clock`].
pub const TODAY_KEYWORD: &str = "today";

/// Length of a time string with a single-digit hour, e.g. "9:05".
const SINGLE_DIGIT_HOUR_TIME_LENGTH: usize = 4;

/// Parse a ride date.
///
/// Surrounding whitespace is ignored. The keyword `today` (any case)
/// resolves to `clock.today()`.
///
/// # Examples
///
/// ```
/// use ride_log::clock::FixedClock;
/// use ride_log::domain::parse_ride_date;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let clock = FixedClock(today);
///
/// assert_eq!(parse_ride_date(" Today ", &clock).unwrap(), today);
/// assert_eq!(
///     parse_ride_date("2023-12-31", &clock).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
/// );
/// assert!(parse_ride_date("2023-02-30", &clock).is_err());
/// assert!(parse_ride_date("31/12/2023", &clock).is_err());
/// ```
pub fn parse_ride_date(raw: &str, clock: &impl Clock) -> Result<NaiveDate, RideError> {
    let s = raw.trim();

    if s.eq_ignore_ascii_case(TODAY_KEYWORD) {
        return Ok(clock.today());
    }

    parse_iso_date(s).ok_or(RideError::InvalidDate)
}

/// Parse a boarding time.
///
/// Surrounding whitespace is ignored. A 4-character input gets a leading
/// zero, so "9:05" reads as 09:05.
///
/// # Examples
///
/// ```
/// use ride_log::domain::parse_boarding_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(
///     parse_boarding_time("9:05").unwrap(),
///     NaiveTime::from_hms_opt(9, 5, 0).unwrap()
/// );
/// assert!(parse_boarding_time("24:00").is_err());
/// assert!(parse_boarding_time("905").is_err());
/// ```
pub fn parse_boarding_time(raw: &str) -> Result<NaiveTime, RideError> {
    let s = raw.trim();

    let padded;
    let s = if s.len() == SINGLE_DIGIT_HOUR_TIME_LENGTH {
        padded = format!("0{s}");
        padded.as_str()
    } else {
        s
    };

    parse_hhmm(s).ok_or(RideError::InvalidTime)
}

/// Strict "YYYY-MM-DD".
fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();

    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let year = parse_digits(&bytes[0..4])?;
    let month = parse_digits(&bytes[5..7])?;
    let day = parse_digits(&bytes[8..10])?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Strict "HH:MM", 24-hour.
fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let bytes = s.as_bytes();

    if bytes.len() != 5 || bytes[2] != b':' {
        return None;
    }

    let hour = parse_digits(&bytes[0..2])?;
    let minute = parse_digits(&bytes[3..5])?;

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse a run of ASCII digit bytes into a u32.
fn parse_digits(bytes: &[u8]) -> Option<u32> {
    bytes.iter().try_fold(0u32, |acc, &b| {
        let d = (b as char).to_digit(10)?;
        Some(acc * 10 + d)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock(date(2024, 3, 1))
    }

    #[test]
    fn parse_valid_dates() {
        assert_eq!(parse_ride_date("2024-01-05", &clock()), Ok(date(2024, 1, 5)));
        assert_eq!(parse_ride_date("2024-02-29", &clock()), Ok(date(2024, 2, 29)));
        assert_eq!(parse_ride_date(" 1999-12-31\n", &clock()), Ok(date(1999, 12, 31)));
    }

    #[test]
    fn today_keyword_uses_clock() {
        assert_eq!(parse_ride_date("today", &clock()), Ok(date(2024, 3, 1)));
        assert_eq!(parse_ride_date("TODAY", &clock()), Ok(date(2024, 3, 1)));
        assert_eq!(parse_ride_date("  ToDay ", &clock()), Ok(date(2024, 3, 1)));

        let other = FixedClock(date(2020, 6, 15));
        assert_eq!(parse_ride_date("today", &other), Ok(date(2020, 6, 15)));
    }

    #[test]
    fn reject_invalid_dates() {
        let c = clock();
        assert_eq!(parse_ride_date("", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("2023-02-29", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("2024-13-01", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("2024-1-05", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("2024/01/05", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("05-01-2024", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("yesterday", &c), Err(RideError::InvalidDate));
        assert_eq!(parse_ride_date("2024-0a-05", &c), Err(RideError::InvalidDate));
    }

    #[test]
    fn parse_valid_times() {
        assert_eq!(parse_boarding_time("00:00"), Ok(time(0, 0)));
        assert_eq!(parse_boarding_time("23:59"), Ok(time(23, 59)));
        assert_eq!(parse_boarding_time(" 14:30 "), Ok(time(14, 30)));
    }

    #[test]
    fn single_digit_hour_gets_leading_zero() {
        assert_eq!(parse_boarding_time("9:05"), Ok(time(9, 5)));
        assert_eq!(parse_boarding_time("  0:00 "), Ok(time(0, 0)));
    }

    #[test]
    fn reject_invalid_times() {
        assert_eq!(parse_boarding_time(""), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("24:00"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("12:60"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("1430"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("14.30"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("9:5"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("12:5"), Err(RideError::InvalidTime));
        assert_eq!(parse_boarding_time("noon"), Err(RideError::InvalidTime));
    }

    #[test]
    fn parse_digits_rejects_non_digits() {
        assert_eq!(parse_digits(b"42"), Some(42));
        assert_eq!(parse_digits(b"2024"), Some(2024));
        assert_eq!(parse_digits(b"4x"), None);
        assert_eq!(parse_digits(b"+4"), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    proptest! {
        /// Every valid HH:MM parses to the same hour and minute
        #[test]
        fn hhmm_roundtrip(h in 0u32..24, m in 0u32..60) {
            let t = parse_boarding_time(&format!("{h:02}:{m:02}")).unwrap();
            prop_assert_eq!(t.hour(), h);
            prop_assert_eq!(t.minute(), m);
        }

        /// Single-digit hours without padding parse the same as padded ones
        #[test]
        fn single_digit_hour(h in 0u32..10, m in 0u32..60) {
            prop_assert_eq!(
                parse_boarding_time(&format!("{h}:{m:02}")),
                parse_boarding_time(&format!("{h:02}:{m:02}"))
            );
        }

        #[test]
        fn out_of_range_hour_rejected(h in 24u32..100, m in 0u32..60) {
            prop_assert_eq!(
                parse_boarding_time(&format!("{h}:{m:02}")),
                Err(RideError::InvalidTime)
            );
        }

        /// Every calendar date survives formatting and parsing
        #[test]
        fn iso_date_roundtrip(days in 0i64..(365 * 200)) {
            let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
            let d = base + chrono::Duration::days(days);
            let clock = crate::clock::FixedClock(base);
            prop_assert_eq!(parse_ride_date(&d.format("%Y-%m-%d").to_string(), &clock), Ok(d));
        }
    }
}
