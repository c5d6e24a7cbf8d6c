//! Types related to a date time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{InvalidArgument, ParseError};
use crate::parse::parse_instant;
use crate::{
    CUMUL_DAY_IN_MONTHS_NORMAL_YEAR, DAYS_PER_WEEK, DAY_IN_MONTHS_NORMAL_YEAR, MILLIS_PER_DAY,
    MILLIS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

/// Lowest year accepted by [`WallClockTime::new`]
pub(crate) const MIN_YEAR: i32 = -999_999;
/// Highest year accepted by [`WallClockTime::new`]
pub(crate) const MAX_YEAR: i32 = 999_999;

/// Calendar date and time of day without any attached time zone.
///
/// A wall clock time is only meaningful relative to the CET/CEST rule: on transition days it may
/// denote zero or two instants.
///
/// Wall clock times are ordered chronologically, field by field.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWallClockTime")]
pub struct WallClockTime {
    /// Year
    year: i32,
    /// Month in `[1, 12]`
    month: u8,
    /// Day of the month in `[1, 31]`
    month_day: u8,
    /// Hours since midnight in `[0, 23]`
    hour: u8,
    /// Minutes in `[0, 59]`
    minute: u8,
    /// Seconds in `[0, 59]`
    second: u8,
}

impl WallClockTime {
    /// Construct a wall clock time
    ///
    /// ## Inputs
    ///
    /// * `year`: Year in `[-999999, 999999]`
    /// * `month`: Month in `[1, 12]`
    /// * `month_day`: Day of the month in `[1, 31]`, bounded by the length of the month
    /// * `hour`: Hours since midnight in `[0, 23]`
    /// * `minute`: Minutes in `[0, 59]`
    /// * `second`: Seconds in `[0, 59]`
    ///
    pub fn new(
        year: i32,
        month: u8,
        month_day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InvalidArgument> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(InvalidArgument("out of range year"));
        }
        if !(1..=12).contains(&month) {
            return Err(InvalidArgument("invalid month"));
        }
        if !(1..=days_in_month(year, month)).contains(&month_day) {
            return Err(InvalidArgument("invalid month day"));
        }
        if hour > 23 {
            return Err(InvalidArgument("invalid hour"));
        }
        if minute > 59 {
            return Err(InvalidArgument("invalid minute"));
        }
        if second > 59 {
            return Err(InvalidArgument("invalid second"));
        }

        Ok(Self { year, month, month_day, hour, minute, second })
    }

    /// Construct a wall clock time at the start of an hour from already validated fields
    pub(crate) const fn from_valid(year: i32, month: u8, month_day: u8, hour: u8) -> Self {
        Self { year, month, month_day, hour, minute: 0, second: 0 }
    }

    /// Returns year
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Returns day of the month in `[1, 31]`
    pub fn month_day(&self) -> u8 {
        self.month_day
    }

    /// Returns hours since midnight in `[0, 23]`
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns minutes in `[0, 59]`
    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns seconds in `[0, 59]`
    pub fn second(&self) -> u8 {
        self.second
    }

    /// Returns the calendar date as `(year, month, month_day)`
    pub fn date(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.month_day)
    }

    /// Returns day of the week in `[0, 6]` from Sunday
    pub fn week_day(&self) -> u8 {
        week_day(days_since_unix_epoch(self.year, self.month as usize, self.month_day as i64))
    }

    /// Returns the Unix time in seconds obtained by reading the fields as UTC
    pub(crate) fn naive_unix_time(&self) -> i64 {
        days_since_unix_epoch(self.year, self.month as usize, self.month_day as i64)
            * SECONDS_PER_DAY
            + self.hour as i64 * SECONDS_PER_HOUR
            + self.minute as i64 * SECONDS_PER_MINUTE
            + self.second as i64
    }

    /// Construct a wall clock time from a Unix time in seconds, reading the result as UTC
    fn from_naive_unix_time(unix_time: i64) -> Self {
        let days = unix_time.div_euclid(SECONDS_PER_DAY);
        let seconds_of_day = unix_time.rem_euclid(SECONDS_PER_DAY);
        let (year, month, month_day) = civil_from_days(days);

        Self {
            year,
            month,
            month_day,
            hour: (seconds_of_day / SECONDS_PER_HOUR) as u8,
            minute: (seconds_of_day % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            second: (seconds_of_day % SECONDS_PER_MINUTE) as u8,
        }
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        format_date(f, self.year, self.month, self.month_day)?;
        write!(f, "T{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Unvalidated wall clock fields, used for deserialization
#[derive(Deserialize)]
struct RawWallClockTime {
    year: i32,
    month: u8,
    month_day: u8,
    hour: u8,
    minute: u8,
    #[serde(default)]
    second: u8,
}

impl std::convert::TryFrom<RawWallClockTime> for WallClockTime {
    type Error = InvalidArgument;

    fn try_from(raw: RawWallClockTime) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.month_day, raw.hour, raw.minute, raw.second)
    }
}

/// Absolute point in time, stored as milliseconds since the Unix epoch in UTC.
///
/// Instants are exchanged as ISO 8601 strings with a `Z` designator and millisecond precision,
/// e.g. `2025-06-15T14:30:00.000Z`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Instant {
    /// Milliseconds since the Unix epoch
    unix_millis: i64,
}

impl Instant {
    /// Construct an instant from milliseconds since the Unix epoch
    pub const fn from_unix_millis(unix_millis: i64) -> Self {
        Self { unix_millis }
    }

    /// Construct an instant from a Unix time in seconds and a millisecond part
    pub fn from_unix_time(unix_time: i64, millis: u16) -> Result<Self, InvalidArgument> {
        if millis >= MILLIS_PER_SECOND as u16 {
            return Err(InvalidArgument("invalid milliseconds"));
        }

        match unix_time.checked_mul(MILLIS_PER_SECOND).and_then(|x| x.checked_add(millis as i64)) {
            Some(unix_millis) => Ok(Self { unix_millis }),
            None => Err(InvalidArgument("out of range unix time")),
        }
    }

    /// Construct the instant whose UTC calendar fields are exactly the provided wall clock fields.
    ///
    /// Exact for every wall clock time accepted by [`WallClockTime::new`]. Wall clock times
    /// projected from instants near the bounds saturate at the bounds.
    pub fn from_utc_wall_clock(wall_clock: &WallClockTime) -> Self {
        Self { unix_millis: wall_clock.naive_unix_time().saturating_mul(MILLIS_PER_SECOND) }
    }

    /// Parse an ISO 8601 date time string
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_instant(s.as_bytes())
    }

    /// Returns milliseconds since the Unix epoch
    pub fn unix_millis(&self) -> i64 {
        self.unix_millis
    }

    /// Returns Unix time in seconds
    pub fn unix_time(&self) -> i64 {
        self.unix_millis.div_euclid(MILLIS_PER_SECOND)
    }

    /// Returns the millisecond part in `[0, 999]`
    pub fn millis(&self) -> u16 {
        self.unix_millis.rem_euclid(MILLIS_PER_SECOND) as u16
    }

    /// Returns the UTC calendar fields of the instant
    pub fn to_utc_wall_clock(&self) -> WallClockTime {
        WallClockTime::from_naive_unix_time(self.unix_time())
    }

    /// Returns the instant shifted by the provided number of milliseconds, saturating at the bounds
    pub(crate) fn saturating_add_millis(&self, millis: i64) -> Self {
        Self { unix_millis: self.unix_millis.saturating_add(millis) }
    }

    /// Returns the number of days until `other`, rounded up, or `0` if `other` is not later
    pub(crate) fn days_until(&self, other: &Self) -> i64 {
        let diff = other.unix_millis.saturating_sub(self.unix_millis);
        if diff <= 0 {
            return 0;
        }
        diff / MILLIS_PER_DAY + (diff % MILLIS_PER_DAY != 0) as i64
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{:03}Z", self.to_utc_wall_clock(), self.millis())
    }
}

impl FromStr for Instant {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Format a calendar date, using the expanded year representation outside of `[0, 9999]`
fn format_date(f: &mut fmt::Formatter, year: i32, month: u8, month_day: u8) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{:04}-{:02}-{:02}", year, month, month_day)
    } else if year < 0 {
        write!(f, "-{:06}-{:02}-{:02}", -(year as i64), month, month_day)
    } else {
        write!(f, "+{:06}-{:02}-{:02}", year, month, month_day)
    }
}

/// Check if a year is a leap year
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Returns the number of days in a month, `month` being in `[1, 12]`
pub(crate) fn days_in_month(year: i32, month: u8) -> u8 {
    let days = DAY_IN_MONTHS_NORMAL_YEAR[month as usize - 1] as u8;
    if month == 2 && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Compute the number of days since Unix epoch (`1970-01-01T00:00:00Z`).
///
/// ## Inputs
///
/// * `year`: Year
/// * `month`: Month in `[1, 12]`
/// * `month_day`: Day of the month in `[1, 31]`
///
pub(crate) fn days_since_unix_epoch(year: i32, month: usize, month_day: i64) -> i64 {
    let is_leap_year = is_leap_year(year);

    let year = year as i64;

    let mut result = (year - 1970) * 365;

    if year >= 1970 {
        result += (year - 1968) / 4;
        result -= (year - 1900) / 100;
        result += (year - 1600) / 400;

        if is_leap_year && month < 3 {
            result -= 1;
        }
    } else {
        result += (year - 1972) / 4;
        result -= (year - 2000) / 100;
        result += (year - 2000) / 400;

        if is_leap_year && month >= 3 {
            result += 1;
        }
    }

    result += CUMUL_DAY_IN_MONTHS_NORMAL_YEAR[month - 1] + month_day - 1;

    result
}

/// Compute the calendar date `(year, month, month_day)` of a number of days since Unix epoch
pub(crate) fn civil_from_days(days: i64) -> (i32, u8, u8) {
    // Eras of 400 years starting on March 1st
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let day_of_era = z.rem_euclid(146_097);
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;

    let month_day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 };
    let year = year_of_era + era * 400 + (month <= 2) as i64;

    (year as i32, month as u8, month_day as u8)
}

/// Returns day of the week in `[0, 6]` from Sunday of a number of days since Unix epoch
pub(crate) fn week_day(days_since_unix_epoch: i64) -> u8 {
    // 1970-01-01 is a Thursday
    (4 + days_since_unix_epoch).rem_euclid(DAYS_PER_WEEK) as u8
}
