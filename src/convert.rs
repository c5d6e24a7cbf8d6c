//! Conversions between wall clock times and stored instants.
//!
//! Reservation times are stored without applying the CET/CEST offset: the UTC fields of the
//! stored instant are the digits selected by the user. Displaying a stored instant applies the
//! offset in effect at that instant.

use std::fmt;

use crate::datetime::{Instant, WallClockTime};
use crate::error::{InvalidArgument, ParseError};
use crate::rule::{
    check_dst_issue, is_daylight_saving_time_local, zone_designation, DstIssueKind,
    ZoneDesignation,
};
use crate::MILLIS_PER_SECOND;

/// Wall clock time in the Central European time zone, together with its local time type
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LocalDateTime {
    /// Wall clock time, offset applied
    wall_clock: WallClockTime,
    /// Local time type
    zone: ZoneDesignation,
    /// Represented instant
    instant: Instant,
}

impl LocalDateTime {
    /// Returns the wall clock time, offset applied
    pub fn wall_clock(&self) -> WallClockTime {
        self.wall_clock
    }

    /// Returns the local time type
    pub fn zone(&self) -> ZoneDesignation {
        self.zone
    }

    /// Returns the represented instant
    pub fn to_instant(&self) -> Instant {
        self.instant
    }

    /// Returns year
    pub fn year(&self) -> i32 {
        self.wall_clock.year()
    }

    /// Returns month in `[1, 12]`
    pub fn month(&self) -> u8 {
        self.wall_clock.month()
    }

    /// Returns day of the month in `[1, 31]`
    pub fn month_day(&self) -> u8 {
        self.wall_clock.month_day()
    }

    /// Returns hours since midnight in `[0, 23]`
    pub fn hour(&self) -> u8 {
        self.wall_clock.hour()
    }

    /// Returns minutes in `[0, 59]`
    pub fn minute(&self) -> u8 {
        self.wall_clock.minute()
    }

    /// Returns seconds in `[0, 59]`
    pub fn second(&self) -> u8 {
        self.wall_clock.second()
    }

    /// Returns milliseconds in `[0, 999]`
    pub fn millis(&self) -> u16 {
        self.instant.millis()
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{:03}+{:02}:00",
            self.wall_clock,
            self.millis(),
            self.zone.utc_offset_hours()
        )
    }
}

/// Returns the ISO 8601 string of the instant whose UTC fields are exactly the provided fields.
///
/// No offset is applied.
pub fn create_utc_date(
    year: i32,
    month: u8,
    month_day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<String, InvalidArgument> {
    let wall_clock = WallClockTime::new(year, month, month_day, hour, minute, second)?;
    Ok(Instant::from_utc_wall_clock(&wall_clock).to_string())
}

/// Returns the ISO 8601 string used to store a wall clock time selected by a user.
///
/// The UTC hour and minute of the result are the hour and minute of the wall clock time: the
/// CET/CEST offset is deliberately not applied, so that the same digits are stored whatever the
/// time zone of the client.
pub fn preserve_local_time(wall_clock: &WallClockTime) -> String {
    Instant::from_utc_wall_clock(wall_clock).to_string()
}

/// Parse a stored ISO 8601 string and project it to the CET/CEST wall clock for display.
///
/// `2025-06-15T14:30:00.000Z` is displayed as 16:30 and `2025-01-15T14:30:00.000Z` as 15:30.
pub fn extract_local_time(iso: &str) -> Result<LocalDateTime, ParseError> {
    Ok(to_cet_wall_clock(Instant::parse(iso)?))
}

/// Format a stored ISO 8601 string as the `HH:MM` CET/CEST wall clock time
pub fn format_local_time(iso: &str) -> Result<String, ParseError> {
    let local_date_time = extract_local_time(iso)?;
    Ok(format!("{:02}:{:02}", local_date_time.hour(), local_date_time.minute()))
}

/// Project an instant to the CET/CEST wall clock
pub fn to_cet_wall_clock(instant: Instant) -> LocalDateTime {
    let zone = zone_designation(instant);
    let shifted = instant.saturating_add_millis(zone.ut_offset() as i64 * MILLIS_PER_SECOND);

    LocalDateTime { wall_clock: shifted.to_utc_wall_clock(), zone, instant }
}

/// Interpret a wall clock time in the CET/CEST time zone.
///
/// The skipped spring hour is read with the standard offset, so `02:30` becomes `03:30` CEST.
/// The repeated autumn hour resolves to its first occurrence, in summer time.
pub fn to_cet_instant(wall_clock: &WallClockTime) -> Instant {
    let zone = match check_dst_issue(wall_clock).issue_type {
        Some(DstIssueKind::NonExistentHour) => ZoneDesignation::Cet,
        Some(DstIssueKind::AmbiguousHour) => ZoneDesignation::Cest,
        None if is_daylight_saving_time_local(wall_clock) => ZoneDesignation::Cest,
        None => ZoneDesignation::Cet,
    };

    Instant::from_utc_wall_clock(wall_clock)
        .saturating_add_millis(-(zone.ut_offset() as i64) * MILLIS_PER_SECOND)
}
