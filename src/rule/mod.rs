//! Central European daylight saving time rule.
//!
//! Daylight Saving Time starts on the last Sunday of March at 02:00 CET and ends on the last
//! Sunday of October at 03:00 CEST, both transitions happening at 01:00 UTC. The transition
//! dates are computed with calendar arithmetic, independently of any system time zone database.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::datetime::{days_in_month, days_since_unix_epoch, week_day, Instant, WallClockTime};
use crate::error::InvalidArgument;
use crate::{DAYS_PER_WEEK, MILLIS_PER_SECOND, SECONDS_PER_DAY, SECONDS_PER_HOUR};

#[cfg(test)]
mod tests;

/// Transition time in UTC for both transitions, in seconds since midnight
const TRANSITION_TIME_IN_UTC: i64 = SECONDS_PER_HOUR;

/// Last Sunday of March
const SPRING_RULE_DAY: MonthWeekDay = MonthWeekDay { month: 3, week: 5, week_day: 0 };
/// Last Sunday of October
const FALL_RULE_DAY: MonthWeekDay = MonthWeekDay { month: 10, week: 5, week_day: 0 };

/// Direction of a Daylight Saving Time transition
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transition {
    /// Start of Daylight Saving Time, clocks jump from 02:00 to 03:00
    SpringForward,
    /// End of Daylight Saving Time, clocks go back from 03:00 to 02:00
    FallBack,
}

impl Transition {
    /// Returns `true` for the spring transition
    pub fn is_spring(&self) -> bool {
        *self == Self::SpringForward
    }

    fn rule_day(&self) -> MonthWeekDay {
        match self {
            Self::SpringForward => SPRING_RULE_DAY,
            Self::FallBack => FALL_RULE_DAY,
        }
    }

    /// Local hour at which the clocks are changed
    fn local_hour(&self) -> u8 {
        match self {
            Self::SpringForward => 2,
            Self::FallBack => 3,
        }
    }
}

/// Day represented by a month, a month week and a week day
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct MonthWeekDay {
    /// Month in `[1, 12]`
    month: u8,
    /// Week of the month in `[1, 5]`, with `5` representing the last week of the month
    week: u8,
    /// Day of the week in `[0, 6]` from Sunday
    week_day: u8,
}

impl MonthWeekDay {
    /// Get the day of the month of the transition for the provided year, in `[1, 31]`
    fn month_day(&self, year: i32) -> u8 {
        let day_in_month = days_in_month(year, self.month) as i64;

        let week_day_of_first_month_day =
            week_day(days_since_unix_epoch(year, self.month as usize, 1)) as i64;
        let first_week_day_occurence_in_month =
            1 + (self.week_day as i64 - week_day_of_first_month_day).rem_euclid(DAYS_PER_WEEK);

        let mut month_day =
            first_week_day_occurence_in_month + (self.week as i64 - 1) * DAYS_PER_WEEK;
        if month_day > day_in_month {
            month_day -= DAYS_PER_WEEK
        }

        month_day as u8
    }
}

/// Returns the day of the month of the last Sunday of a month, `month` being in `[1, 12]`
pub fn last_sunday(year: i32, month: u8) -> Result<u8, InvalidArgument> {
    if !(1..=12).contains(&month) {
        return Err(InvalidArgument("invalid month"));
    }

    Ok(MonthWeekDay { month, week: 5, week_day: 0 }.month_day(year))
}

/// Occurrence of a Daylight Saving Time transition in a given year
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionEvent {
    /// Year
    year: i32,
    /// Month in `[1, 12]`
    month: u8,
    /// Day of the month in `[1, 31]`
    month_day: u8,
    /// Transition direction
    transition: Transition,
}

impl TransitionEvent {
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

    /// Returns transition direction
    pub fn transition(&self) -> Transition {
        self.transition
    }

    /// Returns the local date of the transition as `(year, month, month_day)`
    pub fn local_date(&self) -> (i32, u8, u8) {
        (self.year, self.month, self.month_day)
    }

    /// Returns the local wall clock time at which the clocks are changed: 02:00 in spring and
    /// 03:00 in autumn
    pub fn wall_clock(&self) -> WallClockTime {
        WallClockTime::from_valid(
            self.year,
            self.month,
            self.month_day,
            self.transition.local_hour(),
        )
    }

    /// Returns the instant of the transition, saturating at the bounds of [`Instant`]
    pub fn instant(&self) -> Instant {
        Instant::from_unix_millis(self.unix_time().saturating_mul(MILLIS_PER_SECOND))
    }

    /// Returns the Unix time in seconds of the transition
    fn unix_time(&self) -> i64 {
        let day = days_since_unix_epoch(self.year, self.month as usize, self.month_day as i64);
        day * SECONDS_PER_DAY + TRANSITION_TIME_IN_UTC
    }
}

/// Returns the transition event of the provided direction for a year
pub fn transition_event(year: i32, transition: Transition) -> TransitionEvent {
    let rule_day = transition.rule_day();
    TransitionEvent { year, month: rule_day.month, month_day: rule_day.month_day(year), transition }
}

/// Local time type of the Central European time zone
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum ZoneDesignation {
    /// Central European Time, UTC+1
    #[serde(rename = "CET")]
    Cet,
    /// Central European Summer Time, UTC+2
    #[serde(rename = "CEST")]
    Cest,
}

impl ZoneDesignation {
    /// Returns offset from UTC in hours
    pub fn utc_offset_hours(&self) -> i8 {
        match self {
            Self::Cet => 1,
            Self::Cest => 2,
        }
    }

    /// Returns offset from UTC in seconds
    pub fn ut_offset(&self) -> i32 {
        self.utc_offset_hours() as i32 * SECONDS_PER_HOUR as i32
    }

    /// Returns daylight saving time indicator
    pub fn is_dst(&self) -> bool {
        *self == Self::Cest
    }

    /// Returns time zone designation
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cet => "CET",
            Self::Cest => "CEST",
        }
    }
}

impl fmt::Display for ZoneDesignation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check if Daylight Saving Time is in effect at the provided instant
pub fn is_daylight_saving_time(instant: Instant) -> bool {
    let unix_time = instant.unix_time();
    let year = instant.to_utc_wall_clock().year();

    // Transitions happen on whole seconds
    let dst_start = transition_event(year, Transition::SpringForward).unix_time();
    let dst_end = transition_event(year, Transition::FallBack).unix_time();

    dst_start <= unix_time && unix_time < dst_end
}

/// Check if Daylight Saving Time is in effect at the provided wall clock time, the period being
/// `[02:00, 03:00)` local from the spring transition day to the autumn transition day.
///
/// The non-existent spring hour and the first occurrence of the ambiguous autumn hour are
/// considered to be in Daylight Saving Time.
pub fn is_daylight_saving_time_local(wall_clock: &WallClockTime) -> bool {
    let year = wall_clock.year();

    let dst_start = transition_event(year, Transition::SpringForward).wall_clock();
    let dst_end = transition_event(year, Transition::FallBack).wall_clock();

    dst_start <= *wall_clock && *wall_clock < dst_end
}

/// Returns the local time type in effect at the provided instant
pub fn zone_designation(instant: Instant) -> ZoneDesignation {
    if is_daylight_saving_time(instant) {
        ZoneDesignation::Cest
    } else {
        ZoneDesignation::Cet
    }
}

/// Returns the offset from UTC in hours at the provided instant: `2` in summer, `1` otherwise
pub fn hour_offset_for_date(instant: Instant) -> i8 {
    zone_designation(instant).utc_offset_hours()
}

/// Returns the time zone designation at the provided instant: `"CEST"` in summer, `"CET"` otherwise
pub fn time_zone_name(instant: Instant) -> &'static str {
    zone_designation(instant).name()
}

/// Returns the next transition of the provided direction strictly after `from`.
///
/// The transition of the current year is returned if still ahead, otherwise the one of the
/// following year.
pub fn next_dst_transition(from: Instant, transition: Transition) -> TransitionEvent {
    let year = from.to_utc_wall_clock().year();

    let event = transition_event(year, transition);
    if event.unix_time() > from.unix_time() {
        return event;
    }

    trace!(year, ?transition, "transition already passed, rolling over to next year");
    transition_event(year + 1, transition)
}

/// Proximity of an instant to the next Daylight Saving Time transition
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionProximity {
    /// `true` if the transition is at most `threshold_days` days ahead
    pub is_near: bool,
    /// Instant of the nearest upcoming transition
    pub transition_date: Instant,
    /// Number of days until the transition, rounded up
    pub days_until: i64,
    /// `true` if the nearest upcoming transition is the spring one
    pub is_spring_transition: bool,
}

/// Find the nearest upcoming transition and check if it is at most `threshold_days` days ahead.
///
/// Spring and autumn transitions are computed independently. The spring transition wins when
/// both are the same number of days ahead.
pub fn is_near_dst_transition(instant: Instant, threshold_days: u32) -> TransitionProximity {
    let spring = next_dst_transition(instant, Transition::SpringForward).instant();
    let fall = next_dst_transition(instant, Transition::FallBack).instant();

    let days_until_spring = instant.days_until(&spring);
    let days_until_fall = instant.days_until(&fall);

    let (transition_date, days_until, is_spring_transition) =
        if days_until_spring <= days_until_fall {
            (spring, days_until_spring, true)
        } else {
            (fall, days_until_fall, false)
        };

    TransitionProximity {
        is_near: days_until <= threshold_days as i64,
        transition_date,
        days_until,
        is_spring_transition,
    }
}

/// Kind of Daylight Saving Time issue of a wall clock time
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DstIssueKind {
    /// Skipped hour of the spring transition day
    NonExistentHour,
    /// Repeated hour of the autumn transition day
    AmbiguousHour,
}

impl DstIssueKind {
    /// Returns the issue identifier, as exchanged with the user interface
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonExistentHour => "non-existent-hour",
            Self::AmbiguousHour => "ambiguous-hour",
        }
    }

    /// Returns an advisory message for the issue
    pub fn message(&self) -> &'static str {
        match self {
            Self::NonExistentHour => {
                "This time does not exist: on the day Daylight Saving Time starts, \
                 clocks jump from 02:00 to 03:00"
            }
            Self::AmbiguousHour => {
                "This time happens twice: on the day Daylight Saving Time ends, \
                 clocks go back from 03:00 to 02:00"
            }
        }
    }
}

impl fmt::Display for DstIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory classification of a wall clock time against the transitions of its year
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DstIssue {
    /// `true` if the wall clock time does not exist or is ambiguous
    pub has_potential_issue: bool,
    /// Issue kind, if any
    pub issue_type: Option<DstIssueKind>,
    /// Advisory message, if any
    pub message: Option<&'static str>,
}

impl DstIssue {
    const fn none() -> Self {
        Self { has_potential_issue: false, issue_type: None, message: None }
    }
}

impl From<DstIssueKind> for DstIssue {
    fn from(kind: DstIssueKind) -> Self {
        Self { has_potential_issue: true, issue_type: Some(kind), message: Some(kind.message()) }
    }
}

/// Check if a wall clock time falls in the skipped hour of the spring transition day or in the
/// repeated hour of the autumn transition day, both being `[02:00, 03:00)` local.
pub fn check_dst_issue(wall_clock: &WallClockTime) -> DstIssue {
    if wall_clock.hour() != 2 {
        return DstIssue::none();
    }

    let year = wall_clock.year();
    let date = wall_clock.date();

    if transition_event(year, Transition::SpringForward).local_date() == date {
        DstIssueKind::NonExistentHour.into()
    } else if transition_event(year, Transition::FallBack).local_date() == date {
        DstIssueKind::AmbiguousHour.into()
    } else {
        DstIssue::none()
    }
}
