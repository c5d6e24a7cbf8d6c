#![deny(missing_docs)]
#![warn(unreachable_pub)]

//! This crate implements the Central European daylight saving time rule (CET/CEST) used by a
//! reservation system, and the conversions between the wall clock times selected by users and
//! the instants exchanged with the server.
//!
//! Daylight Saving Time starts on the last Sunday of March at 02:00 local time and ends on the
//! last Sunday of October at 03:00 local time. Transitions are computed with calendar arithmetic,
//! so that results never depend on the time zone configuration of the host.
//!
//! Instants are exchanged as ISO 8601 strings with a `Z` designator, e.g.
//! `2025-06-15T14:30:00.000Z`.
//!
//! # Usage
//!
//! ## Rule engine
//!
//! ```rust
//! # fn main() -> Result<(), cet::Error> {
//! use cet::{check_dst_issue, is_near_dst_transition, next_dst_transition};
//! use cet::{DstIssueKind, Instant, Transition, WallClockTime};
//!
//! let summer = Instant::parse("2025-06-15T14:30:00.000Z")?;
//! assert!(cet::is_daylight_saving_time(summer));
//! assert_eq!(cet::hour_offset_for_date(summer), 2);
//! assert_eq!(cet::time_zone_name(summer), "CEST");
//!
//! // Next spring transition
//! let winter = Instant::parse("2025-01-15T00:00:00.000Z")?;
//! let spring = next_dst_transition(winter, Transition::SpringForward);
//! assert_eq!(spring.local_date(), (2025, 3, 30));
//! assert_eq!(spring.instant().to_string(), "2025-03-30T01:00:00.000Z");
//!
//! // Proximity warning
//! let proximity = is_near_dst_transition(Instant::parse("2025-03-29T00:00:00.000Z")?, 3);
//! assert!(proximity.is_near);
//! assert!(proximity.is_spring_transition);
//!
//! // Skipped hour
//! let issue = check_dst_issue(&WallClockTime::new(2025, 3, 30, 2, 30, 0)?);
//! assert_eq!(issue.issue_type, Some(DstIssueKind::NonExistentHour));
//! # Ok(())
//! # }
//! ```
//!
//! ## Conversions
//!
//! ```rust
//! # fn main() -> Result<(), cet::Error> {
//! use cet::{format_local_time, preserve_local_time, WallClockTime};
//!
//! // Selected digits are stored as is
//! let selected = WallClockTime::new(2025, 6, 15, 13, 0, 0)?;
//! assert_eq!(preserve_local_time(&selected), "2025-06-15T13:00:00.000Z");
//!
//! // Stored instants are displayed on the CET/CEST wall clock
//! assert_eq!(format_local_time("2025-06-15T14:30:00.000Z")?, "16:30");
//! assert_eq!(format_local_time("2025-01-15T14:30:00.000Z")?, "15:30");
//! # Ok(())
//! # }
//! ```
//!
//! ## Reservation slots
//!
//! ```rust
//! # fn main() -> Result<(), cet::Error> {
//! use cet::{AdvisoryConfig, ReservationSlot, Transition, WallClockTime};
//!
//! let slot = ReservationSlot::new(
//!     WallClockTime::new(2025, 10, 26, 1, 0, 0)?,
//!     WallClockTime::new(2025, 10, 26, 4, 0, 0)?,
//! )?;
//!
//! let advisory = slot.check(&AdvisoryConfig::default());
//! assert_eq!(advisory.scheduled_minutes, 180);
//! assert_eq!(advisory.elapsed_minutes, 240);
//! assert_eq!(advisory.crossed_transition, Some(Transition::FallBack));
//! # Ok(())
//! # }
//! ```

mod config;
mod convert;
mod datetime;
pub mod error;
mod parse;
mod rule;
mod slot;

pub use config::{AdvisoryConfig, DEFAULT_THRESHOLD_DAYS};
pub use convert::{
    create_utc_date, extract_local_time, format_local_time, preserve_local_time, to_cet_instant,
    to_cet_wall_clock, LocalDateTime,
};
pub use datetime::{Instant, WallClockTime};
pub use error::{Error, InvalidArgument, ParseError};
pub use rule::{
    check_dst_issue, hour_offset_for_date, is_daylight_saving_time, is_daylight_saving_time_local,
    is_near_dst_transition, last_sunday, next_dst_transition, time_zone_name, transition_event,
    zone_designation, DstIssue, DstIssueKind, Transition, TransitionEvent, TransitionProximity,
    ZoneDesignation,
};
pub use slot::{ReservationSlot, SlotAdvisory};

/// Number of milliseconds in one second
const MILLIS_PER_SECOND: i64 = 1000;
/// Number of seconds in one minute
const SECONDS_PER_MINUTE: i64 = 60;
/// Number of seconds in one hour
const SECONDS_PER_HOUR: i64 = 3600;
/// Number of seconds in one day
const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * 24;
/// Number of milliseconds in one day
const MILLIS_PER_DAY: i64 = SECONDS_PER_DAY * MILLIS_PER_SECOND;
/// Number of days in one week
const DAYS_PER_WEEK: i64 = 7;

/// Month days in a normal year
const DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Cumulated month days in a normal year
const CUMUL_DAY_IN_MONTHS_NORMAL_YEAR: [i64; 12] =
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
