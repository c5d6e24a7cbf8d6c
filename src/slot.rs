//! Reservation slot validation.

use std::iter;

use serde::Serialize;
use tracing::debug;

use crate::config::AdvisoryConfig;
use crate::convert::{preserve_local_time, to_cet_instant};
use crate::datetime::WallClockTime;
use crate::error::InvalidArgument;
use crate::rule::{check_dst_issue, transition_event, DstIssue, Transition, TransitionProximity};
use crate::{MILLIS_PER_SECOND, SECONDS_PER_MINUTE};

/// Reservation between two wall clock times selected by a user
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct ReservationSlot {
    /// Selected start
    start: WallClockTime,
    /// Selected end
    end: WallClockTime,
}

impl ReservationSlot {
    /// Construct a reservation slot, `end` being after `start`
    pub fn new(start: WallClockTime, end: WallClockTime) -> Result<Self, InvalidArgument> {
        if end <= start {
            return Err(InvalidArgument("reservation must end after it starts"));
        }

        Ok(Self { start, end })
    }

    /// Returns selected start
    pub fn start(&self) -> WallClockTime {
        self.start
    }

    /// Returns selected end
    pub fn end(&self) -> WallClockTime {
        self.end
    }

    /// Returns the ISO 8601 strings to store for the start and the end of the slot
    pub fn to_storage(&self) -> (String, String) {
        (preserve_local_time(&self.start), preserve_local_time(&self.end))
    }

    /// Check the slot against the Daylight Saving Time transitions.
    ///
    /// Never fails: a slot in a skipped or repeated hour is still accepted, the advisory only
    /// carries the information needed to warn the user.
    pub fn check(&self, config: &AdvisoryConfig) -> SlotAdvisory {
        let start = to_cet_instant(&self.start);
        let end = to_cet_instant(&self.end);

        let scheduled_minutes =
            (self.end.naive_unix_time() - self.start.naive_unix_time()) / SECONDS_PER_MINUTE;
        // A start in the skipped spring hour may resolve after the end
        let elapsed_minutes =
            ((end.unix_millis() - start.unix_millis()) / (SECONDS_PER_MINUTE * MILLIS_PER_SECOND))
                .max(0);

        let crossed_transition = (self.start.year()..=self.end.year())
            .flat_map(|year| {
                iter::once(transition_event(year, Transition::SpringForward))
                    .chain(iter::once(transition_event(year, Transition::FallBack)))
            })
            .find(|event| start < event.instant() && event.instant() <= end)
            .map(|event| event.transition());

        let advisory = SlotAdvisory {
            start_issue: check_dst_issue(&self.start),
            end_issue: check_dst_issue(&self.end),
            proximity: config.proximity(start),
            scheduled_minutes,
            elapsed_minutes,
            crossed_transition,
        };

        if advisory.has_warnings() {
            debug!(
                start = %self.start,
                end = %self.end,
                ?crossed_transition,
                days_until = advisory.proximity.days_until,
                "reservation slot carries a DST advisory"
            );
        }

        advisory
    }
}

/// Daylight Saving Time advisory for a reservation slot
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotAdvisory {
    /// Issue of the selected start
    pub start_issue: DstIssue,
    /// Issue of the selected end
    pub end_issue: DstIssue,
    /// Proximity of the start to the next transition
    pub proximity: TransitionProximity,
    /// Duration read on the wall clock, in minutes
    pub scheduled_minutes: i64,
    /// Actually elapsed duration, in minutes
    pub elapsed_minutes: i64,
    /// Transition happening during the slot, if any
    pub crossed_transition: Option<Transition>,
}

impl SlotAdvisory {
    /// Returns `true` if the user should be warned about the slot
    pub fn has_warnings(&self) -> bool {
        self.start_issue.has_potential_issue
            || self.end_issue.has_potential_issue
            || self.proximity.is_near
            || self.crossed_transition.is_some()
    }
}
