use proptest::prelude::*;

use super::{
    check_dst_issue, hour_offset_for_date, is_daylight_saving_time, is_daylight_saving_time_local,
    is_near_dst_transition, last_sunday, next_dst_transition, time_zone_name, transition_event,
    zone_designation, DstIssue, DstIssueKind, Transition, ZoneDesignation,
};
use crate::datetime::{Instant, WallClockTime};
use crate::error::{Error, InvalidArgument};

fn at(s: &str) -> Result<Instant, Error> {
    Ok(Instant::parse(s)?)
}

#[test]
fn test_last_sunday() -> Result<(), Error> {
    assert_eq!(last_sunday(2000, 3)?, 26);
    assert_eq!(last_sunday(2000, 10)?, 29);
    assert_eq!(last_sunday(2024, 3)?, 31);
    assert_eq!(last_sunday(2024, 10)?, 27);
    assert_eq!(last_sunday(2025, 3)?, 30);
    assert_eq!(last_sunday(2025, 10)?, 26);
    assert_eq!(last_sunday(2026, 3)?, 29);
    assert_eq!(last_sunday(2026, 10)?, 25);
    assert_eq!(last_sunday(2024, 2)?, 25);
    assert_eq!(last_sunday(2026, 2)?, 22);
    assert_eq!(last_sunday(2025, 13), Err(InvalidArgument("invalid month")));
    Ok(())
}

#[test]
fn test_transition_event() -> Result<(), Error> {
    let spring = transition_event(2025, Transition::SpringForward);
    assert_eq!(spring.local_date(), (2025, 3, 30));
    assert_eq!(spring.wall_clock(), WallClockTime::new(2025, 3, 30, 2, 0, 0)?);
    assert_eq!(spring.instant(), at("2025-03-30T01:00:00.000Z")?);
    assert!(spring.transition().is_spring());

    let fall = transition_event(2025, Transition::FallBack);
    assert_eq!(fall.local_date(), (2025, 10, 26));
    assert_eq!(fall.wall_clock(), WallClockTime::new(2025, 10, 26, 3, 0, 0)?);
    assert_eq!(fall.instant(), at("2025-10-26T01:00:00.000Z")?);
    assert!(!fall.transition().is_spring());

    Ok(())
}

#[test]
fn test_is_daylight_saving_time() -> Result<(), Error> {
    assert!(!is_daylight_saving_time(at("2025-01-15T12:00:00.000Z")?));
    assert!(is_daylight_saving_time(at("2025-06-15T12:00:00.000Z")?));
    assert!(!is_daylight_saving_time(at("2025-12-15T12:00:00.000Z")?));

    assert!(!is_daylight_saving_time(at("2025-03-30T00:59:59.999Z")?));
    assert!(is_daylight_saving_time(at("2025-03-30T01:00:00.000Z")?));
    assert!(is_daylight_saving_time(at("2025-10-26T00:59:59.999Z")?));
    assert!(!is_daylight_saving_time(at("2025-10-26T01:00:00.000Z")?));

    // Local offsets are honoured by the parser
    assert!(!is_daylight_saving_time(at("2025-03-30T01:59:59+01:00")?));
    assert!(is_daylight_saving_time(at("2025-03-30T03:00:00+02:00")?));

    Ok(())
}

#[test]
fn test_is_daylight_saving_time_local() -> Result<(), Error> {
    assert!(!is_daylight_saving_time_local(&WallClockTime::new(2025, 3, 30, 1, 59, 59)?));
    assert!(is_daylight_saving_time_local(&WallClockTime::new(2025, 3, 30, 2, 0, 0)?));
    assert!(is_daylight_saving_time_local(&WallClockTime::new(2025, 3, 30, 3, 0, 0)?));
    assert!(is_daylight_saving_time_local(&WallClockTime::new(2025, 10, 26, 2, 59, 59)?));
    assert!(!is_daylight_saving_time_local(&WallClockTime::new(2025, 10, 26, 3, 0, 0)?));
    assert!(!is_daylight_saving_time_local(&WallClockTime::new(2025, 1, 15, 14, 0, 0)?));
    Ok(())
}

#[test]
fn test_offset_and_name() -> Result<(), Error> {
    let summer = at("2025-06-15T14:30:00.000Z")?;
    let winter = at("2025-01-15T14:30:00.000Z")?;

    assert_eq!(hour_offset_for_date(summer), 2);
    assert_eq!(hour_offset_for_date(winter), 1);
    assert_eq!(time_zone_name(summer), "CEST");
    assert_eq!(time_zone_name(winter), "CET");

    assert_eq!(zone_designation(summer), ZoneDesignation::Cest);
    assert_eq!(ZoneDesignation::Cest.ut_offset(), 7200);
    assert_eq!(ZoneDesignation::Cet.ut_offset(), 3600);
    assert!(ZoneDesignation::Cest.is_dst());
    assert!(!ZoneDesignation::Cet.is_dst());
    assert_eq!(ZoneDesignation::Cet.to_string(), "CET");

    Ok(())
}

#[test]
fn test_next_dst_transition() -> Result<(), Error> {
    let spring = next_dst_transition(at("2025-01-15T00:00:00.000Z")?, Transition::SpringForward);
    assert_eq!((spring.year(), spring.month()), (2025, 3));
    assert!((25..=31).contains(&spring.month_day()));
    assert_eq!(spring.wall_clock().week_day(), 0);

    let fall = next_dst_transition(at("2025-01-15T00:00:00.000Z")?, Transition::FallBack);
    assert_eq!(fall.local_date(), (2025, 10, 26));

    let rolled = next_dst_transition(at("2025-04-01T00:00:00.000Z")?, Transition::SpringForward);
    assert_eq!(rolled.local_date(), (2026, 3, 29));

    let rolled = next_dst_transition(at("2025-11-01T00:00:00.000Z")?, Transition::FallBack);
    assert_eq!(rolled.local_date(), (2026, 10, 25));

    // Strictly after the provided instant
    let exact = next_dst_transition(at("2025-03-30T01:00:00.000Z")?, Transition::SpringForward);
    assert_eq!(exact.local_date(), (2026, 3, 29));
    let before = next_dst_transition(at("2025-03-30T00:59:59.999Z")?, Transition::SpringForward);
    assert_eq!(before.local_date(), (2025, 3, 30));

    Ok(())
}

#[test]
fn test_is_near_dst_transition() -> Result<(), Error> {
    let far = is_near_dst_transition(at("2025-02-15T00:00:00.000Z")?, 3);
    assert!(!far.is_near);
    assert!(far.is_spring_transition);
    assert_eq!(far.days_until, 44);

    let near = is_near_dst_transition(at("2025-03-29T00:00:00.000Z")?, 3);
    assert!(near.is_near);
    assert!(near.is_spring_transition);
    assert_eq!(near.days_until, 2);
    assert_eq!(near.transition_date, at("2025-03-30T01:00:00.000Z")?);

    // Threshold is inclusive
    assert!(is_near_dst_transition(at("2025-03-29T00:00:00.000Z")?, 2).is_near);
    assert!(!is_near_dst_transition(at("2025-03-29T00:00:00.000Z")?, 1).is_near);

    let autumn = is_near_dst_transition(at("2025-10-20T00:00:00.000Z")?, 7);
    assert!(autumn.is_near);
    assert!(!autumn.is_spring_transition);
    assert_eq!(autumn.days_until, 7);

    // Just after the autumn transition, the next spring transition is nearer than next autumn
    let after = is_near_dst_transition(at("2025-10-26T01:00:00.000Z")?, 0);
    assert!(!after.is_near);
    assert!(after.is_spring_transition);
    assert_eq!(after.transition_date, at("2026-03-29T01:00:00.000Z")?);

    Ok(())
}

#[test]
fn test_check_dst_issue() -> Result<(), Error> {
    let non_existent = check_dst_issue(&WallClockTime::new(2025, 3, 30, 2, 30, 0)?);
    assert!(non_existent.has_potential_issue);
    assert_eq!(non_existent.issue_type, Some(DstIssueKind::NonExistentHour));
    assert_eq!(non_existent.message, Some(DstIssueKind::NonExistentHour.message()));

    let ambiguous = check_dst_issue(&WallClockTime::new(2025, 10, 26, 2, 30, 0)?);
    assert!(ambiguous.has_potential_issue);
    assert_eq!(ambiguous.issue_type, Some(DstIssueKind::AmbiguousHour));

    assert!(check_dst_issue(&WallClockTime::new(2025, 10, 26, 2, 0, 0)?).has_potential_issue);
    assert!(check_dst_issue(&WallClockTime::new(2025, 10, 26, 2, 59, 59)?).has_potential_issue);

    let none = DstIssue { has_potential_issue: false, issue_type: None, message: None };
    assert_eq!(check_dst_issue(&WallClockTime::new(2025, 6, 15, 14, 0, 0)?), none);
    assert_eq!(check_dst_issue(&WallClockTime::new(2025, 1, 15, 14, 0, 0)?), none);
    assert_eq!(check_dst_issue(&WallClockTime::new(2025, 3, 30, 1, 59, 59)?), none);
    assert_eq!(check_dst_issue(&WallClockTime::new(2025, 3, 30, 3, 0, 0)?), none);
    assert_eq!(check_dst_issue(&WallClockTime::new(2025, 3, 23, 2, 30, 0)?), none);
    assert_eq!(check_dst_issue(&WallClockTime::new(2024, 3, 30, 2, 30, 0)?), none);

    Ok(())
}

#[test]
fn test_serialize_for_ui() -> Result<(), Box<dyn std::error::Error>> {
    let issue = check_dst_issue(&WallClockTime::new(2025, 3, 30, 2, 30, 0)?);
    let value = serde_json::to_value(&issue)?;
    assert_eq!(value["hasPotentialIssue"], true);
    assert_eq!(value["issueType"], "non-existent-hour");

    let proximity = is_near_dst_transition(Instant::parse("2025-03-29T00:00:00.000Z")?, 3);
    let value = serde_json::to_value(&proximity)?;
    assert_eq!(value["isNear"], true);
    assert_eq!(value["transitionDate"], "2025-03-30T01:00:00.000Z");
    assert_eq!(value["daysUntil"], 2);
    assert_eq!(value["isSpringTransition"], true);

    let event = serde_json::to_value(&transition_event(2025, Transition::FallBack))?;
    assert_eq!(event["monthDay"], 26);
    assert_eq!(event["transition"], "fall-back");

    Ok(())
}

/// 1900-01-01 to 2200-01-01
fn any_instant() -> impl Strategy<Value = Instant> {
    (-2_208_988_800_000i64..7_258_118_400_000i64).prop_map(Instant::from_unix_millis)
}

/// Day of the month of the last Sunday, found by walking back from the end of the month
fn scan_last_sunday(year: i32, month: u8) -> u8 {
    let mut month_day = 31;
    loop {
        if let Ok(wall_clock) = WallClockTime::new(year, month, month_day, 0, 0, 0) {
            if wall_clock.week_day() == 0 {
                return month_day;
            }
        }
        month_day -= 1;
    }
}

#[test]
fn test_instant_limits() -> Result<(), Error> {
    // 292278994-08-17T07:12:55.807Z and -292275055-05-16T16:47:04.192Z
    let last = Instant::from_unix_millis(i64::MAX);
    let first = Instant::from_unix_millis(i64::MIN);

    assert!(is_daylight_saving_time(last));
    assert!(is_daylight_saving_time(first));
    assert_eq!(zone_designation(last), ZoneDesignation::Cest);
    assert_eq!(hour_offset_for_date(first), 2);

    // The autumn transition of the last year is beyond the range of an instant
    let fall = next_dst_transition(last, Transition::FallBack);
    assert_eq!((fall.year(), fall.month()), (292_278_994, 10));
    assert_eq!(fall.instant(), last);
    assert_eq!(is_near_dst_transition(last, 7).days_until, 0);

    let spring = next_dst_transition(first, Transition::SpringForward);
    assert_eq!(spring.year(), -292_275_054);
    assert!(is_near_dst_transition(first, 7).transition_date > first);

    assert_eq!(transition_event(i32::MAX, Transition::FallBack).instant(), last);
    assert_eq!(transition_event(i32::MIN, Transition::SpringForward).instant(), first);
    Ok(())
}

proptest! {
    #[test]
    fn property_dst_in_summer_months(year in 1900i32..2200, month in 4u8..=9) {
        let instant = Instant::from_utc_wall_clock(&WallClockTime::new(year, month, 1, 12, 0, 0)?);
        prop_assert!(is_daylight_saving_time(instant));
    }

    #[test]
    fn property_no_dst_in_winter_months(
        year in 1900i32..2200,
        month in prop_oneof![1u8..=2, 11u8..=12],
    ) {
        let instant = Instant::from_utc_wall_clock(&WallClockTime::new(year, month, 1, 12, 0, 0)?);
        prop_assert!(!is_daylight_saving_time(instant));
    }

    #[test]
    fn property_dst_changes_at_one_utc_on_last_sundays(year in 1900i32..2200) {
        for &(month, dst_after) in &[(3, true), (10, false)] {
            let month_day = scan_last_sunday(year, month);
            let at_one = WallClockTime::new(year, month, month_day, 1, 0, 0)?;
            let at_one = Instant::from_utc_wall_clock(&at_one);
            let just_before = Instant::from_unix_millis(at_one.unix_millis() - 1);

            prop_assert_eq!(is_daylight_saving_time(just_before), !dst_after);
            prop_assert_eq!(is_daylight_saving_time(at_one), dst_after);
        }
    }

    #[test]
    fn property_offset_matches_dst(instant in any_instant()) {
        let expected = if is_daylight_saving_time(instant) { 2 } else { 1 };
        prop_assert_eq!(hour_offset_for_date(instant), expected);
        prop_assert_eq!(time_zone_name(instant) == "CEST", expected == 2);
    }

    #[test]
    fn property_transitions_on_last_sunday(year in 1900i32..2200) {
        for &transition in &[Transition::SpringForward, Transition::FallBack] {
            let event = transition_event(year, transition);
            prop_assert!((25..=31).contains(&event.month_day()));
            prop_assert_eq!(event.wall_clock().week_day(), 0);
        }
    }

    #[test]
    fn property_next_transition_is_ahead(instant in any_instant()) {
        let proximity = is_near_dst_transition(instant, 7);
        prop_assert!(proximity.transition_date > instant);
        prop_assert!(proximity.days_until >= 1 && proximity.days_until <= 366);
        prop_assert_eq!(proximity.is_near, proximity.days_until <= 7);
    }
}
