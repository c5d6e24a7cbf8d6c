//! Functions used for parsing an ISO 8601 date time string.
//!
//! Accepted forms are `YYYY-MM-DD`, read as UTC midnight, and
//! `YYYY-MM-DDTHH:MM[:SS[.fff]]` followed by `Z` or a `±HH:MM` offset.

use super::Cursor;
use crate::datetime::{Instant, WallClockTime};
use crate::error::{InvalidArgument, ParseError};
use crate::{MILLIS_PER_SECOND, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Parse an ISO 8601 date time string into an instant
pub(crate) fn parse_instant(bytes: &[u8]) -> Result<Instant, ParseError> {
    let mut cursor = Cursor::new(bytes);

    let year = cursor.read_fixed_int(4)?;
    cursor.read_tag(b"-", "missing date separator")?;
    let month = cursor.read_fixed_int(2)?;
    cursor.read_tag(b"-", "missing date separator")?;
    let month_day = cursor.read_fixed_int(2)?;

    if cursor.is_empty() {
        let wall_clock = WallClockTime::new(year, month, month_day, 0, 0, 0).map_err(out_of_range)?;
        return Ok(Instant::from_utc_wall_clock(&wall_clock));
    }

    match cursor.read_exact(1)?[0] {
        b'T' | b't' | b' ' => {}
        _ => return Err(ParseError::InvalidFormat("missing time separator")),
    }

    let hour = cursor.read_fixed_int(2)?;
    cursor.read_tag(b":", "missing time separator")?;
    let minute = cursor.read_fixed_int(2)?;

    let mut second = 0;
    let mut millis = 0;
    if cursor.read_optional_tag(b":")? {
        second = cursor.read_fixed_int(2)?;
        if cursor.read_optional_tag(b".")? || cursor.read_optional_tag(b",")? {
            millis = parse_fraction(&mut cursor)?;
        }
    }

    let wall_clock =
        WallClockTime::new(year, month, month_day, hour, minute, second).map_err(out_of_range)?;
    let offset = parse_offset(&mut cursor)?;

    if !cursor.is_empty() {
        return Err(ParseError::InvalidFormat("remaining data after parsing date time"));
    }

    let unix_time = wall_clock.naive_unix_time() - offset;
    Ok(Instant::from_unix_millis(unix_time * MILLIS_PER_SECOND + millis))
}

/// Parse a fraction of second, truncated to milliseconds
fn parse_fraction(cursor: &mut Cursor) -> Result<i64, ParseError> {
    let start = cursor.read_count();
    let digits = cursor.read_while(u8::is_ascii_digit)?;

    if !(1..=9).contains(&(cursor.read_count() - start)) {
        return Err(ParseError::InvalidFormat("invalid fraction of second"));
    }

    Ok(digits.iter().chain(b"00").take(3).fold(0, |acc, &b| acc * 10 + (b - b'0') as i64))
}

/// Parse a UTC designator or offset, in seconds east of UTC
fn parse_offset(cursor: &mut Cursor) -> Result<i64, ParseError> {
    let sign = match cursor.read_exact(1)?[0] {
        b'Z' | b'z' => return Ok(0),
        b'+' => 1,
        b'-' => -1,
        _ => return Err(ParseError::InvalidFormat("invalid UTC designator")),
    };

    let hour: i64 = cursor.read_fixed_int(2)?;
    cursor.read_optional_tag(b":")?;
    let minute: i64 = cursor.read_fixed_int(2)?;

    if hour > 23 {
        return Err(ParseError::InvalidFormat("invalid offset hour"));
    }
    if minute > 59 {
        return Err(ParseError::InvalidFormat("invalid offset minute"));
    }

    Ok(sign * (hour * SECONDS_PER_HOUR + minute * SECONDS_PER_MINUTE))
}

fn out_of_range(InvalidArgument(error): InvalidArgument) -> ParseError {
    ParseError::InvalidFormat(error)
}
