//! Parsing functions.

use std::num::ParseIntError;
use std::str::{self, FromStr};

use crate::error::ParseError;

mod iso8601;
pub(crate) use iso8601::parse_instant;

/// A `Cursor` contains a slice of a buffer and a read count.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Cursor<'a> {
    /// Slice representing the remaining data to be read
    remaining: &'a [u8],
    /// Number of already read bytes
    read_count: usize,
}

impl<'a> Cursor<'a> {
    /// Construct a new `Cursor` from remaining data
    pub(crate) fn new(remaining: &'a [u8]) -> Self {
        Self { remaining, read_count: 0 }
    }

    /// Returns `true` if no data is remaining
    pub(crate) fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Returns number of already read bytes
    pub(crate) fn read_count(&self) -> usize {
        self.read_count
    }

    /// Read exactly `count` bytes, reducing remaining data and incrementing read count
    pub(crate) fn read_exact(&mut self, count: usize) -> Result<&'a [u8], ParseError> {
        match (self.remaining.get(..count), self.remaining.get(count..)) {
            (Some(result), Some(remaining)) => {
                self.remaining = remaining;
                self.read_count += count;
                Ok(result)
            }
            _ => Err(ParseError::UnexpectedEof),
        }
    }

    /// Read bytes and compare them to the provided tag
    pub(crate) fn read_tag(&mut self, tag: &[u8], error: &'static str) -> Result<(), ParseError> {
        if self.read_exact(tag.len())? == tag {
            Ok(())
        } else {
            Err(ParseError::InvalidFormat(error))
        }
    }

    /// Read bytes if the remaining data is prefixed by the provided tag
    pub(crate) fn read_optional_tag(&mut self, tag: &[u8]) -> Result<bool, ParseError> {
        if self.remaining.starts_with(tag) {
            self.read_exact(tag.len())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Read bytes as long as the provided predicate is true
    pub(crate) fn read_while<F: Fn(&u8) -> bool>(&mut self, f: F) -> Result<&'a [u8], ParseError> {
        match self.remaining.iter().position(|x| !f(x)) {
            None => self.read_exact(self.remaining.len()),
            Some(position) => self.read_exact(position),
        }
    }

    /// Parse an integer out of exactly `count` ASCII digits
    pub(crate) fn read_fixed_int<T: FromStr<Err = ParseIntError>>(
        &mut self,
        count: usize,
    ) -> Result<T, ParseError> {
        let bytes = self.read_exact(count)?;
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(ParseError::InvalidFormat("expected ASCII digits"));
        }
        Ok(str::from_utf8(bytes)?.parse()?)
    }
}
