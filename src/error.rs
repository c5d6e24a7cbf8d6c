//! Error types.

use std::num::ParseIntError;
use std::str::Utf8Error;

use thiserror::Error;

/// Parsing error for date time strings
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Malformed date time string
    #[error("invalid date time string: {0}")]
    InvalidFormat(&'static str),
    /// Input ended before a complete date time was read
    #[error("unexpected end of date time string")]
    UnexpectedEof,
    /// Integer parsing error
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    /// UTF-8 error
    #[error(transparent)]
    Utf8(#[from] Utf8Error),
}

/// Out of range date time field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid argument: {0}")]
pub struct InvalidArgument(pub &'static str);

/// Unified error type for everything in the crate
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Parsing error
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Out of range field
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}
