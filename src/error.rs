//! # Error Types — Input Rejection Taxonomy
//!
//! Defines the error type returned by [`Isbn::parse`](crate::Isbn::parse).
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Every variant is an input-rejection error: no input string can panic the
//! parser, and conversion or rendering of an already-constructed value
//! cannot fail. Errors carry the piece of input that triggered them so
//! callers can produce useful diagnostics without re-scanning the string.

use thiserror::Error;

/// Why a string was rejected as an ISBN.
///
/// The variants mirror the stages of the parse pipeline: structural length
/// guard, digit count, registration prefix, character placement, checksum.
/// The first stage to fail wins; no partial value is ever produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    /// The input is too long to be an ISBN even with the maximum number of
    /// separator characters.
    #[error("invalid ISBN format: {length} characters after URN-prefix stripping, limit is 17")]
    Format {
        /// Character count of the input after URN-prefix stripping.
        length: usize,
    },

    /// The number of surviving digit characters is neither 10 nor 13.
    #[error("invalid ISBN digit count: expected 10 or 13, found {found}")]
    DigitCount {
        /// How many digit characters survived normalization.
        found: usize,
    },

    /// A 13-digit input did not begin with a known registration prefix.
    #[error("unexpected ISBN-13 prefix: {found:?}")]
    Prefix {
        /// The leading three characters of the input as written.
        found: String,
    },

    /// An 'X' appeared outside the single position where it is legal.
    #[error("unexpected character in ISBN: X can only be the final digit of an ISBN-10")]
    CharacterPosition,

    /// The trailing check digit does not match the value recomputed from
    /// the body digits.
    #[error("ISBN checksum was incorrect: expected {expected}, found {found}")]
    Checksum {
        /// The check digit demanded by the body digits.
        expected: char,
        /// The check digit as written in the input.
        found: char,
    },
}
