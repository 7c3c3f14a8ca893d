//! # The ISBN Value Type
//!
//! Defines [`Isbn`], an immutable intermediate form shared by the 10- and
//! 13-digit representations, plus the parse, conversion, rendering, and
//! equivalence operations over it.
//!
//! ## Invariant
//!
//! A constructed value always carries a check digit that matches its body
//! digits under the algorithm for its form. [`Isbn::parse`] verifies this
//! before constructing; the conversions recompute it. Fields are private
//! and no setters exist, so the invariant cannot be broken after
//! construction; rendering and conversion rely on it to stay total.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::checksum::{check10, check13};
use crate::digit::{digit_char, digit_value};
use crate::error::IsbnError;
use crate::prefix::{is_allowed_prefix, DEFAULT_PREFIX, NO_PREFIX};

/// The URN scheme prefix accepted by [`Isbn::parse`] and produced by
/// [`Isbn::to_urn`].
pub const URN_PREFIX: &str = "urn:isbn:";

/// Maximum character count of an input after URN-prefix stripping:
/// 13 payload characters plus up to 4 separators.
pub const MAX_INPUT_LEN: usize = 17;

/// An ISBN held in an intermediate form common to both representations.
///
/// The nine body digits are the part the 10- and 13-digit forms share;
/// storing them next to the form flag, the registration prefix, and the
/// check digit makes conversion, checking, and rendering cheap, with no
/// allocation in the value itself.
///
/// # Construction
///
/// - [`Isbn::parse`] — from text, validating structure and checksum.
/// - [`Isbn::to_isbn10`] / [`Isbn::to_isbn13`] — from another value,
///   recomputing the check digit for the target form.
///
/// # Equality
///
/// `==` is strict representational equality over all fields, so the 10-
/// and 13-digit forms of the same book compare unequal. Use
/// [`Isbn::equivalent_to`] to compare the underlying identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Isbn {
    form13: bool,
    prefix: [u8; 3],
    digits: [u8; 9],
    check: u8,
}

impl Isbn {
    /// Parse an ISBN from text.
    ///
    /// Accepts a bare ISBN-10 or ISBN-13, or either wrapped in the
    /// `urn:isbn:` scheme. Hyphens, spaces, and any other non-digit
    /// characters are dropped, as long as the input stays within
    /// [`MAX_INPUT_LEN`] characters after URN-prefix stripping. Exactly
    /// 10 or 13 digit characters must survive.
    ///
    /// # Errors
    ///
    /// - [`IsbnError::Format`] — input longer than [`MAX_INPUT_LEN`].
    /// - [`IsbnError::DigitCount`] — surviving digits are neither 10 nor 13.
    /// - [`IsbnError::Prefix`] — a 13-digit input outside 978/979.
    /// - [`IsbnError::CharacterPosition`] — an 'X' anywhere but the final
    ///   digit of an ISBN-10.
    /// - [`IsbnError::Checksum`] — the check digit does not verify.
    pub fn parse(text: &str) -> Result<Self, IsbnError> {
        let text = text.strip_prefix(URN_PREFIX).unwrap_or(text);
        let length = text.chars().count();
        if length > MAX_INPUT_LEN {
            return Err(IsbnError::Format { length });
        }

        let m: Vec<u8> = text.chars().filter_map(digit_value).collect();
        let form13 = m.len() == 13;
        if m.len() != 10 && !form13 {
            return Err(IsbnError::DigitCount { found: m.len() });
        }

        let mut prefix = NO_PREFIX;
        let mut offset = 0;
        if form13 {
            prefix = [m[0], m[1], m[2]];
            if !is_allowed_prefix(prefix) {
                // Report the characters as written, separators included.
                return Err(IsbnError::Prefix {
                    found: text.chars().take(3).collect(),
                });
            }
            offset = 3;
        }

        let mut digits = [0u8; 9];
        let mut check = 0u8;
        for (i, &value) in m[offset..].iter().enumerate() {
            if value == 10 && (form13 || i != 9) {
                return Err(IsbnError::CharacterPosition);
            }
            if i == 9 {
                check = value;
            } else {
                digits[i] = value;
            }
        }

        let expected = if form13 {
            check13(&prefix, &digits)
        } else {
            check10(&digits)
        };
        if expected != check {
            return Err(IsbnError::Checksum {
                expected: digit_char(expected),
                found: digit_char(check),
            });
        }

        Ok(Self {
            form13,
            prefix,
            digits,
            check,
        })
    }

    /// Whether this value is in the 13-digit form.
    pub fn is_13(&self) -> bool {
        self.form13
    }

    /// Whether this value is in the 10-digit form.
    pub fn is_10(&self) -> bool {
        !self.form13
    }

    /// The ISBN-10 form of this value.
    ///
    /// A 10-form value is returned unchanged. A 13-form value keeps its
    /// registration prefix even though the 10-digit rendering never shows
    /// it; a later [`Isbn::to_isbn13`] restores that prefix instead of
    /// defaulting, so `v.to_isbn10().to_isbn13()` is lossless for
    /// 979-prefixed values too.
    pub fn to_isbn10(&self) -> Isbn {
        if !self.form13 {
            return *self;
        }
        Isbn {
            form13: false,
            prefix: self.prefix,
            digits: self.digits,
            check: check10(&self.digits),
        }
    }

    /// The ISBN-13 form of this value.
    ///
    /// A 13-form value is returned unchanged. A 10-form value reuses its
    /// remembered prefix when it carries an allow-listed one; a value with
    /// no prefix history takes the default 978.
    pub fn to_isbn13(&self) -> Isbn {
        if self.form13 {
            return *self;
        }
        let prefix = if is_allowed_prefix(self.prefix) {
            self.prefix
        } else {
            DEFAULT_PREFIX
        };
        Isbn {
            form13: true,
            prefix,
            digits: self.digits,
            check: check13(&prefix, &self.digits),
        }
    }

    /// The `urn:isbn:` form of this value, in its current representation.
    pub fn to_urn(&self) -> String {
        format!("{URN_PREFIX}{self}")
    }

    /// The canonical external representation: the URN form of the
    /// ISBN-13 version.
    ///
    /// Stable across conversion: every representation of the same book
    /// yields the same canonical string, so this is the form to use for
    /// identity comparison or storage keys.
    pub fn canonical(&self) -> String {
        self.to_isbn13().to_urn()
    }

    /// Whether two values identify the same book.
    ///
    /// Compares only the nine body digits; form, prefix, and check digit
    /// are ignored. Use `==` for strict representational equality.
    pub fn equivalent_to(&self, other: &Isbn) -> bool {
        self.digits == other.digits
    }
}

/// Whether the string is a valid ISBN, nothing else.
///
/// Collapses every rejection reason to `false`; call [`Isbn::parse`] when
/// the reason matters.
pub fn validate(text: &str) -> bool {
    Isbn::parse(text).is_ok()
}

impl fmt::Display for Isbn {
    /// An ISBN-10 renders as its bare ten characters; an ISBN-13 gets a
    /// single hyphen between the prefix and the ten-character body.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.form13 {
            for &d in &self.prefix {
                f.write_char(digit_char(d))?;
            }
            f.write_char('-')?;
        }
        for &d in &self.digits {
            f.write_char(digit_char(d))?;
        }
        f.write_char(digit_char(self.check))
    }
}

impl FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Isbn::parse(s)
    }
}

impl Serialize for Isbn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Isbn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Isbn::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- parse ----

    #[test]
    fn test_parse_isbn10() {
        let v = Isbn::parse("0836220889").unwrap();
        assert!(v.is_10());
        assert!(!v.is_13());
        assert_eq!(v.to_string(), "0836220889");
    }

    #[test]
    fn test_parse_isbn13() {
        let v = Isbn::parse("9780836220889").unwrap();
        assert!(v.is_13());
        assert!(!v.is_10());
        assert_eq!(v.to_string(), "978-0836220889");
        let ten = Isbn::parse("0836220889").unwrap();
        assert!(v.equivalent_to(&ten));
    }

    #[test]
    fn test_parse_x_checksum() {
        let v = Isbn::parse("080442957X").unwrap();
        assert_eq!(v.to_string(), "080442957X");
        let lower = Isbn::parse("080442957x").unwrap();
        assert_eq!(v, lower);
        let thirteen = Isbn::parse("9780804429573").unwrap();
        assert!(v.equivalent_to(&thirteen));
    }

    #[test]
    fn test_parse_with_separators() {
        let v = Isbn::parse("978-0-8044-2957-3").unwrap();
        assert_eq!(v.to_string(), "978-0804429573");
        let spaced = Isbn::parse("97 808 0442 9573").unwrap();
        assert_eq!(v, spaced);
    }

    #[test]
    fn test_parse_urn_form() {
        let v = Isbn::parse("urn:isbn:0-8044-2957-X").unwrap();
        assert_eq!(v.to_string(), "080442957X");
        assert_eq!(v.to_urn(), "urn:isbn:080442957X");
    }

    #[test]
    fn test_length_boundary() {
        // 13 digits plus 4 separators is exactly the 17-character limit.
        assert!(validate("978-0-8044-2957-3"));
        assert!(!validate("978-0-8044-2957-3 "));
    }

    // ---- rejection ----

    #[test]
    fn test_format_error() {
        assert_eq!(
            Isbn::parse("978-0-8-0-4-4-2-9-5-7-3"),
            Err(IsbnError::Format { length: 23 })
        );
    }

    #[test]
    fn test_digit_count_error() {
        assert_eq!(
            Isbn::parse("08362208891"),
            Err(IsbnError::DigitCount { found: 11 })
        );
        assert_eq!(
            Isbn::parse("083622088"),
            Err(IsbnError::DigitCount { found: 9 })
        );
        assert_eq!(
            Isbn::parse("badformat!"),
            Err(IsbnError::DigitCount { found: 0 })
        );
    }

    #[test]
    fn test_prefix_error_reports_raw_characters() {
        assert_eq!(
            Isbn::parse("9770836220889"),
            Err(IsbnError::Prefix {
                found: "977".to_string()
            })
        );
        // The report quotes the input as written, separators included.
        assert_eq!(
            Isbn::parse("9-770836220889"),
            Err(IsbnError::Prefix {
                found: "9-7".to_string()
            })
        );
    }

    #[test]
    fn test_x_position_error() {
        // X as a body digit of an ISBN-10.
        assert_eq!(
            Isbn::parse("08044295XX"),
            Err(IsbnError::CharacterPosition)
        );
        // X as an ISBN-13 check digit.
        assert_eq!(
            Isbn::parse("978080442957X"),
            Err(IsbnError::CharacterPosition)
        );
    }

    #[test]
    fn test_checksum_error() {
        assert_eq!(
            Isbn::parse("0836220888"),
            Err(IsbnError::Checksum {
                expected: '9',
                found: '8'
            })
        );
        assert_eq!(
            Isbn::parse("9780836220880"),
            Err(IsbnError::Checksum {
                expected: '9',
                found: '0'
            })
        );
    }

    #[test]
    fn test_validate_collapses_errors() {
        assert!(validate("0836220889"));
        assert!(validate("urn:isbn:978-0836220889"));
        assert!(!validate("badformat!"));
        assert!(!validate(""));
    }

    // ---- conversion ----

    #[test]
    fn test_conversion_identity() {
        let ten = Isbn::parse("0836220889").unwrap();
        assert_eq!(ten.to_isbn10(), ten);
        let thirteen = Isbn::parse("9780836220889").unwrap();
        assert_eq!(thirteen.to_isbn13(), thirteen);
    }

    #[test]
    fn test_default_prefix_fallback() {
        // A parsed ISBN-10 has no prefix history; conversion applies 978.
        let ten = Isbn::parse("080442957X").unwrap();
        assert_eq!(ten.to_isbn13().to_string(), "978-0804429573");
    }

    #[test]
    fn test_979_round_trip_preserves_prefix() {
        let v = Isbn::parse("979-5000000235").unwrap();
        assert!(v.is_13());
        assert_eq!(v.to_isbn10().to_string(), "5000000234");
        assert_eq!(v.to_isbn10().to_isbn13().to_string(), v.to_string());
    }

    #[test]
    fn test_strict_equality_distinguishes_forms() {
        let ten = Isbn::parse("0836220889").unwrap();
        let thirteen = Isbn::parse("9780836220889").unwrap();
        assert_ne!(ten, thirteen);
        assert!(ten.equivalent_to(&thirteen));
        assert!(thirteen.equivalent_to(&ten));
    }

    // ---- rendering ----

    #[test]
    fn test_canonical_is_urn_of_isbn13() {
        let ten = Isbn::parse("0836220889").unwrap();
        assert_eq!(ten.canonical(), "urn:isbn:978-0836220889");
        let thirteen = Isbn::parse("9780836220889").unwrap();
        assert_eq!(ten.canonical(), thirteen.canonical());
    }

    #[test]
    fn test_from_str() {
        let v: Isbn = "9780836220889".parse().unwrap();
        assert!(v.is_13());
        assert!("notremotelyok".parse::<Isbn>().is_err());
    }

    // ---- serde ----

    #[test]
    fn test_serde_roundtrip() {
        let v = Isbn::parse("979-5000000235").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"979-5000000235\"");
        let back: Isbn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_roundtrip_isbn10() {
        let v = Isbn::parse("080442957X").unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "\"080442957X\"");
        let back: Isbn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        assert!(serde_json::from_str::<Isbn>("\"0836220888\"").is_err());
        assert!(serde_json::from_str::<Isbn>("\"\"").is_err());
    }
}
