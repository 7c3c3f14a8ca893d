//! # isbn — ISBN-10 / ISBN-13 Value Type
//!
//! Parses, validates, converts, and formats book-identifying numbers,
//! including their `urn:isbn:` URN representation. The crate is a pure
//! value library: no I/O, no global state, no async — every operation is
//! a deterministic function over an immutable [`Isbn`].
//!
//! ## Key Design Principles
//!
//! 1. **One intermediate form.** [`Isbn`] stores the form flag, the
//!    3-digit registration prefix, the 9 body digits, and the check
//!    digit. The body digits are what the two representations share, so
//!    conversion and equivalence operate on them directly.
//!
//! 2. **Valid by construction.** The only ways to obtain an [`Isbn`] are
//!    [`Isbn::parse`] (which verifies the checksum before constructing)
//!    and the conversions (which recompute it). Fields are private; no
//!    setters exist. Rendering and conversion are therefore total.
//!
//! 3. **Prefix memory.** Converting a 979-prefixed ISBN-13 down to the
//!    10-digit form keeps the prefix, so converting back restores 979
//!    instead of defaulting to 978; `v.to_isbn10().to_isbn13()` is
//!    lossless for every parsed value.
//!
//! 4. **Total character mapping.** Normalization maps every character to
//!    a digit value or drops it; no input string can panic the parser.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` reachable from the public API.
//! - Public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where a stable text form exists.
//!
//! ## Example
//!
//! ```
//! use isbn::Isbn;
//!
//! let ten = Isbn::parse("0-8044-2957-X")?;
//! let thirteen = Isbn::parse("urn:isbn:9780804429573")?;
//!
//! assert!(ten.equivalent_to(&thirteen));
//! assert_eq!(ten.canonical(), "urn:isbn:978-0804429573");
//! assert_eq!(ten.canonical(), thirteen.canonical());
//! # Ok::<(), isbn::IsbnError>(())
//! ```

mod checksum;
mod digit;
mod prefix;

pub mod error;
pub mod isbn;

pub use error::IsbnError;
pub use isbn::{validate, Isbn, MAX_INPUT_LEN, URN_PREFIX};
