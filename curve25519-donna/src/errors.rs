// -*- mode: rust; -*-
//
// This file is part of curve25519-donna.
//
// To the extent possible under law, the authors have waived all copyright and
// related or neighboring rights to curve25519-donna, using the Creative
// Commons "CC0" public domain dedication.  See
// <http://creativecommons.org/publicdomain/zero/1.0/> for full details.

//! Errors which may occur when parsing keys from wire formats.
//!
//! The curve arithmetic itself cannot fail: every 32-byte input is a
//! valid scalar and a valid \\(u\\)-coordinate.  Only the slice-based
//! constructors of the key types have anything to reject.

use core::fmt;
use core::fmt::Display;

/// Errors which may occur while constructing keys from bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An error in the length of bytes handed to a constructor.
    ///
    /// `name` is the type which refused the bytes, `expected` the length
    /// its constructor takes, and `actual` the length it was given.
    InvalidLength {
        /// The type being constructed.
        name: &'static str,
        /// The only length accepted.
        expected: usize,
        /// The length of the rejected input.
        actual: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::InvalidLength {
                name,
                expected,
                actual,
            } => write!(
                f,
                "{} must be {} bytes in length, got {}",
                name, expected, actual
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
