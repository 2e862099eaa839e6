//! Error kinds surfaced by fallible operations.

use std::fmt;

/// What went wrong in a `bignum` operation.
///
/// Operator-trait impls (`/`, `%`) panic on a zero divisor like the
/// built-in integer types do; every other failure travels through this
/// type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A mathematically undefined operation: division or modulo by
    /// zero through a checked entry point, logarithm of a negative
    /// value.
    Numeric,
    /// A value outside the representable range of its target: an
    /// ill-formed literal, a narrowing conversion that does not fit,
    /// reversed random bounds, or an exhausted import buffer.
    Range,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Numeric => f.write_str("numeric error: operation undefined for this operand"),
            Error::Range => f.write_str("range error: value out of range or malformed input"),
        }
    }
}

impl std::error::Error for Error {}
