//! Arbitrary-precision signed integers on a two's-complement limb
//! representation.
//!
//! A [`BigInt`] is a little-endian vector of fixed-width limbs whose
//! top bit is the sign bit, kept in a canonical minimal-length form.
//! Multiplication switches from schoolbook to Karatsuba past 32 limbs,
//! division runs Knuth's Algorithm D with a two-limb quotient
//! estimate, and decimal conversion moves nine digits per limb
//! operation. Operators come in borrowing, consuming and `*Assign`
//! forms; the consuming forms reuse the left operand's storage.

mod arith;
mod bigint;
mod bits;
mod convert;
mod error;
mod limb;
mod mag;
mod random;
mod stats;


pub use bigint::BigInt;
pub use error::Error;
#[cfg(debug_assertions)]
pub use stats::allocation_snapshot;
