//! Limb primitives: the fixed-width digit type the magnitude kernels
//! operate on, plus single-limb bit queries.
//!
//! A `Limb` is one unsigned digit of the little-endian representation;
//! a `DLimb` is twice as wide and holds a product of two limbs plus
//! carries without overflow.

#[cfg(not(feature = "limb16"))]
pub(crate) type Limb = u32;
#[cfg(not(feature = "limb16"))]
pub(crate) type DLimb = u64;

#[cfg(feature = "limb16")]
pub(crate) type Limb = u16;
#[cfg(feature = "limb16")]
pub(crate) type DLimb = u32;

pub(crate) const LIMB_BITS: u32 = Limb::BITS;
pub(crate) const LIMB_BYTES: usize = (Limb::BITS / 8) as usize;
pub(crate) const LIMB_MASK: Limb = Limb::MAX;
pub(crate) const SIGN_BIT: Limb = 1 << (LIMB_BITS - 1);

/// The largest power of ten that fits in one limb, and the number of
/// decimal digits it carries. Decimal conversion moves this many digits
/// per limb operation.
#[cfg(not(feature = "limb16"))]
pub(crate) const POWER_OF_10_IN_LIMB: Limb = 1_000_000_000;
#[cfg(not(feature = "limb16"))]
pub(crate) const DECIMAL_DIGITS_IN_LIMB: usize = 9;

#[cfg(feature = "limb16")]
pub(crate) const POWER_OF_10_IN_LIMB: Limb = 10_000;
#[cfg(feature = "limb16")]
pub(crate) const DECIMAL_DIGITS_IN_LIMB: usize = 4;

/// Whether the sign bit of a top limb is set, i.e. the value it closes
/// is negative.
#[inline]
pub(crate) fn is_negative(digit: Limb) -> bool {
    digit & SIGN_BIT != 0
}

/// Position of the highest set bit, or -1 when the limb is zero.
#[inline]
pub(crate) fn most_significant_bit(digit: Limb) -> i32 {
    (LIMB_BITS as i32 - 1) - digit.leading_zeros() as i32
}

/// Position of the lowest set bit, or -1 when the limb is zero.
#[inline]
pub(crate) fn least_significant_bit(digit: Limb) -> i32 {
    if digit == 0 {
        -1
    } else {
        digit.trailing_zeros() as i32
    }
}

/// Sign-extension limb for a value whose top limb is `digit`: all ones
/// when negative, zero otherwise.
#[inline]
pub(crate) fn sign_fill(digit: Limb) -> Limb {
    if is_negative(digit) { LIMB_MASK } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions() {
        assert_eq!(most_significant_bit(0), -1);
        assert_eq!(most_significant_bit(1), 0);
        assert_eq!(most_significant_bit(SIGN_BIT), LIMB_BITS as i32 - 1);
        assert_eq!(least_significant_bit(0), -1);
        assert_eq!(least_significant_bit(SIGN_BIT), LIMB_BITS as i32 - 1);
        assert_eq!(least_significant_bit(6), 1);
    }

    #[test]
    fn decimal_power_fits() {
        // One more decimal digit would overflow the limb.
        let p = POWER_OF_10_IN_LIMB as DLimb;
        assert!(p * 10 > LIMB_MASK as DLimb);
        assert_eq!(
            (10 as DLimb).pow(DECIMAL_DIGITS_IN_LIMB as u32),
            POWER_OF_10_IN_LIMB as DLimb
        );
    }
}
