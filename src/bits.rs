//! Shifts, bit queries and number theory.
//!
//! Shifts are arithmetic: the sign bit propagates on the right shift,
//! and both directions predict the exact result length before
//! allocating, so no normalization pass is needed afterwards.

use std::cmp::Ordering;
use std::ops::{Shl, ShlAssign, Shr, ShrAssign};

use crate::bigint::BigInt;
use crate::error::Error;
use crate::limb::{
    LIMB_BITS, LIMB_MASK, Limb, is_negative, least_significant_bit, most_significant_bit,
};
use crate::mag;

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    /// `self * 2^shift`. The split is `shift = q*W + r`: whole limbs
    /// move by `q`, then an in-limb shift by `r` reads each limb and
    /// its predecessor. One extra top limb is needed unless the top
    /// `r+1` bits of the source's top limb all match the sign bit.
    fn shl(self, shift: usize) -> BigInt {
        let limb_shift = shift / LIMB_BITS as usize;
        let bit_shift = (shift % LIMB_BITS as usize) as u32;
        if self.is_zero() {
            return BigInt::zero();
        }
        if bit_shift == 0 {
            let mut limbs = mag::alloc_limbs(self.limbs.len() + limb_shift);
            limbs[limb_shift..].copy_from_slice(&self.limbs);
            return BigInt { limbs };
        }
        let digit_rshift = LIMB_BITS - bit_shift;
        let mut result_size = self.limbs.len() + limb_shift + 1;
        let mut size_reduction = 0;
        let mut low_digit = self.limbs[self.limbs.len() - 1];
        if is_negative(low_digit) {
            let digit_mask = LIMB_MASK << (digit_rshift - 1);
            if low_digit & digit_mask == digit_mask {
                result_size -= 1;
                size_reduction = 1;
            } else {
                low_digit = LIMB_MASK;
            }
        } else if low_digit >> (digit_rshift - 1) == 0 {
            result_size -= 1;
            size_reduction = 1;
        } else {
            low_digit = 0;
        }
        let mut limbs = mag::alloc_limbs(result_size);
        let mut dest = result_size;
        let mut high_digit = low_digit << bit_shift;
        for pos in (0..self.limbs.len() - size_reduction).rev() {
            let low = self.limbs[pos];
            dest -= 1;
            limbs[dest] = high_digit | (low >> digit_rshift);
            high_digit = low << bit_shift;
        }
        dest -= 1;
        limbs[dest] = high_digit;
        // limbs below `dest` stay zero-filled
        BigInt { limbs }
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(self, shift: usize) -> BigInt {
        &self << shift
    }
}

impl ShlAssign<usize> for BigInt {
    /// In-place when the predicted size equals the current one (small
    /// shift, no growth); otherwise the buffer is rebuilt.
    fn shl_assign(&mut self, shift: usize) {
        if shift == 0 || self.is_zero() {
            return;
        }
        let limb_shift = shift / LIMB_BITS as usize;
        let bit_shift = (shift % LIMB_BITS as usize) as u32;
        if bit_shift == 0 {
            let old_len = self.limbs.len();
            self.limbs.resize(old_len + limb_shift, 0);
            self.limbs.copy_within(0..old_len, limb_shift);
            self.limbs[..limb_shift].fill(0);
            return;
        }
        let digit_rshift = LIMB_BITS - bit_shift;
        let len = self.limbs.len();
        let top = self.limbs[len - 1];
        let fits_in_place = limb_shift == 0
            && if is_negative(top) {
                let digit_mask = LIMB_MASK << (digit_rshift - 1);
                top & digit_mask == digit_mask
            } else {
                top >> (digit_rshift - 1) == 0
            };
        if fits_in_place {
            let mut dest = len;
            let mut high_digit = top << bit_shift;
            for pos in (0..len - 1).rev() {
                let low = self.limbs[pos];
                dest -= 1;
                self.limbs[dest] = high_digit | (low >> digit_rshift);
                high_digit = low << bit_shift;
            }
            self.limbs[0] = high_digit;
        } else {
            *self = &*self << shift;
        }
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    /// Arithmetic shift: `q` whole limbs drop off the low end (the
    /// value collapses to 0 or -1 once every limb is consumed), then
    /// an in-limb shift refills from the sign.
    fn shr(self, shift: usize) -> BigInt {
        let limb_shift = shift / LIMB_BITS as usize;
        let bit_shift = (shift % LIMB_BITS as usize) as u32;
        if self.limbs.len() <= limb_shift {
            return if self.is_negative() {
                BigInt {
                    limbs: vec![LIMB_MASK],
                }
            } else {
                BigInt::zero()
            };
        }
        if bit_shift == 0 {
            return BigInt {
                limbs: self.limbs[limb_shift..].to_vec(),
            };
        }
        let digit_lshift = LIMB_BITS - bit_shift;
        let mut result_size = self.limbs.len() - limb_shift;
        if result_size > 1 {
            let top = self.limbs[self.limbs.len() - 1];
            if is_negative(top) {
                let digit_mask = LIMB_MASK << (bit_shift - 1);
                if top & digit_mask == digit_mask {
                    result_size -= 1;
                }
            } else if top >> (bit_shift - 1) == 0 {
                result_size -= 1;
            }
        }
        let mut limbs = mag::alloc_limbs(result_size);
        let mut dest = 0;
        let mut high_digit = self.limbs[limb_shift];
        let mut low_digit = high_digit >> bit_shift;
        for pos in limb_shift + 1..self.limbs.len() {
            high_digit = self.limbs[pos];
            limbs[dest] = low_digit | (high_digit << digit_lshift);
            dest += 1;
            low_digit = high_digit >> bit_shift;
        }
        if dest < result_size {
            limbs[dest] = if is_negative(high_digit) {
                low_digit | (LIMB_MASK << digit_lshift)
            } else {
                low_digit
            };
        }
        BigInt { limbs }
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, shift: usize) -> BigInt {
        &self >> shift
    }
}

impl ShrAssign<usize> for BigInt {
    /// Shifts within the existing buffer and truncates; no allocation.
    fn shr_assign(&mut self, shift: usize) {
        let limb_shift = shift / LIMB_BITS as usize;
        let bit_shift = (shift % LIMB_BITS as usize) as u32;
        if self.limbs.len() <= limb_shift {
            let fill = if self.is_negative() { LIMB_MASK } else { 0 };
            self.limbs.clear();
            self.limbs.push(fill);
            return;
        }
        if bit_shift == 0 {
            if shift != 0 {
                let new_len = self.limbs.len() - limb_shift;
                self.limbs.copy_within(limb_shift.., 0);
                self.limbs.truncate(new_len);
            }
            return;
        }
        let digit_lshift = LIMB_BITS - bit_shift;
        let len = self.limbs.len();
        let mut dest = 0;
        let mut high_digit = self.limbs[limb_shift];
        let mut low_digit = high_digit >> bit_shift;
        for pos in limb_shift + 1..len {
            high_digit = self.limbs[pos];
            self.limbs[dest] = low_digit | (high_digit << digit_lshift);
            dest += 1;
            low_digit = high_digit >> bit_shift;
        }
        self.limbs[dest] = if is_negative(high_digit) {
            low_digit | (LIMB_MASK << digit_lshift)
        } else {
            low_digit
        };
        self.limbs.truncate(len - limb_shift);
        self.normalize();
    }
}

/// `2^shift`, built by placing the single set bit. Keeps a zero top
/// limb when the bit lands on a sign position.
pub(crate) fn pow2(shift: u64) -> BigInt {
    let result_size = (shift as usize + 1) / LIMB_BITS as usize + 1;
    let bit_pos = (shift % LIMB_BITS as u64) as u32;
    let mut limbs = mag::alloc_limbs(result_size);
    if bit_pos == LIMB_BITS - 1 {
        limbs[result_size - 2] = (1 as Limb) << bit_pos;
    } else {
        limbs[result_size - 1] = (1 as Limb) << bit_pos;
    }
    BigInt { limbs }
}

impl BigInt {
    /// Width of the minimal two's-complement form without the sign
    /// bit: `floor(log2 a) + 1` for positive values, the bit count of
    /// `|a| - 1` for negative ones, 0 for zero. Equivalently the
    /// smallest n with `-2^n <= a < 2^n`.
    pub fn bit_length(&self) -> i64 {
        let top = self.limbs[self.limbs.len() - 1];
        let limb_bits = if is_negative(top) {
            most_significant_bit(!top) + 1
        } else {
            most_significant_bit(top) + 1
        };
        (self.limbs.len() as i64 - 1) * LIMB_BITS as i64 + limb_bits as i64
    }

    /// Position of the lowest set bit, -1 for zero.
    pub fn lowest_set_bit(&self) -> i64 {
        for (pos, &digit) in self.limbs.iter().enumerate() {
            if digit != 0 {
                return pos as i64 * LIMB_BITS as i64 + least_significant_bit(digit) as i64;
            }
        }
        -1
    }

    /// `floor(log2 self)` for positive values, -1 for zero,
    /// `Err(Numeric)` for negative input.
    pub fn log2(&self) -> Result<i64, Error> {
        if self.is_negative() {
            return Err(Error::Numeric);
        }
        Ok((self.limbs.len() as i64 - 1) * LIMB_BITS as i64
            + most_significant_bit(self.limbs[self.limbs.len() - 1]) as i64)
    }

    /// Greatest common divisor of the absolute values; `gcd(a, 0)`
    /// is `|a|`.
    ///
    /// Binary GCD (strip the shared power of two, then subtract and
    /// shift) when the operands are of comparable size; when the limb
    /// counts differ by more than ten the shift work becomes
    /// pathological and a Euclidean remainder loop takes over.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        let mut a = self.abs();
        let mut b = other.abs();
        if a.limbs.len().abs_diff(b.limbs.len()) > 10 {
            while !a.is_zero() {
                let remainder = &b % &a;
                b = a;
                a = remainder;
            }
            b
        } else {
            let lowest_a = a.lowest_set_bit();
            let lowest_b = b.lowest_set_bit();
            let shift = lowest_a.min(lowest_b) as usize;
            a >>= lowest_a as usize;
            loop {
                b >>= b.lowest_set_bit() as usize;
                if a.cmp(&b) == Ordering::Less {
                    b -= &a;
                } else {
                    let difference = &a - &b;
                    a = b;
                    b = difference;
                }
                if b.is_zero() {
                    break;
                }
            }
            a << shift
        }
    }
}
