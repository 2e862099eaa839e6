//! Signed arithmetic: operator impls, in-place variants, single-limb
//! fast paths and exponentiation.
//!
//! Every routine inspects operand signs, forwards magnitudes to the
//! kernels in `mag`, fixes the sign of the result and re-canonicalizes.
//! Pure forms borrow both operands and allocate; owned left-hand sides
//! reuse their storage via the in-place forms.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Rem, Sub, SubAssign};

use crate::bigint::{BigInt, add_signed_in_place, negate_limbs};
use crate::error::Error;
use crate::limb::{
    DLimb, LIMB_BITS, LIMB_MASK, Limb, SIGN_BIT, is_negative, most_significant_bit,
};
use crate::mag;

const MASK: DLimb = LIMB_MASK as DLimb;

// ============================================================================
// Addition / subtraction
// ============================================================================

impl Add for &BigInt {
    type Output = BigInt;

    /// Sorts the operands by limb count so one loop runs to the
    /// shorter length and a second, sign-extending loop to the longer.
    fn add(self, rhs: &BigInt) -> BigInt {
        let (big1, big2) = if rhs.limbs.len() > self.limbs.len() {
            (rhs, self)
        } else {
            (self, rhs)
        };
        let mut limbs = mag::alloc_limbs(big1.limbs.len() + 1);
        let mut carry: DLimb = 0;
        for pos in 0..big2.limbs.len() {
            carry += big1.limbs[pos] as DLimb + big2.limbs[pos] as DLimb;
            limbs[pos] = carry as Limb;
            carry >>= LIMB_BITS;
        }
        let mut big2_sign = big2.sign_limb() as DLimb;
        for pos in big2.limbs.len()..big1.limbs.len() {
            carry += big1.limbs[pos] as DLimb + big2_sign;
            limbs[pos] = carry as Limb;
            carry >>= LIMB_BITS;
        }
        if big1.is_negative() {
            big2_sign = big2_sign.wrapping_sub(1);
        }
        limbs[big1.limbs.len()] = carry.wrapping_add(big2_sign) as Limb;
        BigInt::from_twos_complement(limbs)
    }
}

impl Sub for &BigInt {
    type Output = BigInt;

    fn sub(self, rhs: &BigInt) -> BigInt {
        let mut carry: DLimb = 1;
        if self.limbs.len() >= rhs.limbs.len() {
            let mut limbs = mag::alloc_limbs(self.limbs.len() + 1);
            for pos in 0..rhs.limbs.len() {
                carry += self.limbs[pos] as DLimb + (!rhs.limbs[pos]) as DLimb;
                limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let mut big2_sign: DLimb = if rhs.is_negative() { 0 } else { MASK };
            for pos in rhs.limbs.len()..self.limbs.len() {
                carry += self.limbs[pos] as DLimb + big2_sign;
                limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            if self.is_negative() {
                big2_sign = big2_sign.wrapping_sub(1);
            }
            limbs[self.limbs.len()] = carry.wrapping_add(big2_sign) as Limb;
            BigInt::from_twos_complement(limbs)
        } else {
            let mut limbs = mag::alloc_limbs(rhs.limbs.len() + 1);
            for pos in 0..self.limbs.len() {
                carry += self.limbs[pos] as DLimb + (!rhs.limbs[pos]) as DLimb;
                limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let big1_sign = self.sign_limb() as DLimb;
            for pos in self.limbs.len()..rhs.limbs.len() {
                carry += big1_sign + (!rhs.limbs[pos]) as DLimb;
                limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let mut big2_sign: DLimb = if rhs.is_negative() { 0 } else { MASK };
            if self.is_negative() {
                big2_sign = big2_sign.wrapping_sub(1);
            }
            limbs[rhs.limbs.len()] = carry.wrapping_add(big2_sign) as Limb;
            BigInt::from_twos_complement(limbs)
        }
    }
}

impl AddAssign<&BigInt> for BigInt {
    /// In-place sum. When `rhs` is no longer than `self` the carry (or
    /// borrow) chain stops as soon as it dies out; the buffer grows by
    /// one limb exactly when the top limb would stop being a pure sign
    /// extension of the result.
    fn add_assign(&mut self, rhs: &BigInt) {
        if self.limbs.len() >= rhs.limbs.len() {
            let big1_sign = self.sign_limb() as DLimb;
            let mut carry: DLimb = 0;
            for pos in 0..rhs.limbs.len() {
                carry += self.limbs[pos] as DLimb + rhs.limbs[pos] as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let mut pos = rhs.limbs.len();
            if rhs.is_negative() {
                while carry == 0 && pos < self.limbs.len() {
                    carry = self.limbs[pos] as DLimb + MASK;
                    self.limbs[pos] = carry as Limb;
                    carry >>= LIMB_BITS;
                    pos += 1;
                }
                carry += MASK;
            } else {
                while carry != 0 && pos < self.limbs.len() {
                    carry += self.limbs[pos] as DLimb;
                    self.limbs[pos] = carry as Limb;
                    carry >>= LIMB_BITS;
                    pos += 1;
                }
            }
            let top = self.limbs[self.limbs.len() - 1];
            let ext = carry.wrapping_add(big1_sign) as Limb;
            if (ext != 0 || is_negative(top)) && (ext != LIMB_MASK || !is_negative(top)) {
                self.limbs.push(ext);
            } else {
                self.normalize();
            }
        } else {
            let old_len = self.limbs.len();
            let big1_sign = self.sign_limb() as DLimb;
            self.limbs.resize(rhs.limbs.len() + 1, 0);
            let mut carry: DLimb = 0;
            for pos in 0..old_len {
                carry += self.limbs[pos] as DLimb + rhs.limbs[pos] as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            for pos in old_len..rhs.limbs.len() {
                carry += big1_sign + rhs.limbs[pos] as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let big2_sign = rhs.sign_limb() as DLimb;
            let top_pos = rhs.limbs.len();
            self.limbs[top_pos] = carry.wrapping_add(big1_sign).wrapping_add(big2_sign) as Limb;
            self.normalize();
        }
    }
}

impl SubAssign<&BigInt> for BigInt {
    /// In-place difference, the mirror of `AddAssign` with the borrow
    /// chains flipped.
    fn sub_assign(&mut self, rhs: &BigInt) {
        if self.limbs.len() >= rhs.limbs.len() {
            let big1_sign = self.sign_limb() as DLimb;
            let mut carry: DLimb = 1;
            for pos in 0..rhs.limbs.len() {
                carry += self.limbs[pos] as DLimb + (!rhs.limbs[pos]) as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let mut pos = rhs.limbs.len();
            if rhs.is_negative() {
                while carry != 0 && pos < self.limbs.len() {
                    carry += self.limbs[pos] as DLimb;
                    self.limbs[pos] = carry as Limb;
                    carry >>= LIMB_BITS;
                    pos += 1;
                }
            } else {
                while carry == 0 && pos < self.limbs.len() {
                    carry = self.limbs[pos] as DLimb + MASK;
                    self.limbs[pos] = carry as Limb;
                    carry >>= LIMB_BITS;
                    pos += 1;
                }
                carry += MASK;
            }
            let top = self.limbs[self.limbs.len() - 1];
            let ext = carry.wrapping_add(big1_sign) as Limb;
            if (ext != 0 || is_negative(top)) && (ext != LIMB_MASK || !is_negative(top)) {
                self.limbs.push(ext);
            } else {
                self.normalize();
            }
        } else {
            let old_len = self.limbs.len();
            let big1_sign = self.sign_limb() as DLimb;
            self.limbs.resize(rhs.limbs.len() + 1, 0);
            let mut carry: DLimb = 1;
            for pos in 0..old_len {
                carry += self.limbs[pos] as DLimb + (!rhs.limbs[pos]) as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            for pos in old_len..rhs.limbs.len() {
                carry += big1_sign + (!rhs.limbs[pos]) as DLimb;
                self.limbs[pos] = carry as Limb;
                carry >>= LIMB_BITS;
            }
            let big2_sign: DLimb = if rhs.is_negative() { 0 } else { MASK };
            let top_pos = rhs.limbs.len();
            self.limbs[top_pos] = carry.wrapping_add(big1_sign).wrapping_add(big2_sign) as Limb;
            self.normalize();
        }
    }
}

impl Add<&BigInt> for BigInt {
    type Output = BigInt;

    /// Temp form: consumes and reuses the left operand's storage.
    fn add(mut self, rhs: &BigInt) -> BigInt {
        self += rhs;
        self
    }
}

impl Add for BigInt {
    type Output = BigInt;

    fn add(mut self, rhs: BigInt) -> BigInt {
        self += &rhs;
        self
    }
}

impl Sub<&BigInt> for BigInt {
    type Output = BigInt;

    fn sub(mut self, rhs: &BigInt) -> BigInt {
        self -= rhs;
        self
    }
}

impl Sub for BigInt {
    type Output = BigInt;

    fn sub(mut self, rhs: BigInt) -> BigInt {
        self -= &rhs;
        self
    }
}

// ============================================================================
// Negation, absolute value, successor / predecessor
// ============================================================================

impl Neg for BigInt {
    type Output = BigInt;

    /// One carry-propagating complement pass; grows a guard limb when
    /// negating the most negative value of the current width.
    fn neg(mut self) -> BigInt {
        let was_negative = self.is_negative();
        self.negate_in_place();
        if self.is_negative() {
            if was_negative {
                self.limbs.push(0);
            } else {
                self.normalize();
            }
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl BigInt {
    /// |self|; grows by one limb for the most negative value.
    pub fn abs(&self) -> BigInt {
        if self.is_negative() { -self } else { self.clone() }
    }

    /// self + 1, freshly allocated.
    pub fn succ(&self) -> BigInt {
        let mut result = self.clone();
        result.incr();
        result
    }

    /// self - 1, freshly allocated.
    pub fn pred(&self) -> BigInt {
        let mut result = self.clone();
        result.decr();
        result
    }

    /// In-place increment. Crossing from -1 to 0 or overflowing the
    /// top limb adjusts the length by one.
    pub fn incr(&mut self) {
        let was_negative = self.is_negative();
        mag::incr(&mut self.limbs);
        let pos = self.limbs.len();
        if self.is_negative() {
            if !was_negative {
                self.limbs.push(0);
            } else if self.limbs[pos - 1] == LIMB_MASK
                && pos >= 2
                && is_negative(self.limbs[pos - 2])
            {
                self.limbs.truncate(pos - 1);
            }
        }
    }

    /// In-place decrement, the mirror of [`BigInt::incr`].
    pub fn decr(&mut self) {
        let was_negative = self.is_negative();
        mag::decr(&mut self.limbs);
        let pos = self.limbs.len();
        if !self.is_negative() {
            if was_negative {
                self.limbs.push(LIMB_MASK);
            } else if self.limbs[pos - 1] == 0 && pos >= 2 && !is_negative(self.limbs[pos - 2]) {
                self.limbs.truncate(pos - 1);
            }
        }
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl Mul for &BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        let negative = self.is_negative() != rhs.is_negative();
        let a = self.magnitude();
        let b = rhs.magnitude();
        BigInt::from_unsigned(mag::mul(&a, &b), negative)
    }
}

impl Mul<&BigInt> for BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> BigInt {
        &self * rhs
    }
}

impl Mul for BigInt {
    type Output = BigInt;

    fn mul(self, rhs: BigInt) -> BigInt {
        &self * &rhs
    }
}

impl MulAssign<&BigInt> for BigInt {
    fn mul_assign(&mut self, rhs: &BigInt) {
        *self = &*self * rhs;
    }
}

impl BigInt {
    /// self², using the dedicated squaring kernel (about half the limb
    /// products of the general multiply). `square(-a) == square(a)`.
    pub fn square(&self) -> BigInt {
        let mag_limbs = self.magnitude();
        let mut out = mag::alloc_limbs(2 * mag_limbs.len());
        mag::square(&mag_limbs, &mut out);
        BigInt::from_unsigned(out, false)
    }

    /// Product with a machine integer small enough to fit one limb,
    /// fusing the negation pass into the multiplication pass. Four
    /// variants keyed on the operand signs avoid materializing a
    /// positive copy.
    pub fn mul_small(&self, n: i32) -> BigInt {
        if n.unsigned_abs() as DLimb > MASK {
            // Only reachable with 16-bit limbs.
            return self * &BigInt::from(n);
        }
        let digit = n.unsigned_abs() as Limb;
        let mut limbs = mag::alloc_limbs(self.limbs.len() + 1);
        match (self.is_negative(), n < 0) {
            (false, false) => mul_positive_with_digit(&self.limbs, digit, &mut limbs),
            (true, false) => mul_negative_with_digit(&self.limbs, digit, &mut limbs),
            (false, true) => mul_positive_with_negated_digit(&self.limbs, digit, &mut limbs),
            (true, true) => mul_negative_with_negated_digit(&self.limbs, digit, &mut limbs),
        }
        BigInt::from_twos_complement(limbs)
    }

    /// O(1) comparison against a machine integer: decided by sign and
    /// limb count when the value cannot fit, by direct assembly when
    /// it can.
    pub fn cmp_i64(&self, rhs: i64) -> Ordering {
        if self.limbs.len() as u64 * LIMB_BITS as u64 > 64 {
            return if self.is_negative() {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        let mut value: i64 = if self.is_negative() { -1 } else { 0 };
        for &digit in self.limbs.iter().rev() {
            value = (value << LIMB_BITS) | digit as i64;
        }
        value.cmp(&rhs)
    }
}

/// out = a * digit for non-negative a; out has one limb more than a.
fn mul_positive_with_digit(a: &[Limb], digit: Limb, out: &mut [Limb]) {
    let mut mult_carry: DLimb = a[0] as DLimb * digit as DLimb;
    out[0] = mult_carry as Limb;
    mult_carry >>= LIMB_BITS;
    for pos in 1..a.len() {
        mult_carry += a[pos] as DLimb * digit as DLimb;
        out[pos] = mult_carry as Limb;
        mult_carry >>= LIMB_BITS;
    }
    out[a.len()] = mult_carry as Limb;
}

/// out = -(-a * digit) for negative a: the operand negation and the
/// result negation both ride along in their own carry chains.
fn mul_negative_with_digit(a: &[Limb], digit: Limb, out: &mut [Limb]) {
    let mut negate_carry: DLimb = 1;
    let mut mult_carry: DLimb;
    let mut result_carry: DLimb = 1;
    negate_carry += (!a[0]) as DLimb;
    mult_carry = (negate_carry & MASK) * digit as DLimb;
    result_carry += !mult_carry & MASK;
    out[0] = result_carry as Limb;
    negate_carry >>= LIMB_BITS;
    mult_carry >>= LIMB_BITS;
    result_carry >>= LIMB_BITS;
    for pos in 1..a.len() {
        negate_carry += (!a[pos]) as DLimb;
        mult_carry += (negate_carry & MASK) * digit as DLimb;
        result_carry += !mult_carry & MASK;
        out[pos] = result_carry as Limb;
        negate_carry >>= LIMB_BITS;
        mult_carry >>= LIMB_BITS;
        result_carry >>= LIMB_BITS;
    }
    result_carry += !mult_carry & MASK;
    out[a.len()] = result_carry as Limb;
}

/// out = -(a * digit) for non-negative a and a negated digit.
fn mul_positive_with_negated_digit(a: &[Limb], digit: Limb, out: &mut [Limb]) {
    let mut mult_carry: DLimb = a[0] as DLimb * digit as DLimb;
    let mut result_carry: DLimb = 1;
    result_carry += !mult_carry & MASK;
    out[0] = result_carry as Limb;
    mult_carry >>= LIMB_BITS;
    result_carry >>= LIMB_BITS;
    for pos in 1..a.len() {
        mult_carry += a[pos] as DLimb * digit as DLimb;
        result_carry += !mult_carry & MASK;
        out[pos] = result_carry as Limb;
        mult_carry >>= LIMB_BITS;
        result_carry >>= LIMB_BITS;
    }
    result_carry += !mult_carry & MASK;
    out[a.len()] = result_carry as Limb;
}

/// out = -a * digit for negative a and a negated digit: both negations
/// cancel, leaving the fused negate-and-multiply pass.
fn mul_negative_with_negated_digit(a: &[Limb], digit: Limb, out: &mut [Limb]) {
    let mut negate_carry: DLimb = 1;
    let mut mult_carry: DLimb;
    negate_carry += (!a[0]) as DLimb;
    mult_carry = (negate_carry & MASK) * digit as DLimb;
    out[0] = mult_carry as Limb;
    negate_carry >>= LIMB_BITS;
    mult_carry >>= LIMB_BITS;
    for pos in 1..a.len() {
        negate_carry += (!a[pos]) as DLimb;
        mult_carry += (negate_carry & MASK) * digit as DLimb;
        out[pos] = mult_carry as Limb;
        negate_carry >>= LIMB_BITS;
        mult_carry >>= LIMB_BITS;
    }
    out[a.len()] = mult_carry as Limb;
}

// ============================================================================
// Division
// ============================================================================

impl BigInt {
    /// Truncating division; `Err(Numeric)` on a zero divisor.
    pub fn checked_div(&self, rhs: &BigInt) -> Result<BigInt, Error> {
        if rhs.is_zero() {
            Err(Error::Numeric)
        } else if rhs.limbs.len() == 1 {
            Ok(div_by_limb(self, rhs.limbs[0]))
        } else if self.limbs.len() < rhs.limbs.len() {
            Ok(div_size_less(self, rhs))
        } else {
            Ok(div_general(self, rhs))
        }
    }

    /// Remainder of truncating division: same sign as the dividend,
    /// `|rem| < |rhs|`. `Err(Numeric)` on a zero divisor.
    pub fn checked_rem(&self, rhs: &BigInt) -> Result<BigInt, Error> {
        if rhs.is_zero() {
            Err(Error::Numeric)
        } else if rhs.limbs.len() == 1 {
            Ok(rem_by_limb(self, rhs.limbs[0]))
        } else if self.limbs.len() < rhs.limbs.len() {
            Ok(rem_size_less(self, rhs))
        } else {
            Ok(rem_general(self, rhs))
        }
    }

    /// Flooring division, rounding toward negative infinity.
    pub fn checked_div_floor(&self, rhs: &BigInt) -> Result<BigInt, Error> {
        if rhs.is_zero() {
            Err(Error::Numeric)
        } else if rhs.limbs.len() == 1 {
            Ok(div_floor_by_limb(self, rhs.limbs[0]))
        } else if self.limbs.len() < rhs.limbs.len() {
            Ok(div_floor_size_less(self, rhs))
        } else {
            Ok(div_floor_general(self, rhs))
        }
    }

    /// Modulo paired with flooring division: `0 <= mod < rhs` for
    /// positive divisors, mirrored for negative ones, and
    /// `self == div_floor * rhs + mod`.
    pub fn checked_mod_floor(&self, rhs: &BigInt) -> Result<BigInt, Error> {
        if rhs.is_zero() {
            Err(Error::Numeric)
        } else if rhs.limbs.len() == 1 {
            Ok(mod_by_limb(self, rhs.limbs[0]))
        } else if self.limbs.len() < rhs.limbs.len() {
            Ok(mod_size_less(self, rhs))
        } else {
            Ok(mod_general(self, rhs))
        }
    }

    /// Flooring division; panics on a zero divisor like the `/`
    /// operator.
    pub fn div_floor(&self, rhs: &BigInt) -> BigInt {
        match self.checked_div_floor(rhs) {
            Ok(quotient) => quotient,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }

    /// Floor modulo; panics on a zero divisor.
    pub fn mod_floor(&self, rhs: &BigInt) -> BigInt {
        match self.checked_mod_floor(rhs) {
            Ok(modulo) => modulo,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

impl Div for &BigInt {
    type Output = BigInt;

    /// Truncating division toward zero.
    fn div(self, rhs: &BigInt) -> BigInt {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(_) => panic!("attempt to divide by zero"),
        }
    }
}

impl Div<&BigInt> for BigInt {
    type Output = BigInt;

    fn div(self, rhs: &BigInt) -> BigInt {
        &self / rhs
    }
}

impl Div for BigInt {
    type Output = BigInt;

    fn div(self, rhs: BigInt) -> BigInt {
        &self / &rhs
    }
}

impl Rem for &BigInt {
    type Output = BigInt;

    /// Remainder with the sign of the dividend.
    fn rem(self, rhs: &BigInt) -> BigInt {
        match self.checked_rem(rhs) {
            Ok(remainder) => remainder,
            Err(_) => panic!("attempt to calculate the remainder with a divisor of zero"),
        }
    }
}

impl Rem<&BigInt> for BigInt {
    type Output = BigInt;

    fn rem(self, rhs: &BigInt) -> BigInt {
        &self % rhs
    }
}

impl Rem for BigInt {
    type Output = BigInt;

    fn rem(self, rhs: BigInt) -> BigInt {
        &self % &rhs
    }
}

/// Quotient by a single-limb divisor (signed digit), one pass of
/// hardware division per limb.
fn div_by_limb(a: &BigInt, digit: Limb) -> BigInt {
    let mut negative = a.is_negative();
    let mut mag_limbs = a.magnitude();
    let mut d = digit;
    if is_negative(d) {
        negative = !negative;
        d = d.wrapping_neg();
    }
    mag::div_assign_small(&mut mag_limbs, d);
    BigInt::from_unsigned(mag_limbs, negative)
}

/// Remainder by a single-limb divisor; fits one limb by construction.
fn rem_by_limb(a: &BigInt, digit: Limb) -> BigInt {
    let d = if is_negative(digit) {
        digit.wrapping_neg()
    } else {
        digit
    };
    let mut r = mag::rem_small(&a.magnitude(), d);
    if a.is_negative() {
        r = r.wrapping_neg();
    }
    BigInt { limbs: vec![r] }
}

/// Floor quotient by a single-limb divisor: the truncating quotient,
/// moved one away from zero when negative with a nonzero remainder.
fn div_floor_by_limb(a: &BigInt, digit: Limb) -> BigInt {
    let mut negative = a.is_negative();
    let mut mag_limbs = a.magnitude();
    let mut d = digit;
    if is_negative(d) {
        negative = !negative;
        d = d.wrapping_neg();
    }
    let remainder = mag::div_assign_small(&mut mag_limbs, d);
    if negative && remainder != 0 {
        mag_limbs.push(0);
        mag::incr(&mut mag_limbs);
    }
    BigInt::from_unsigned(mag_limbs, negative)
}

/// Floor modulo by a single-limb divisor: the truncating remainder,
/// shifted by the divisor when the operand signs differ.
fn mod_by_limb(a: &BigInt, digit: Limb) -> BigInt {
    let r = rem_by_limb(a, digit);
    if a.is_negative() != is_negative(digit) && r.limbs[0] != 0 {
        BigInt {
            limbs: vec![r.limbs[0].wrapping_add(digit)],
        }
    } else {
        r
    }
}

/// A dividend with fewer limbs than the divisor almost always means
/// |a| < |b|; the one exception is a = -2^(kW-1) against b = 2^(kW-1),
/// whose normalized forms differ in length by one.
fn magnitudes_coincide(a: &BigInt, b: &BigInt) -> bool {
    a.limbs.len() + 1 == b.limbs.len()
        && a.limbs[a.limbs.len() - 1] == SIGN_BIT
        && b.limbs[b.limbs.len() - 1] == 0
        && b.limbs[b.limbs.len() - 2] == SIGN_BIT
        && a.limbs[..a.limbs.len() - 1].iter().all(|&digit| digit == 0)
        && b.limbs[..a.limbs.len() - 1].iter().all(|&digit| digit == 0)
}

fn div_size_less(a: &BigInt, b: &BigInt) -> BigInt {
    if magnitudes_coincide(a, b) {
        BigInt {
            limbs: vec![LIMB_MASK],
        }
    } else {
        BigInt::zero()
    }
}

fn div_floor_size_less(a: &BigInt, b: &BigInt) -> BigInt {
    if magnitudes_coincide(a, b)
        || (!a.is_zero() && a.is_negative() != b.is_negative())
    {
        BigInt {
            limbs: vec![LIMB_MASK],
        }
    } else {
        BigInt::zero()
    }
}

fn rem_size_less(a: &BigInt, b: &BigInt) -> BigInt {
    if magnitudes_coincide(a, b) {
        BigInt::zero()
    } else {
        a.clone()
    }
}

fn mod_size_less(a: &BigInt, b: &BigInt) -> BigInt {
    if magnitudes_coincide(a, b) {
        BigInt::zero()
    } else if !a.is_zero() && a.is_negative() != b.is_negative() {
        b + a
    } else {
        a.clone()
    }
}

/// Builds the unsigned dividend/divisor pair for Knuth-D: |a| widened
/// by one zero limb, both shifted left until the divisor's top bit is
/// set. Returns the applied shift so remainders can be shifted back.
fn prepare_knuth(a: &BigInt, b: &BigInt) -> (Vec<Limb>, Vec<Limb>, u32) {
    let mut u = a.unsigned_extended();
    u.push(0);
    let mut v = b.unsigned_extended();
    if v[v.len() - 1] == 0 {
        // |b|'s top bit already sits in the limb below the guard; drop
        // the guard from both sides and divide unshifted.
        v.pop();
        u.pop();
        (u, v, 0)
    } else {
        let shift = v[v.len() - 1].leading_zeros();
        if shift != 0 {
            mag::shl_small(&mut u, shift);
            mag::shl_small(&mut v, shift);
        }
        (u, v, shift)
    }
}

fn div_general(a: &BigInt, b: &BigInt) -> BigInt {
    let negative = a.is_negative() != b.is_negative();
    let (mut u, v, _) = prepare_knuth(a, b);
    let mut q = mag::alloc_limbs(u.len() - v.len() + 1);
    mag::div_knuth(&mut u, &v, &mut q);
    BigInt::from_unsigned(q, negative)
}

fn div_floor_general(a: &BigInt, b: &BigInt) -> BigInt {
    let negative = a.is_negative() != b.is_negative();
    let (mut u, v, _) = prepare_knuth(a, b);
    let mut q = mag::alloc_limbs(u.len() - v.len() + 1);
    mag::div_knuth(&mut u, &v, &mut q);
    if negative && !mag::is_zero(&u) {
        mag::incr(&mut q);
    }
    BigInt::from_unsigned(q, negative)
}

fn rem_general(a: &BigInt, b: &BigInt) -> BigInt {
    let negative = a.is_negative();
    let (mut u, v, shift) = prepare_knuth(a, b);
    mag::rem_knuth(&mut u, &v);
    if shift != 0 {
        mag::shr_small(&mut u, shift);
    }
    BigInt::from_unsigned(u, negative)
}

fn mod_general(a: &BigInt, b: &BigInt) -> BigInt {
    let negative1 = a.is_negative();
    let negative2 = b.is_negative();
    let (mut u, v, shift) = prepare_knuth(a, b);
    mag::rem_knuth(&mut u, &v);
    if shift != 0 {
        mag::shr_small(&mut u, shift);
    }
    // Room for the sign-extended divisor in the correction below.
    u.push(0);
    if negative1 {
        if negative2 {
            negate_limbs(&mut u);
        } else if !mag::is_zero(&u) {
            negate_limbs(&mut u);
            add_signed_in_place(&mut u, &b.limbs);
        }
    } else if negative2 && !mag::is_zero(&u) {
        add_signed_in_place(&mut u, &b.limbs);
    }
    BigInt::from_twos_complement(u)
}

// ============================================================================
// Exponentiation
// ============================================================================

impl BigInt {
    /// self^exp by square-and-multiply on magnitudes. `exp == 0` gives
    /// 1 and `exp == 1` a copy; a single-limb power-of-two base places
    /// its one bit directly instead of multiplying.
    pub fn pow(&self, exp: u32) -> BigInt {
        if exp == 0 {
            return BigInt { limbs: vec![1] };
        }
        if exp == 1 {
            return self.clone();
        }
        if self.limbs.len() == 1 {
            return pow_digit(self.limbs[0], exp);
        }
        let negative = self.is_negative() && exp & 1 == 1;
        let base = self.magnitude();
        let cap = base.len() * (exp as usize + 1);
        BigInt::from_unsigned(pow_magnitude(base, exp, cap), negative)
    }
}

/// Power of a single (signed) limb, exp >= 2.
fn pow_digit(digit: Limb, exp: u32) -> BigInt {
    if digit == 0 {
        return BigInt::zero();
    }
    let negative = is_negative(digit) && exp & 1 == 1;
    let base = if is_negative(digit) {
        digit.wrapping_neg()
    } else {
        digit
    };
    let bit_size = (most_significant_bit(base) + 1) as u32;
    if base == (1 as Limb) << (bit_size - 1) {
        let result = crate::bits::pow2((bit_size as u64 - 1) * exp as u64);
        if negative { -result } else { result }
    } else {
        BigInt::from_unsigned(pow_magnitude(vec![base], exp, exp as usize + 1), negative)
    }
}

/// Square-and-multiply over trimmed non-negative magnitudes. The
/// square, result and scratch buffers are reserved up front to `cap`
/// limbs and swapped between iterations instead of reallocated.
fn pow_magnitude(base: Vec<Limb>, exp: u32, cap: usize) -> Vec<Limb> {
    let mut square = base;
    square.reserve(cap.saturating_sub(square.len()));
    let mut help: Vec<Limb> = Vec::with_capacity(cap);
    let mut result: Vec<Limb> = Vec::with_capacity(cap);
    if exp & 1 == 1 {
        result.extend_from_slice(&square);
    } else {
        result.push(1);
    }
    let mut e = exp >> 1;
    while e != 0 {
        mag::square_into(&square, &mut help);
        std::mem::swap(&mut square, &mut help);
        if e & 1 == 1 {
            mag::mul_into(&result, &square, &mut help);
            std::mem::swap(&mut result, &mut help);
        }
        e >>= 1;
    }
    result
}
