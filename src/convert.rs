//! Conversions: machine integers, decimal and radix strings, the hex
//! debug literal, C byte literals and their binary import form.

use std::fmt;
use std::str::FromStr;

use crate::bigint::BigInt;
use crate::error::Error;
use crate::limb::{
    DECIMAL_DIGITS_IN_LIMB, DLimb, LIMB_BITS, LIMB_BYTES, LIMB_MASK, Limb, POWER_OF_10_IN_LIMB,
};
use crate::mag;

const RADIX_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

// ============================================================================
// Machine integers
// ============================================================================

impl From<i64> for BigInt {
    /// Little-endian pack into 64/W limbs, then normalize.
    fn from(mut number: i64) -> BigInt {
        let count = (64 / LIMB_BITS) as usize;
        let mut limbs = Vec::with_capacity(count);
        for _ in 0..count {
            limbs.push(number as Limb);
            number >>= LIMB_BITS;
        }
        BigInt::from_twos_complement(limbs)
    }
}

impl From<i32> for BigInt {
    fn from(number: i32) -> BigInt {
        BigInt::from(number as i64)
    }
}

impl From<u64> for BigInt {
    /// Unsigned sources get a zero guard limb so the top bit is never
    /// read as a sign.
    fn from(mut number: u64) -> BigInt {
        let count = (64 / LIMB_BITS) as usize;
        let mut limbs = Vec::with_capacity(count + 1);
        for _ in 0..count {
            limbs.push(number as Limb);
            number >>= LIMB_BITS;
        }
        limbs.push(0);
        BigInt::from_twos_complement(limbs)
    }
}

impl From<u32> for BigInt {
    fn from(number: u32) -> BigInt {
        BigInt::from(number as u64)
    }
}

impl BigInt {
    /// Narrowing conversion; `Err(Range)` unless the limb count fits
    /// the target width.
    pub fn to_i64(&self) -> Result<i64, Error> {
        if self.limbs.len() > (64 / LIMB_BITS) as usize {
            return Err(Error::Range);
        }
        let mut value: i64 = if self.is_negative() { -1 } else { 0 };
        for &digit in self.limbs.iter().rev() {
            value = (value << LIMB_BITS) | digit as i64;
        }
        Ok(value)
    }

    pub fn to_i32(&self) -> Result<i32, Error> {
        if self.limbs.len() > (32 / LIMB_BITS) as usize {
            return Err(Error::Range);
        }
        let mut value: i64 = if self.is_negative() { -1 } else { 0 };
        for &digit in self.limbs.iter().rev() {
            value = (value << LIMB_BITS) | digit as i64;
        }
        Ok(value as i32)
    }
}

impl TryFrom<&BigInt> for i64 {
    type Error = Error;

    fn try_from(value: &BigInt) -> Result<i64, Error> {
        value.to_i64()
    }
}

impl TryFrom<&BigInt> for i32 {
    type Error = Error;

    fn try_from(value: &BigInt) -> Result<i32, Error> {
        value.to_i32()
    }
}

// ============================================================================
// Decimal and radix strings
// ============================================================================

/// Largest power of `radix` that fits one limb, and its digit count.
/// Conversion moves this many digits per limb operation.
fn radix_batch(radix: u32) -> (Limb, u32) {
    if radix == 10 {
        return (POWER_OF_10_IN_LIMB, DECIMAL_DIGITS_IN_LIMB as u32);
    }
    let mut power = radix as DLimb;
    let mut digits = 1;
    while power * radix as DLimb <= LIMB_MASK as DLimb {
        power *= radix as DLimb;
        digits += 1;
    }
    (power as Limb, digits)
}

impl BigInt {
    /// Parses `-?[digits]+` in the given radix (2 ..= 36, letters in
    /// either case); anything else is `Err(Range)`.
    pub fn from_str_radix(text: &str, radix: u32) -> Result<BigInt, Error> {
        assert!(
            (2..=36).contains(&radix),
            "from_str_radix: radix must lie in the range 2..=36"
        );
        let bytes = text.as_bytes();
        let (negative, digits) = match bytes.first() {
            Some(b'-') => (true, &bytes[1..]),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return Err(Error::Range);
        }
        let (batch_power, batch_digits) = radix_batch(radix);
        let mut limbs = Vec::with_capacity(digits.len() / batch_digits as usize + 2);
        limbs.push(0);
        let mut chunk_value: Limb = 0;
        let mut chunk_len: u32 = 0;
        for &byte in digits {
            let digit = (byte as char).to_digit(radix).ok_or(Error::Range)?;
            chunk_value = chunk_value * radix as Limb + digit as Limb;
            chunk_len += 1;
            if chunk_len == batch_digits {
                mag::mul_add(&mut limbs, batch_power, chunk_value);
                chunk_value = 0;
                chunk_len = 0;
            }
        }
        if chunk_len > 0 {
            mag::mul_add(&mut limbs, (radix as Limb).pow(chunk_len), chunk_value);
        }
        Ok(BigInt::from_unsigned(limbs, negative))
    }

    /// Digit string in the given radix, lowercase, `-` prefix when
    /// negative, no leading zeros.
    pub fn to_str_radix(&self, radix: u32) -> String {
        let digits = self.magnitude_digits(radix);
        if self.is_negative() {
            let mut out = String::with_capacity(digits.len() + 1);
            out.push('-');
            out.push_str(&digits);
            out
        } else {
            digits
        }
    }

    /// Digits of |self|. Each division pass extracts one limb-sized
    /// batch of digits; only the leading batch is printed unpadded.
    fn magnitude_digits(&self, radix: u32) -> String {
        assert!(
            (2..=36).contains(&radix),
            "to_str_radix: radix must lie in the range 2..=36"
        );
        let (batch_power, batch_digits) = radix_batch(radix);
        let mut magnitude = self.magnitude();
        let mut batches: Vec<Limb> = Vec::new();
        loop {
            let remainder = mag::div_assign_small(&mut magnitude, batch_power);
            if magnitude.len() > 1 && magnitude[magnitude.len() - 1] == 0 {
                magnitude.pop();
            }
            batches.push(remainder);
            if magnitude.len() == 1 && magnitude[0] == 0 {
                break;
            }
        }
        let mut out = String::with_capacity(batches.len() * batch_digits as usize);
        for (index, &batch) in batches.iter().rev().enumerate() {
            let width = if index == 0 { 0 } else { batch_digits };
            push_batch(&mut out, batch, radix, width);
        }
        out
    }
}

/// Appends one digit batch, zero-padded to `width` (0 means no
/// padding, but always at least one digit).
fn push_batch(out: &mut String, mut batch: Limb, radix: u32, width: u32) {
    let mut buffer = [0u8; LIMB_BITS as usize];
    let mut len = 0;
    while batch != 0 {
        buffer[len] = RADIX_DIGITS[(batch % radix as Limb) as usize];
        batch /= radix as Limb;
        len += 1;
    }
    if len == 0 && width == 0 {
        buffer[len] = b'0';
        len += 1;
    }
    while (len as u32) < width {
        buffer[len] = b'0';
        len += 1;
    }
    for &byte in buffer[..len].iter().rev() {
        out.push(byte as char);
    }
}

impl FromStr for BigInt {
    type Err = Error;

    /// Decimal literal: optional leading `-`, one or more ASCII
    /// digits, nothing else.
    fn from_str(text: &str) -> Result<BigInt, Error> {
        BigInt::from_str_radix(text, 10)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.magnitude_digits(10))
    }
}

impl fmt::Debug for BigInt {
    /// The hex literal doubles as the debug form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_literal())
    }
}

// ============================================================================
// Hex literal, byte forms
// ============================================================================

impl BigInt {
    /// `16#` followed by the limbs in uppercase hex, most significant
    /// first, W/4 digits per limb. The top limb is compacted: redundant
    /// leading `FF` byte pairs are stripped from negative values and
    /// `00` pairs from non-negative ones, as long as the next byte
    /// still carries the sign.
    pub fn to_hex_literal(&self) -> String {
        let top = self.limbs[self.limbs.len() - 1];
        let mut byte_count = LIMB_BYTES;
        if self.is_negative() {
            while byte_count > 1
                && (top >> (8 * (byte_count - 1))) & 0xFF == 0xFF
                && (top >> (8 * (byte_count - 2))) & 0x80 == 0x80
            {
                byte_count -= 1;
            }
        } else {
            while byte_count > 1
                && (top >> (8 * (byte_count - 1))) & 0xFF == 0
                && (top >> (8 * (byte_count - 2))) & 0x80 == 0
            {
                byte_count -= 1;
            }
        }
        let masked = top as DLimb & (((1 as DLimb) << (8 * byte_count)) - 1);
        let mut out = String::with_capacity(3 + 2 * LIMB_BYTES * self.limbs.len());
        out.push_str("16#");
        out.push_str(&format!("{:0width$X}", masked, width = 2 * byte_count));
        for &digit in self.limbs[..self.limbs.len() - 1].iter().rev() {
            out.push_str(&format!("{:0width$X}", digit, width = 2 * LIMB_BYTES));
        }
        out
    }

    /// Minimal big-endian two's-complement byte form, at least one
    /// byte (zero is a single `0x00`).
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.limbs.len() * LIMB_BYTES);
        for &digit in self.limbs.iter().rev() {
            for byte_num in (0..LIMB_BYTES).rev() {
                bytes.push((digit >> (8 * byte_num)) as u8);
            }
        }
        let strip: u8 = if self.is_negative() { 0xFF } else { 0x00 };
        let keep_bit: u8 = if self.is_negative() { 0x80 } else { 0x00 };
        let mut start = 0;
        while start + 1 < bytes.len() && bytes[start] == strip && bytes[start + 1] & 0x80 == keep_bit
        {
            start += 1;
        }
        bytes.split_off(start)
    }

    /// C array literal `{0xXX,...}`: the four-byte big-endian count of
    /// the payload, then the payload from [`BigInt::to_be_bytes`]. The
    /// count is at least 1.
    pub fn to_c_literal(&self) -> String {
        let payload = self.to_be_bytes();
        let mut out = String::with_capacity(5 * (payload.len() + 4) + 2);
        out.push('{');
        for byte in (payload.len() as u32).to_be_bytes() {
            out.push_str(&format!("0x{byte:02X},"));
        }
        for (index, byte) in payload.iter().enumerate() {
            out.push_str(&format!("0x{byte:02X}"));
            if index + 1 < payload.len() {
                out.push(',');
            }
        }
        out.push('}');
        out
    }

    /// Inverse of the C-literal payload: a four-byte big-endian count,
    /// then that many two's-complement bytes, most significant first.
    /// The final partial limb is zero- or sign-extended from the top
    /// byte's high bit. A zero count is accepted and yields zero;
    /// a buffer shorter than its count is `Err(Range)`.
    pub fn import(buffer: &[u8]) -> Result<BigInt, Error> {
        if buffer.len() < 4 {
            return Err(Error::Range);
        }
        let count = u32::from_be_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]) as usize;
        if buffer.len() < 4 + count {
            return Err(Error::Range);
        }
        if count == 0 {
            return Ok(BigInt::zero());
        }
        let payload = &buffer[4..4 + count];
        let sign_byte: u8 = if payload[0] >= 128 { 0xFF } else { 0x00 };
        let result_size = count.div_ceil(LIMB_BYTES);
        let mut limbs = Vec::with_capacity(result_size);
        let mut byte_index = count;
        for _ in 0..result_size {
            let mut digit: Limb = 0;
            for byte_num in 0..LIMB_BYTES {
                let byte = if byte_index > 0 {
                    byte_index -= 1;
                    payload[byte_index]
                } else {
                    sign_byte
                };
                digit |= (byte as Limb) << (8 * byte_num);
            }
            limbs.push(digit);
        }
        Ok(BigInt::from_twos_complement(limbs))
    }
}
