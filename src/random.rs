//! Uniform sampling between two bounds.

use std::cmp::Ordering;

use crate::bigint::{BigInt, add_signed_in_place, cmp_magnitudes};
use crate::error::Error;
use crate::limb::{DLimb, LIMB_BITS, LIMB_MASK, Limb};
use crate::mag;

impl BigInt {
    /// Uniform sample in `[lo, hi]` inclusive; `Err(Range)` when
    /// `lo > hi`.
    ///
    /// The generator contract is one uniformly distributed 32-bit word
    /// per call. Sampling is rejection-based: fill a buffer the size
    /// of `hi - lo`, mask the top limb down to its bit length, retry
    /// while the sample exceeds the scale, then offset by `lo`.
    pub fn random_between<F>(lo: &BigInt, hi: &BigInt, mut rng: F) -> Result<BigInt, Error>
    where
        F: FnMut() -> u32,
    {
        if lo > hi {
            return Err(Error::Range);
        }
        let scale = hi - lo;
        if scale.is_zero() {
            return Ok(lo.clone());
        }
        let scale_len = scale.limbs.len();
        let result_size = lo.limbs.len().max(scale_len) + 1;
        let mut limbs = mag::alloc_limbs(result_size);
        let top = scale.limbs[scale_len - 1];
        let mask: Limb = if top == 0 {
            0
        } else {
            LIMB_MASK >> top.leading_zeros()
        };
        let mut random_word: DLimb = 0;
        loop {
            for pos in 0..scale_len {
                if random_word == 0 {
                    random_word = rng() as DLimb;
                }
                limbs[pos] = random_word as Limb;
                random_word >>= LIMB_BITS;
            }
            limbs[scale_len - 1] &= mask;
            if cmp_magnitudes(&limbs[..scale_len], &scale.limbs) != Ordering::Greater {
                break;
            }
        }
        add_signed_in_place(&mut limbs, &lo.limbs);
        Ok(BigInt::from_twos_complement(limbs))
    }
}
