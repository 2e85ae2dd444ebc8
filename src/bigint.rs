//! Arbitrary-precision arithmetic facade.
//!
//! Cardinalities, offsets, and indices routinely exceed any machine word —
//! a pattern as small as `.*` over a 256-character charset already denotes
//! more than 2^65536 strings. Everything in `seq` and `digits` goes through
//! this module's `UInt`/`SInt` aliases rather than touching `num_bigint`
//! directly, so the rest of the crate has one place to swap the backing
//! representation if it ever needs to.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Non-negative arbitrary-precision integer: cardinalities, offsets, and
/// normalized (non-negative) indices all live here.
pub type UInt = BigUint;
/// Signed arbitrary-precision integer: user-facing indices and slice
/// `start`/`stop`/`step` parameters, which may be negative.
pub type SInt = BigInt;

/// `(x / y, x % y)`, truncating toward zero.
pub fn divmod(x: &UInt, y: &UInt) -> (UInt, UInt) {
    x.div_rem(y)
}

/// `(x / y, x % y)` over signed integers, truncating toward zero — matches
/// Rust's native integer division.
pub fn divmod_signed(x: &SInt, y: &SInt) -> (SInt, SInt) {
    x.div_rem(y)
}

/// `base^exp`. Exponents beyond `u32::MAX` are not reachable: repetition
/// counts are clamped by `max_count`, which is itself a `u32`.
pub fn pow(base: &UInt, exp: u32) -> UInt {
    base.pow(exp)
}

/// Number of bits needed to represent `x` (0 for `x == 0`).
pub fn bit_length(x: &UInt) -> u64 {
    x.bits()
}

/// `b^⌊log_b(n)⌋` for `n > 0`; `0` for `n == 0`.
pub fn largest_power(n: &UInt, b: &UInt) -> UInt {
    if n.is_zero() {
        return UInt::zero();
    }
    let mut power = UInt::one();
    loop {
        let next = &power * b;
        if &next > n {
            return power;
        }
        power = next;
    }
}

/// `Σ_{k=lo..hi} b^k`, exact.
///
/// For `b == 1` this is `hi - lo + 1` strings, each of a fixed length (every
/// "digit" is the same single symbol); otherwise the closed form
/// `(b^(hi+1) - b^lo) / (b - 1)` is exact because `b - 1` always divides the
/// numerator.
pub fn powersum(b: &UInt, lo: u32, hi: u32) -> UInt {
    debug_assert!(hi >= lo);
    if b.is_one() {
        return UInt::from(hi - lo + 1);
    }
    let bm1 = b - UInt::one();
    let a = pow(b, hi + 1);
    let c = pow(b, lo);
    (a - c) / bm1
}

/// Normalizes a user-facing signed index against `len`, producing a
/// non-negative `UInt` in `[0, len)`, or an `IndexError`.
pub fn normalize_index(i: &SInt, len: &UInt) -> Result<UInt> {
    let len_signed = SInt::from(len.clone());
    let adjusted = if i.sign() == num_bigint::Sign::Minus {
        i + &len_signed
    } else {
        i.clone()
    };
    if adjusted.sign() == num_bigint::Sign::Minus || adjusted >= len_signed {
        return Err(Error::Index(i.clone()));
    }
    Ok(adjusted.to_biguint().expect("checked non-negative above"))
}

/// Converts a `UInt` to `usize`, for the rare spots (content materialised
/// to a `Vec`, digit values used to index it) that are only ever reached
/// once a size is already known to be small.
pub fn to_usize(x: &UInt) -> Option<usize> {
    x.to_usize()
}
