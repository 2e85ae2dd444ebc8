//! Slice — a strided window over another node.
//!
//! Python-style slicing: `start`/`stop`/`step` default and clamp the same
//! way a Python `slice` object's `.indices()` would, except that
//! out-of-range bounds clamp rather than raise, overriding the stricter
//! behaviour of the source this was ported from. Slicing a slice just
//! wraps again — composition falls out of `item` recursing into `raw`, no
//! flattening needed.

use std::rc::Rc;

use num_traits::{One, Signed, Zero};

use crate::bigint::{SInt, UInt};
use crate::env::Env;
use crate::error::{Error, Result};

use super::Node;

pub struct Slice {
    raw: Rc<Node>,
    start: SInt,
    step: SInt,
    length: UInt,
}

impl Slice {
    pub fn new(
        raw: Rc<Node>,
        start: Option<SInt>,
        stop: Option<SInt>,
        step: Option<SInt>,
    ) -> Result<Self> {
        let raw_len = raw.len();
        let (start, stop, step) = slice_indices(start, stop, step, &raw_len)?;
        let length = slice_length(&start, &stop, &step);
        Ok(Self {
            raw,
            start,
            step,
            length,
        })
    }

    pub fn len(&self) -> UInt {
        self.length.clone()
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        let j = &self.start + SInt::from(i.clone()) * &self.step;
        let j = j.to_biguint().expect("in-range slice index is non-negative");
        self.raw.item(&j, env)
    }

    pub fn has_groupref(&self) -> bool {
        self.raw.has_groupref()
    }
}

fn sign(step: &SInt) -> SInt {
    if step.is_negative() {
        -SInt::one()
    } else {
        SInt::one()
    }
}

/// Clamps a possibly-negative, possibly-out-of-range index against `size`:
/// negative values add `size`; values still below `0` become `0`; values
/// above `size` become `size`.
fn adjust_index(n: &SInt, size: &SInt) -> SInt {
    let mut n = n.clone();
    if n.is_negative() {
        n += size;
    }
    if n.is_negative() {
        n = SInt::zero();
    }
    if &n > size {
        n = size.clone();
    }
    n
}

fn slice_indices(
    start: Option<SInt>,
    stop: Option<SInt>,
    step: Option<SInt>,
    size: &UInt,
) -> Result<(SInt, SInt, SInt)> {
    let step = step.unwrap_or_else(|| SInt::from(1));
    if step.is_zero() {
        return Err(Error::ZeroStep);
    }
    let size_signed = SInt::from(size.clone());
    let positive = !step.is_negative();

    let start = match start {
        Some(s) => adjust_index(&s, &size_signed),
        None => {
            if positive {
                SInt::zero()
            } else {
                &size_signed - SInt::from(1)
            }
        }
    };
    let stop = match stop {
        Some(s) => adjust_index(&s, &size_signed),
        None => {
            if positive {
                size_signed.clone()
            } else {
                SInt::from(-1)
            }
        }
    };

    Ok((start, stop, step))
}

fn slice_length(start: &SInt, stop: &SInt, step: &SInt) -> UInt {
    let numerator = stop - start + step - sign(step);
    if numerator.is_negative() || step.is_zero() {
        return UInt::zero();
    }
    let (q, _) = crate::bigint::divmod_signed(&numerator, step);
    if q.is_negative() {
        UInt::zero()
    } else {
        q.to_biguint().expect("checked non-negative above")
    }
}
