//! Repetition — bounded repeat of a content node.
//!
//! `x{lo,hi}` denotes the disjoint union, over `k` in `[lo, hi]`, of exactly
//! `k` copies of `content`. Ported from `sre_yield`'s `RepetitiveSequence`:
//! an offset table (one entry per `k`, built lazily through
//! [`CachingFuncSequence`]) locates which repeat-count bucket an index falls
//! in, then a mixed-radix digit stream picks out which string within that
//! bucket.
//!
//! The offset table is itself split at `offset_break`: below it, offsets
//! fit in a machine word and a plain binary search over that prefix is
//! cheap; above it, the tail is only ever touched by the few lookups that
//! actually land there. This mirrors `OFFSET_BREAK_THRESHOLD` in the
//! original — a performance parameter, not a correctness one.

use std::rc::Rc;

use num_traits::{One, Zero};

use crate::bigint::{self, UInt};
use crate::caching::CachingFuncSequence;
use crate::digits;
use crate::env::Env;
use crate::error::Result;

use super::Node;

pub struct Repetition {
    content: Rc<Node>,
    content_length: UInt,
    offsets: CachingFuncSequence<(UInt, u32)>,
    offset_break: UInt,
    index_of_offset: usize,
    length: UInt,
}

/// Materialise small, heavily repeated content into a plain `Vec` rather
/// than re-walking the tree per digit. Matches the original's tradeoff:
/// once materialised, indexing no longer threads the capture environment
/// (every position behaves as if read with no bindings in scope), so this
/// only kicks in when `content` has no observable captures worth preserving
/// in practice — large repeat counts over small alphabets.
const MATERIALIZE_COUNT_THRESHOLD: u32 = 100;
const MATERIALIZE_LENGTH_THRESHOLD: u32 = 1000;

impl Repetition {
    pub fn new(content: Rc<Node>, lo: u32, hi: u32) -> Result<Self> {
        let content_length = content.len();
        let length = bigint::powersum(&content_length, lo, hi);
        let table_len = (hi - lo + 1) as usize;

        let cl_arbitrary = content_length.clone();
        let cl_inc = content_length.clone();
        let offsets = CachingFuncSequence::with_incremental(
            table_len,
            move |i| arbitrary_entry(&cl_arbitrary, lo, i),
            move |_i, prev: &(UInt, u32)| entry_from_prev(&cl_inc, prev),
        );

        let threshold = UInt::from(u64::MAX);
        let last = offsets.get_usize(table_len - 1)?;
        let (index_of_offset, offset_break) = if last.0 <= threshold {
            (table_len, last.0 + UInt::one())
        } else {
            let mut found = None;
            for idx in 0..table_len - 1 {
                let next = offsets.get_usize(idx + 1)?;
                if next.0 > threshold {
                    let at = offsets.get_usize(idx)?;
                    found = Some((idx, at.0));
                    break;
                }
            }
            found.expect("last offset exceeds threshold, so some prefix boundary exists")
        };

        Ok(Self {
            content,
            content_length,
            offsets,
            offset_break,
            index_of_offset,
            length,
        })
    }

    pub fn len(&self) -> UInt {
        self.length.clone()
    }

    pub fn has_groupref(&self) -> bool {
        self.content.has_groupref()
    }

    fn find_bucket(&self, i: &UInt) -> Result<usize> {
        let table_len = self.offsets.len();
        let (mut lo, mut hi) = if i < &self.offset_break {
            (0, self.index_of_offset)
        } else {
            (self.index_of_offset, table_len)
        };
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (off, _) = self.offsets.get_usize(mid)?;
            if &off < i {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo == table_len {
            Ok(lo - 1)
        } else {
            let (off, _) = self.offsets.get_usize(lo)?;
            if &off > i {
                Ok(lo - 1)
            } else {
                Ok(lo)
            }
        }
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        let bucket = self.find_bucket(i)?;
        let (base_offset, count) = self.offsets.get_usize(bucket)?;
        let num = i - &base_offset;

        if count == 0 {
            return Ok(String::new());
        }

        let materialize = count > MATERIALIZE_COUNT_THRESHOLD
            && self.content_length < UInt::from(MATERIALIZE_LENGTH_THRESHOLD);
        let materialized: Option<Vec<String>> = if materialize {
            let n = bigint::to_usize(&self.content_length)
                .expect("checked below MATERIALIZE_LENGTH_THRESHOLD above");
            let mut v = Vec::with_capacity(n);
            for k in 0..n {
                v.push(self.content.item(&UInt::from(k), &mut None)?);
            }
            Some(v)
        } else {
            None
        };

        let mut least_significant_first = Vec::new();
        for d in digits::digits(num, self.content_length.clone(), None)? {
            let s = match &materialized {
                Some(v) => v[bigint::to_usize(&d).expect("digit < content_length")].clone(),
                None => self.content.item(&d, env)?,
            };
            least_significant_first.push(s);
        }

        let produced = least_significant_first.len() as u32;
        let leftover = count - produced;
        if leftover > 0 {
            let pad = match &materialized {
                Some(v) => v[0].clone(),
                None => self.content.item(&UInt::zero(), &mut None)?,
            };
            for _ in 0..leftover {
                least_significant_first.push(pad.clone());
            }
        }

        least_significant_first.reverse();
        Ok(least_significant_first.concat())
    }
}

fn arbitrary_entry(content_length: &UInt, lo: u32, i: usize) -> (UInt, u32) {
    let count = i as u32 + lo;
    let offset = if i == 0 {
        UInt::zero()
    } else {
        bigint::powersum(content_length, lo, lo + i as u32 - 1)
    };
    (offset, count)
}

fn entry_from_prev(content_length: &UInt, prev: &(UInt, u32)) -> (UInt, u32) {
    let (prev_offset, prev_count) = prev;
    (prev_offset + bigint::pow(content_length, *prev_count), prev_count + 1)
}
