//! Caching function sequence.
//!
//! An indexable sequence of length `L` backed by a function `f(i)`, with an
//! optional incremental builder `g(i, prev)` used whenever the cache already
//! holds `i - 1`. Negative indices wrap modulo `L`; out-of-range indices are
//! an `IndexError`. Every position is computed at most once, even under
//! repeated or out-of-order access.
//!
//! This is the only mutable structure in the crate: its cache only
//! grows, entries are never evicted or overwritten.

use std::cell::RefCell;
use std::collections::HashMap;

use num_bigint::BigInt;

use crate::error::{Error, Result};

type Func<T> = Box<dyn Fn(usize) -> T>;
type IncFunc<T> = Box<dyn Fn(usize, &T) -> T>;

pub struct CachingFuncSequence<T> {
    func: Func<T>,
    inc_func: Option<IncFunc<T>>,
    length: usize,
    cache: RefCell<HashMap<usize, T>>,
}

impl<T: Clone> CachingFuncSequence<T> {
    pub fn new(length: usize, func: impl Fn(usize) -> T + 'static) -> Self {
        Self {
            func: Box::new(func),
            inc_func: None,
            length,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn with_incremental(
        length: usize,
        func: impl Fn(usize) -> T + 'static,
        inc_func: impl Fn(usize, &T) -> T + 'static,
    ) -> Self {
        Self {
            func: Box::new(func),
            inc_func: Some(Box::new(inc_func)),
            length,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Fetches entry `i`, supporting negative offsets modulo `length`.
    pub fn get(&self, i: isize) -> Result<T> {
        let idx = self.normalize(i)?;
        if let Some(v) = self.cache.borrow().get(&idx) {
            return Ok(v.clone());
        }

        let prev = if idx > 0 {
            self.cache.borrow().get(&(idx - 1)).cloned()
        } else {
            None
        };
        let value = match (&self.inc_func, prev) {
            (Some(inc), Some(prev)) => inc(idx, &prev),
            _ => (self.func)(idx),
        };
        self.cache.borrow_mut().insert(idx, value.clone());
        Ok(value)
    }

    /// `get`, but for callers who already hold a non-negative `usize`
    /// (the common case inside `seq::repetition`).
    pub fn get_usize(&self, i: usize) -> Result<T> {
        self.get(i as isize)
    }

    fn normalize(&self, i: isize) -> Result<usize> {
        let len = self.length as isize;
        let adjusted = if i < 0 { i + len } else { i };
        if adjusted < 0 || adjusted >= len {
            return Err(Error::Index(BigInt::from(i)));
        }
        Ok(adjusted as usize)
    }

    /// Iterates every position in order, guaranteeing each is computed at
    /// most once (and letting the incremental builder fire for all of
    /// them).
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.length).map(move |i| self.get_usize(i).expect("in range by construction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_and_incremental_agree() {
        let seq = CachingFuncSequence::with_incremental(
            5,
            |i| i * i,
            |i, _prev| i * i,
        );
        let collected: Vec<usize> = seq.iter().collect();
        assert_eq!(collected, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn negative_index_wraps() {
        let seq = CachingFuncSequence::new(3, |i| i + 10);
        assert_eq!(seq.get(-1).unwrap(), 12);
        assert_eq!(seq.get(-3).unwrap(), 10);
        assert!(seq.get(-4).is_err());
        assert!(seq.get(3).is_err());
    }

    #[test]
    fn each_position_computed_once() {
        use std::cell::Cell;
        let calls = std::rc::Rc::new(Cell::new(0));
        let calls2 = calls.clone();
        let seq = CachingFuncSequence::new(4, move |i| {
            calls2.set(calls2.get() + 1);
            i
        });
        for _ in 0..3 {
            for i in 0..4 {
                seq.get_usize(i).unwrap();
            }
        }
        assert_eq!(calls.get(), 4);
    }
}
