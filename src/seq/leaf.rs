//! Leaf — literal character set.
//!
//! A finite, ordered list of single characters, resolved from a literal,
//! range, or negated class against the configured charset. Cardinality is
//! the list length; every other node kind eventually bottoms out here.

use crate::bigint::{self, UInt};
use crate::env::Env;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Leaf {
    chars: Vec<char>,
}

impl Leaf {
    pub fn new(chars: Vec<char>) -> Self {
        Self { chars }
    }

    pub fn single(c: char) -> Self {
        Self { chars: vec![c] }
    }

    pub fn len(&self) -> UInt {
        UInt::from(self.chars.len())
    }

    pub fn item(&self, i: &UInt, _env: &mut Option<&mut Env>) -> Result<String> {
        let idx = bigint::to_usize(i).expect("leaf index fits usize: charsets are small");
        Ok(self.chars[idx].to_string())
    }

    pub fn has_groupref(&self) -> bool {
        false
    }

    /// Mirrors `ConcatenatedSequence`'s membership short-circuit, which only
    /// ever needs to test single characters against a leaf. Not part of the
    /// public `in` operator (that defers to the compiled matcher); kept for
    /// the internal recursive case.
    pub fn contains(&self, s: &str) -> bool {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.chars.contains(&c),
            _ => false,
        }
    }
}
