//! Top-level sequence and Match wrapper.
//!
//! `RegexSequence` parses a pattern into a `Hir` (via `regex_syntax`),
//! adapts it into a `seq::Node` tree, and compiles the same pattern with
//! `regex::Regex` for membership tests and capture-name resolution.
//! `MatchSequence` (built from `as_matches`) shares that tree rather than
//! rebuilding it: it only changes how an index is turned into a result,
//! always threading a fresh `Env` and wrapping the produced string plus
//! captures in a `Match`.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::adapter::{self, AdapterConfig, Charset};
use crate::bigint::{self, SInt, UInt};
use crate::env::Env;
use crate::error::{Error, Result};
use crate::seq::slice::Slice;
use crate::seq::Node;

#[derive(Debug, Clone)]
pub struct Options {
    pub charset: Charset,
    pub dotall: bool,
    pub relaxed: bool,
    pub max_count: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            charset: Charset::Ascii,
            dotall: false,
            relaxed: false,
            max_count: 65_535,
        }
    }
}

pub struct RegexSequence {
    root: Rc<Node>,
    matcher: regex::Regex,
    name_map: HashMap<String, u32>,
    has_groupref: bool,
}

impl RegexSequence {
    pub fn new(pattern: &str, options: &Options) -> Result<Self> {
        debug!(
            "building sequence for {pattern:?} (charset={:?}, dotall={}, relaxed={}, max_count={})",
            options.charset, options.dotall, options.relaxed, options.max_count
        );
        let hir = regex_syntax::ParserBuilder::new()
            .unicode(false)
            .dot_matches_new_line(options.dotall)
            .build()
            .parse(pattern)?;
        let config = AdapterConfig {
            charset: options.charset,
            dotall: options.dotall,
            relaxed: options.relaxed,
            max_count: options.max_count,
        };
        let root = adapter::adapt(&hir, &config)?;
        let matcher = regex::RegexBuilder::new(pattern)
            .dot_matches_new_line(options.dotall)
            .build()?;
        let name_map = matcher
            .capture_names()
            .enumerate()
            .filter_map(|(i, name)| name.map(|n| (n.to_string(), i as u32)))
            .collect();
        let has_groupref = root.has_groupref();
        Ok(Self {
            root,
            matcher,
            name_map,
            has_groupref,
        })
    }

    pub fn len(&self) -> UInt {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.len().eq(&UInt::from(0u32))
    }

    /// `S[i]`: negative `i` counts from the end.
    pub fn get(&self, i: &SInt) -> Result<String> {
        let idx = bigint::normalize_index(i, &self.root.len())?;
        let mut env = if self.has_groupref {
            Some(Env::new())
        } else {
            None
        };
        let mut env_ref = env.as_mut();
        self.root.item(&idx, &mut env_ref)
    }

    /// `S[start:stop:step]`. Composition with an already-sliced sequence
    /// falls out of `Slice::item` recursing into its own `raw`, so slicing
    /// a `RegexSequence` built from a slice just wraps the existing
    /// `Node::Slice` again.
    pub fn slice(&self, start: Option<SInt>, stop: Option<SInt>, step: Option<SInt>) -> Result<Self> {
        let sliced = Slice::new(self.root.clone(), start, stop, step)?;
        Ok(Self {
            root: Rc::new(Node::Slice(sliced)),
            matcher: self.matcher.clone(),
            name_map: self.name_map.clone(),
            has_groupref: self.has_groupref,
        })
    }

    /// `item in S`: always the compiled matcher's
    /// full-match operation, never the tree's own internal (and, outside
    /// `Concat`, only approximately meaningful) `contains`.
    pub fn contains(&self, s: &str) -> bool {
        self.matcher
            .find(s)
            .is_some_and(|m| m.start() == 0 && m.end() == s.len())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            seq: self,
            next: UInt::from(0u32),
        }
    }

    /// Adapts this sequence into match mode: shares the same tree, changes
    /// only how an index becomes a result.
    pub fn as_matches(&self) -> MatchSequence<'_> {
        MatchSequence { seq: self }
    }
}

pub struct Iter<'a> {
    seq: &'a RegexSequence,
    next: UInt,
}

impl<'a> Iterator for Iter<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.next >= self.seq.root.len() {
            return None;
        }
        let mut env = None;
        let s = self
            .seq
            .root
            .item(&self.next, &mut env)
            .expect("in range by loop condition");
        self.next += 1u32;
        Some(s)
    }
}

pub struct MatchSequence<'a> {
    seq: &'a RegexSequence,
}

impl<'a> MatchSequence<'a> {
    pub fn get(&self, i: &SInt) -> Result<Match> {
        let idx = bigint::normalize_index(i, &self.seq.root.len())?;
        let mut env = Env::new();
        let full = self.seq.root.item(&idx, &mut Some(&mut env))?;
        Ok(Match {
            full,
            env,
            name_map: self.seq.name_map.clone(),
            group_count: self.seq.matcher.captures_len() as u32,
        })
    }
}

/// A post-hoc capture-group view over one produced string.
pub struct Match {
    full: String,
    env: Env,
    name_map: HashMap<String, u32>,
    group_count: u32,
}

impl Match {
    pub fn group(&self, n: u32) -> String {
        if n == 0 {
            self.full.clone()
        } else {
            self.env.get(n).to_string()
        }
    }

    pub fn group_by_name(&self, name: &str) -> Option<String> {
        self.name_map.get(name).map(|&n| self.group(n))
    }

    pub fn groups(&self) -> Vec<String> {
        (1..self.group_count).map(|n| self.group(n)).collect()
    }

    pub fn groupdict(&self) -> HashMap<String, String> {
        self.name_map
            .iter()
            .map(|(name, &n)| (name.clone(), self.group(n)))
            .collect()
    }

    /// Always `Error::NotImplemented`: span reporting isn't supported.
    pub fn span(&self) -> Result<(usize, usize)> {
        Err(Error::NotImplemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Charset;

    #[test]
    fn even_and_reverse_slices() {
        let seq = RegexSequence::new("[abcdef]", &Options::default()).unwrap();
        let evens = seq.slice(None, None, Some(SInt::from(2))).unwrap();
        assert_eq!(evens.iter().collect::<Vec<_>>(), vec!["a", "c", "e"]);

        let reversed = seq.slice(None, None, Some(SInt::from(-1))).unwrap();
        assert_eq!(
            reversed.iter().collect::<Vec<_>>(),
            vec!["f", "e", "d", "c", "b", "a"]
        );
    }

    #[test]
    fn star_repetition_cardinality_and_prefix() {
        let seq = RegexSequence::new("[01]*", &Options::default()).unwrap();
        let expected_len = num_bigint::BigUint::from(2u32).pow(65536) - num_bigint::BigUint::from(1u32);
        assert_eq!(seq.len(), expected_len);
        assert_eq!(seq.get(&SInt::from(0)).unwrap(), "");
        assert_eq!(seq.get(&SInt::from(1)).unwrap(), "0");
        assert_eq!(seq.get(&SInt::from(2)).unwrap(), "1");
        assert_eq!(seq.get(&SInt::from(3)).unwrap(), "00");
    }

    #[test]
    fn alternation_and_repetition_boundaries() {
        let seq = RegexSequence::new("x|[a-z]{1,5}", &Options::default()).unwrap();
        assert_eq!(seq.get(&SInt::from(0)).unwrap(), "x");
        assert_eq!(seq.get(&SInt::from(1)).unwrap(), "a");
        assert_eq!(seq.get(&SInt::from(26)).unwrap(), "z");
        assert_eq!(seq.get(&SInt::from(27)).unwrap(), "aa");
        assert_eq!(seq.get(&SInt::from(-1)).unwrap(), "zzzzz");
    }

    #[test]
    fn offset_break_boundary() {
        let opts = Options {
            charset: Charset::Ascii,
            dotall: true,
            relaxed: false,
            max_count: 65_535,
        };
        let seq = RegexSequence::new(".*", &opts).unwrap();

        let i: SInt = "70386233652806655".parse().unwrap();
        let s = seq.get(&i).unwrap();
        let prefix: String = s.chars().take(7).collect();
        assert_eq!(prefix, "\u{FF}".repeat(7));

        let next = &i + SInt::from(1);
        let s2 = seq.get(&next).unwrap();
        let prefix2: String = s2.chars().take(8).collect();
        assert_eq!(prefix2, "\u{0}".repeat(8));
    }

    #[test]
    fn boundaries_index_and_negative_index() {
        let seq = RegexSequence::new("[ab]", &Options::default()).unwrap();
        let last = SInt::from(seq.len().clone()) - SInt::from(1);
        assert!(seq.get(&last).is_ok());
        assert!(seq.get(&(last + SInt::from(1))).is_err());

        let neg_last = -SInt::from(seq.len().clone());
        assert!(seq.get(&neg_last).is_ok());
        assert!(seq.get(&(neg_last - SInt::from(1))).is_err());
    }
}

