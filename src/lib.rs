//! `rexseq` — the language of a regular expression as an indexable,
//! lazily-evaluated, arbitrary-precision-indexed sequence of strings.
//!
//! `pattern::RegexSequence` is the main entry point.

pub mod adapter;
pub mod bigint;
pub mod caching;
pub mod cli;
pub mod digits;
pub mod env;
pub mod error;
pub mod pattern;
pub mod seq;

pub use error::{Error, Result};
pub use pattern::{Match, MatchSequence, Options, RegexSequence};
