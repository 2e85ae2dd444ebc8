//! Error kinds for the sequence engine.
//!
//! One variant per error kind a caller needs to distinguish: `ParseError`,
//! `IndexError`, `TypeError`, `ValueError`, `NotImplementedError`. Errors
//! originate in the deepest responsible node and propagate unmodified;
//! nothing here wraps or swallows an upstream `regex`/`regex-syntax` error.

use num_bigint::BigInt;
use thiserror::Error;

/// The crate's single error type. Every fallible operation in `rexseq`
/// returns `Result<T, Error>`.
#[derive(Debug, Error)]
pub enum Error {
    /// Pattern could not be turned into a sequence: unsupported flag,
    /// misplaced anchor, unsupported construct, or the pattern does not
    /// compile under `regex`/`regex-syntax` at all.
    #[error("parse error: {0}")]
    Parse(String),

    /// `regex-syntax` rejected the pattern outright.
    #[error("parse error: {0}")]
    Syntax(#[from] regex_syntax::Error),

    /// The compiled matcher (`regex`) rejected the pattern.
    #[error("parse error: {0}")]
    Regex(#[from] regex::Error),

    /// An integer index fell outside `[-len(S), len(S))`, or a slice step
    /// was zero.
    #[error("index out of range: {0}")]
    Index(BigInt),

    /// A slice step of zero was supplied.
    #[error("slice step cannot be zero")]
    ZeroStep,

    /// A digit-stream argument was not an integer. In Rust this is mostly
    /// caught at compile time, so this variant is reserved for malformed
    /// `chunk` bases supplied at runtime as the wrong representation.
    #[error("type error: {0}")]
    Type(String),

    /// Invalid chunk (not an exact power of base), or `b = 1` with a
    /// non-zero value.
    #[error("value error: {0}")]
    Value(String),

    /// `Match::span()` was invoked; unsupported by design.
    #[error("not implemented: Match::span()")]
    NotImplemented,
}

pub type Result<T> = std::result::Result<T, Error>;
