//! The per-lookup capture-group binding environment.
//!
//! A `Save` node writes into it after evaluating its child; a `Read` node
//! (backreference) reads from it, defaulting to the literal string
//! `"fail"` when the group hasn't bound a value yet for this lookup —
//! preserved verbatim even for alternation branches that weren't taken.
//!
//! The environment is a plain parameter threaded through `Node::item`
//! calls, not state stored on nodes: omit it entirely (`None`) when the
//! tree has no `Read` node, which is the common case and observably
//! faster.

use std::collections::HashMap;

/// Sentinel returned by `Env::get` for a group that hasn't bound a value
/// yet in the current lookup.
pub const UNBOUND: &str = "fail";

#[derive(Debug, Default)]
pub struct Env {
    bindings: HashMap<u32, String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, group: u32, value: String) {
        self.bindings.insert(group, value);
    }

    pub fn get(&self, group: u32) -> &str {
        self.bindings.get(&group).map(String::as_str).unwrap_or(UNBOUND)
    }
}
