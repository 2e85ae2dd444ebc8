//! The sequence tree: a closed set of node kinds, each exposing the same
//! `len`/`item` contract.
//!
//! A tagged-variant enum is used instead of a trait object because the set
//! of node kinds is fixed and small. Every constructor takes `Rc<Node>`
//! children so slicing, alternation, and repetition can all share subtrees
//! cheaply (nodes are immutable once built; the only mutable state in the
//! whole tree is the lazily-filled cache inside a `Repetition`'s offset
//! table).
//!
//! `item`'s contract: for any node `N` and any `i` in `[0, N.len())`,
//! `N.item(i, env)` terminates and returns the `i`-th string in `N`'s
//! ordering. Callers are responsible for normalizing user-facing (possibly
//! negative, possibly out-of-range) indices before reaching here — see
//! `bigint::normalize_index`, used once at the top of `pattern::RegexSequence`.

pub mod capture;
pub mod combinatorics;
pub mod concat;
pub mod leaf;
pub mod repetition;
pub mod slice;

use crate::bigint::UInt;
use crate::env::Env;
use crate::error::Result;

pub enum Node {
    Leaf(leaf::Leaf),
    Concat(concat::Concat),
    Combinatorics(combinatorics::Combinatorics),
    Repetition(repetition::Repetition),
    Slice(slice::Slice),
    Save(capture::Save),
    Read(capture::Read),
}

impl Node {
    pub fn len(&self) -> UInt {
        match self {
            Node::Leaf(n) => n.len(),
            Node::Concat(n) => n.len(),
            Node::Combinatorics(n) => n.len(),
            Node::Repetition(n) => n.len(),
            Node::Slice(n) => n.len(),
            Node::Save(n) => n.len(),
            Node::Read(n) => n.len(),
        }
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        match self {
            Node::Leaf(n) => n.item(i, env),
            Node::Concat(n) => n.item(i, env),
            Node::Combinatorics(n) => n.item(i, env),
            Node::Repetition(n) => n.item(i, env),
            Node::Slice(n) => n.item(i, env),
            Node::Save(n) => n.item(i, env),
            Node::Read(n) => n.item(i, env),
        }
    }

    /// Membership test independent of any compiled matcher. `Concat`
    /// short-circuits across its children; every other kind falls back to
    /// a linear scan, the same default a base "wrapped sequence" would
    /// use. Not part of the crate's public membership operator —
    /// `pattern::RegexSequence::contains` always defers to the compiled
    /// regex instead.
    pub fn contains(&self, s: &str) -> bool {
        match self {
            Node::Leaf(n) => n.contains(s),
            Node::Concat(n) => n.contains(s),
            _ => self.linear_contains(s),
        }
    }

    /// Whether this subtree contains a `Read` (backreference) node
    /// anywhere. Always `false` for trees built by `adapter::adapt` (see
    /// its module doc comment); real for trees assembled by hand, e.g. in
    /// tests of `seq::capture`.
    pub fn has_groupref(&self) -> bool {
        match self {
            Node::Leaf(n) => n.has_groupref(),
            Node::Concat(n) => n.has_groupref(),
            Node::Combinatorics(n) => n.has_groupref(),
            Node::Repetition(n) => n.has_groupref(),
            Node::Slice(n) => n.has_groupref(),
            Node::Save(n) => n.has_groupref(),
            Node::Read(n) => n.has_groupref(),
        }
    }

    fn linear_contains(&self, s: &str) -> bool {
        let len = self.len();
        let mut i = UInt::from(0u32);
        while i < len {
            match self.item(&i, &mut None) {
                Ok(v) if v == s => return true,
                _ => {}
            }
            i += 1u32;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    fn leaf(chars: &str) -> Rc<Node> {
        Rc::new(Node::Leaf(leaf::Leaf::new(chars.chars().collect())))
    }

    #[test]
    fn combinatorics_orders_first_child_as_least_significant() {
        let node = Node::Combinatorics(combinatorics::Combinatorics::new(vec![
            leaf("ab"),
            leaf("xy"),
        ]));
        let mut env = None;
        let all: Vec<String> = (0..4)
            .map(|i| node.item(&UInt::from(i as u32), &mut env).unwrap())
            .collect();
        assert_eq!(all, vec!["ax", "bx", "ay", "by"]);
    }

    #[test]
    fn concat_is_disjoint_union_in_order() {
        let node = Node::Concat(concat::Concat::new(vec![leaf("ab"), leaf("xyz")]));
        assert_eq!(node.len(), UInt::from(5u32));
        let mut env = None;
        let all: Vec<String> = (0..5)
            .map(|i| node.item(&UInt::from(i as u32), &mut env).unwrap())
            .collect();
        assert_eq!(all, vec!["a", "b", "x", "y", "z"]);
    }

    #[test]
    fn concat_contains_short_circuits_across_children() {
        let node = Node::Concat(concat::Concat::new(vec![leaf("ab"), leaf("xyz")]));
        assert!(node.contains("b"));
        assert!(node.contains("y"));
        assert!(!node.contains("q"));
    }
}
