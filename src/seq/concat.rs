//! Concat — disjoint union over a fixed list of children.
//!
//! Used for alternation (`a|b|c`): each child occupies a contiguous block
//! of indices in declaration order, so `item` is a linear scan subtracting
//! child lengths (children are few in practice — one per alternative).

use std::rc::Rc;

use crate::bigint::UInt;
use crate::env::Env;
use crate::error::Result;

use super::Node;

pub struct Concat {
    children: Vec<(Rc<Node>, UInt)>,
    length: UInt,
}

impl Concat {
    pub fn new(children: Vec<Rc<Node>>) -> Self {
        let mut length = UInt::from(0u32);
        let children = children
            .into_iter()
            .map(|c| {
                let len = c.len();
                length += &len;
                (c, len)
            })
            .collect();
        Self { children, length }
    }

    pub fn len(&self) -> UInt {
        self.length.clone()
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        let mut remaining = i.clone();
        for (child, len) in &self.children {
            if &remaining < len {
                return child.item(&remaining, env);
            }
            remaining -= len;
        }
        unreachable!("index in range by construction")
    }

    /// Short-circuit membership: true if any child contains the item.
    /// Mirrors `ConcatenatedSequence.__contains__`; not wired into the
    /// public `in` operator, which always goes through the compiled
    /// matcher — kept here only so a branch that is itself a `Concat` can
    /// recurse into it.
    pub fn contains(&self, s: &str) -> bool {
        self.children.iter().any(|(c, _)| c.contains(s))
    }

    pub fn has_groupref(&self) -> bool {
        self.children.iter().any(|(c, _)| c.has_groupref())
    }
}
