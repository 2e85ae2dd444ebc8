//! Save / Read — capture-group plumbing.
//!
//! `Save` wraps a subtree and, after producing its string, records it under
//! a group number in the caller's environment. `Read` is a backreference:
//! it has exactly one item (the empty index), and returns whatever the
//! environment currently holds for its group — `"fail"` if that group
//! hasn't bound anything yet for this lookup, matching the original's
//! handling of alternation branches that were never taken.

use std::rc::Rc;

use num_traits::{One, Zero};

use crate::bigint::UInt;
use crate::env::Env;
use crate::error::{Error, Result};

use super::Node;

pub struct Save {
    child: Rc<Node>,
    group: u32,
}

impl Save {
    pub fn new(child: Rc<Node>, group: u32) -> Self {
        Self { child, group }
    }

    pub fn len(&self) -> UInt {
        self.child.len()
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        let value = self.child.item(i, env)?;
        if let Some(e) = env.as_mut() {
            e.set(self.group, value.clone());
        }
        Ok(value)
    }

    pub fn has_groupref(&self) -> bool {
        self.child.has_groupref()
    }
}

pub struct Read {
    group: u32,
}

impl Read {
    pub fn new(group: u32) -> Self {
        Self { group }
    }

    pub fn len(&self) -> UInt {
        UInt::one()
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        debug_assert!(i.is_zero());
        match env.as_mut() {
            Some(e) => Ok(e.get(self.group).to_string()),
            None => Err(Error::Value(
                "backreference read with no capture environment in scope".to_string(),
            )),
        }
    }

    pub fn has_groupref(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seq::combinatorics::Combinatorics;
    use crate::seq::leaf::Leaf;

    /// `([abc])-\1` assembled by hand: `regex_syntax`/`regex` have no
    /// backreference opcode (see `adapter`'s module doc comment), so this
    /// exercises `Save`/`Read` directly instead of going through `adapt`.
    #[test]
    fn backreference_rereads_the_captured_group() {
        let captured = Rc::new(Node::Save(Save::new(
            Rc::new(Node::Leaf(Leaf::new(vec!['a', 'b', 'c']))),
            1,
        )));
        let dash = Rc::new(Node::Leaf(Leaf::single('-')));
        let reread = Rc::new(Node::Read(Read::new(1)));
        let whole = Node::Combinatorics(Combinatorics::new(vec![captured, dash, reread]));

        assert_eq!(whole.len(), UInt::from(3u32));
        let mut env = Env::new();
        let mut env_ref = Some(&mut env);
        let all: Vec<String> = (0..3u32)
            .map(|i| whole.item(&UInt::from(i), &mut env_ref).unwrap())
            .collect();
        assert_eq!(all, vec!["a-a", "b-b", "c-c"]);
    }
}
