//! Combinatorics — Cartesian-product concatenation.
//!
//! `ab`, `a[xyz]c`: every child contributes independently, so the index
//! space is the mixed-radix product of the children's lengths. The first
//! child is the least-significant digit. A single child is a plain
//! pass-through (no join overhead).

use std::rc::Rc;

use crate::bigint::{self, UInt};
use crate::env::Env;
use crate::error::Result;

use super::Node;

pub struct Combinatorics {
    children: Vec<(Rc<Node>, UInt)>,
    length: UInt,
}

impl Combinatorics {
    pub fn new(children: Vec<Rc<Node>>) -> Self {
        let mut length = UInt::from(1u32);
        let children = children
            .into_iter()
            .map(|c| {
                let len = c.len();
                length *= &len;
                (c, len)
            })
            .collect();
        Self { children, length }
    }

    pub fn len(&self) -> UInt {
        self.length.clone()
    }

    pub fn item(&self, i: &UInt, env: &mut Option<&mut Env>) -> Result<String> {
        if let [(only, _)] = self.children.as_slice() {
            return only.item(i, env);
        }
        let mut remaining = i.clone();
        let mut parts = Vec::with_capacity(self.children.len());
        for (child, len) in &self.children {
            let (q, r) = bigint::divmod(&remaining, len);
            remaining = q;
            parts.push(child.item(&r, env)?);
        }
        Ok(parts.concat())
    }

    pub fn has_groupref(&self) -> bool {
        self.children.iter().any(|(c, _)| c.has_groupref())
    }
}
