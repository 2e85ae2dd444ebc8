//! Converts a parsed `regex_syntax::hir::Hir` into a `seq::Node` tree,
//! tracking the anchor state machine along the way.
//!
//! `regex_syntax` has already resolved named/numbered captures and charset
//! negation by the time we see a `Hir`, so this dispatch table only needs
//! to cover `Literal`/`Class`/`Alternation`/`Repetition`/`Capture`/`Concat`
//! — there is no `groupref(n)` case: `regex_syntax` (and, by extension,
//! `regex::Regex`, which `pattern::RegexSequence` uses for membership) has
//! no concept of a backreference at all; `\1` fails to parse before this
//! module ever runs. `seq::capture::Read` exists for the engine's own sake
//! and is exercised directly against the `seq` tree in tests, not
//! reachable from here.

use std::rc::Rc;

use log::trace;
use regex_syntax::hir::{Hir, HirKind, Look};

use crate::error::{Error, Result};
use crate::seq::capture::Save;
use crate::seq::combinatorics::Combinatorics;
use crate::seq::concat::Concat;
use crate::seq::leaf::Leaf;
use crate::seq::Node;

/// Which ASCII-range charset `Class`/`.` resolve against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// The full byte range, 0x00..=0xFF.
    Ascii,
    /// Printable ASCII only, 0x20..=0x7E (no control characters, so no
    /// separate `\n` exclusion is needed for `.`).
    Printable,
}

impl Charset {
    pub fn chars(self, dotall_for_any: bool) -> Vec<char> {
        let range: Vec<char> = match self {
            Charset::Ascii => (0x00u32..=0xFFu32).filter_map(char::from_u32).collect(),
            Charset::Printable => (0x20u32..=0x7E).filter_map(char::from_u32).collect(),
        };
        if self == Charset::Ascii && !dotall_for_any {
            range.into_iter().filter(|&c| c != '\n').collect()
        } else {
            range
        }
    }
}

pub struct AdapterConfig {
    pub charset: Charset,
    pub dotall: bool,
    /// Demotes lookaround errors to empty productions. `regex_syntax` never
    /// produces a lookaround `Hir` node (it rejects the syntax at parse
    /// time), so this flag currently has nothing to act on.
    pub relaxed: bool,
    pub max_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnchorState {
    Start,
    Middle,
    End,
}

enum LookKind {
    Begin,
    End,
    Boundary,
    NonBoundary,
}

fn classify_look(look: Look) -> LookKind {
    use Look::*;
    match look {
        Start | StartLF | StartCRLF => LookKind::Begin,
        End | EndLF | EndCRLF => LookKind::End,
        WordAsciiNegate | WordUnicodeNegate => LookKind::NonBoundary,
        // Directional half/start/end boundaries have no non-boundary
        // counterpart; treated as plain boundary assertions.
        _ => LookKind::Boundary,
    }
}

struct Ctx {
    charset: Vec<char>,
    max_count: u32,
    anchor_state: AnchorState,
}

impl Ctx {
    fn apply_non_anchor(&mut self) -> Result<()> {
        match self.anchor_state {
            AnchorState::Start => {
                self.anchor_state = AnchorState::Middle;
                Ok(())
            }
            AnchorState::Middle => Ok(()),
            AnchorState::End => Err(Error::Parse(
                "pattern continues after an end anchor".to_string(),
            )),
        }
    }

    fn apply_look(&mut self, kind: LookKind) -> Result<()> {
        let next = match (self.anchor_state, &kind) {
            (AnchorState::Start, LookKind::Begin) => AnchorState::Start,
            (AnchorState::Start, LookKind::Boundary) => AnchorState::Start,
            (AnchorState::Start, LookKind::End) => AnchorState::End,
            (AnchorState::Start, LookKind::NonBoundary) => {
                return Err(Error::Parse(
                    "\\B (non-boundary) is not allowed at the start of a pattern".to_string(),
                ))
            }
            (AnchorState::Middle, LookKind::End) | (AnchorState::Middle, LookKind::Boundary) => {
                AnchorState::End
            }
            (AnchorState::Middle, _) => {
                return Err(Error::Parse(
                    "misplaced anchor in the middle of a pattern".to_string(),
                ))
            }
            (AnchorState::End, LookKind::End) | (AnchorState::End, LookKind::Boundary) => {
                AnchorState::End
            }
            (AnchorState::End, _) => {
                return Err(Error::Parse(
                    "misplaced anchor after an end anchor".to_string(),
                ))
            }
        };
        if next != self.anchor_state {
            trace!("anchor state {:?} -> {:?}", self.anchor_state, next);
        }
        self.anchor_state = next;
        Ok(())
    }
}

/// An "empty-producing list `[\"\"]`": cardinality 1, sole item the empty
/// string. Reuses `Combinatorics` over
/// zero children rather than inventing a dedicated node kind — the empty
/// product is exactly this by definition.
fn empty_node() -> Rc<Node> {
    Rc::new(Node::Combinatorics(Combinatorics::new(vec![])))
}

fn literal_node(bytes: &[u8]) -> Result<Rc<Node>> {
    let s = std::str::from_utf8(bytes)
        .map_err(|e| Error::Parse(format!("literal is not valid UTF-8: {e}")))?;
    let mut chars: Vec<Rc<Node>> = s
        .chars()
        .map(|c| Rc::new(Node::Leaf(Leaf::single(c))))
        .collect();
    match chars.len() {
        0 => Ok(empty_node()),
        1 => Ok(chars.pop().unwrap()),
        _ => Ok(Rc::new(Node::Combinatorics(Combinatorics::new(chars)))),
    }
}

fn class_node(class: &regex_syntax::hir::Class, charset: &[char]) -> Result<Rc<Node>> {
    let chars: Vec<char> = match class {
        regex_syntax::hir::Class::Unicode(u) => charset
            .iter()
            .copied()
            .filter(|&c| u.ranges().iter().any(|r| r.start() <= c && c <= r.end()))
            .collect(),
        // The parser runs with `unicode(false)`, so every class (`[abc]`,
        // `.`, negated classes) arrives as byte ranges rather than
        // codepoint ranges. The configured charset is itself byte-valued
        // (0..=255), so each range's endpoints compare directly against it.
        regex_syntax::hir::Class::Bytes(b) => charset
            .iter()
            .copied()
            .filter(|&c| {
                b.ranges()
                    .iter()
                    .any(|r| r.start() as u32 <= c as u32 && c as u32 <= r.end() as u32)
            })
            .collect(),
    };
    Ok(Rc::new(Node::Leaf(Leaf::new(chars))))
}

fn build(hir: &Hir, ctx: &mut Ctx) -> Result<Rc<Node>> {
    match hir.kind() {
        HirKind::Empty => {
            ctx.apply_non_anchor()?;
            Ok(empty_node())
        }
        HirKind::Literal(lit) => {
            ctx.apply_non_anchor()?;
            literal_node(&lit.0)
        }
        HirKind::Class(class) => {
            ctx.apply_non_anchor()?;
            class_node(class, &ctx.charset)
        }
        HirKind::Look(look) => {
            ctx.apply_look(classify_look(*look))?;
            Ok(empty_node())
        }
        HirKind::Repetition(rep) => {
            let body = build(&rep.sub, ctx)?;
            let count_clamped = rep.max.unwrap_or(ctx.max_count).min(ctx.max_count);
            if rep.max.is_none_or(|m| m > ctx.max_count) {
                trace!("clamping repetition to max_count {}", ctx.max_count);
            }
            let hi = count_clamped.max(rep.min);
            if hi > count_clamped {
                trace!("raising repetition upper bound up to its lower bound {}", rep.min);
            }
            Ok(Rc::new(Node::Repetition(crate::seq::repetition::Repetition::new(
                body, rep.min, hi,
            )?)))
        }
        HirKind::Capture(cap) => {
            let body = build(&cap.sub, ctx)?;
            Ok(Rc::new(Node::Save(Save::new(body, cap.index))))
        }
        HirKind::Concat(children) => {
            let mut built = Vec::with_capacity(children.len());
            for child in children {
                built.push(build(child, ctx)?);
            }
            Ok(Rc::new(Node::Combinatorics(Combinatorics::new(built))))
        }
        HirKind::Alternation(branches) => {
            let entry_state = ctx.anchor_state;
            let mut built = Vec::with_capacity(branches.len());
            let mut exit_states = Vec::with_capacity(branches.len());
            for branch in branches {
                ctx.anchor_state = entry_state;
                built.push(build(branch, ctx)?);
                exit_states.push(ctx.anchor_state);
            }
            // If every branch agrees on its resulting state, carry that
            // forward; otherwise assume the conservative "something may
            // have been consumed" state.
            ctx.anchor_state = if exit_states.iter().all(|s| *s == exit_states[0]) {
                exit_states[0]
            } else {
                AnchorState::Middle
            };
            Ok(Rc::new(Node::Concat(Concat::new(built))))
        }
    }
}

/// Builds a sequence tree from a parsed pattern. `has_groupref` is always
/// `false` for trees built here (see the module doc comment); callers
/// still check `pattern::contains_groupref` on the resulting tree, since a
/// tree could in principle be assembled some other way.
pub fn adapt(hir: &Hir, config: &AdapterConfig) -> Result<Rc<Node>> {
    let mut ctx = Ctx {
        charset: config.charset.chars(config.dotall),
        max_count: config.max_count,
        anchor_state: AnchorState::Start,
    };
    build(hir, &mut ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::UInt;

    fn adapt_pattern(pattern: &str, cfg: AdapterConfig) -> Result<Rc<Node>> {
        let hir = regex_syntax::ParserBuilder::new()
            .unicode(false)
            .build()
            .parse(pattern)?;
        adapt(&hir, &cfg)
    }

    fn default_cfg() -> AdapterConfig {
        AdapterConfig {
            charset: Charset::Ascii,
            dotall: false,
            relaxed: false,
            max_count: 65535,
        }
    }

    fn all_strings(node: &Rc<Node>) -> Vec<String> {
        let len = crate::bigint::to_usize(&node.len()).unwrap();
        (0..len)
            .map(|i| node.item(&UInt::from(i), &mut None).unwrap())
            .collect()
    }

    #[test]
    fn alternation_and_repetition_order() {
        let node = adapt_pattern("1(234?|49?)", default_cfg()).unwrap();
        assert_eq!(all_strings(&node), vec!["123", "1234", "14", "149"]);
    }

    #[test]
    fn valid_anchor_positions_parse() {
        for p in ["^a", "a$", "^a$", "\\ba\\b", "^^^a$$$", "^\\b^[ab]"] {
            assert!(adapt_pattern(p, default_cfg()).is_ok(), "expected {p} to parse");
        }
    }

    #[test]
    fn misplaced_anchors_are_parse_errors() {
        for p in ["a^b", "a$b", "a\\bb", "\\Ba", "a\\B"] {
            assert!(adapt_pattern(p, default_cfg()).is_err(), "expected {p} to fail");
        }
    }

    #[test]
    fn mixed_alternation_and_repetition() {
        let node = adapt_pattern("x|[a-z]{1,5}", default_cfg()).unwrap();
        let len = crate::bigint::to_usize(&node.len()).unwrap();
        assert_eq!(node.item(&UInt::from(0u32), &mut None).unwrap(), "x");
        assert_eq!(node.item(&UInt::from(1u32), &mut None).unwrap(), "a");
        assert_eq!(node.item(&UInt::from(26u32), &mut None).unwrap(), "z");
        assert_eq!(node.item(&UInt::from(27u32), &mut None).unwrap(), "aa");
        assert_eq!(
            node.item(&UInt::from((len - 1) as u32), &mut None).unwrap(),
            "zzzzz"
        );
    }
}
