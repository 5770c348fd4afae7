//! Start predicates: skipping ahead to the first potential match

use crate::insn::{AssertKind, Op, Program, StartPredicate};
use crate::pattern::Pattern;

/// Derive a start predicate from a compiled program by peeling its entry
/// instruction. The scan loop uses this to skip start positions that
/// cannot begin a match, instead of attempting every offset.
pub fn predicate_for(program: &Program) -> StartPredicate {
    // Index 0 is the Nil sentinel; execution enters at 1. Every
    // alternation entry is a degenerate Split (alt = 0) that forwards
    // unconditionally, so walk through those to reach the instruction
    // that actually runs first. The walk is bounded for safety; a
    // well-formed program reaches a non-Split long before that.
    let mut ip = 1;
    for _ in 0..program.insns.len() {
        let entry = match program.insns.get(ip) {
            Some(insn) => insn,
            None => return StartPredicate::Arbitrary,
        };
        match entry.op {
            Op::Split if entry.alt == 0 => {
                ip = entry.next as usize;
            }
            Op::Assert(AssertKind::StartLineOrString) => {
                return if program.options.multiline {
                    StartPredicate::LineAnchored
                } else {
                    StartPredicate::StartAnchored
                };
            }
            // A mandatory first Match on a literal byte: every match must
            // start with that byte. A nonzero alt means the instruction
            // is skippable (a quantifier patched it, or it is one class
            // item among several), so it proves nothing.
            Op::Match(pid) if entry.alt == 0 => {
                return match program.patterns[pid as usize] {
                    Pattern::Char(b) => {
                        if program.options.ignore_case && b.is_ascii_alphabetic() {
                            StartPredicate::Byte2([b.to_ascii_lowercase(), b.to_ascii_uppercase()])
                        } else {
                            StartPredicate::Byte(b)
                        }
                    }
                    _ => StartPredicate::Arbitrary,
                };
            }
            _ => return StartPredicate::Arbitrary,
        }
    }
    StartPredicate::Arbitrary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Options;
    use crate::compile::compile;

    fn pred(pattern: &str, options: Options) -> StartPredicate {
        compile(pattern, options).expect("should compile").start_pred
    }

    #[test]
    fn literal_prefix() {
        assert_eq!(pred("cat", Options::default()), StartPredicate::Byte(b'c'));
        // A single-item class pins the first byte just as a literal does.
        assert_eq!(pred("[c]at", Options::default()), StartPredicate::Byte(b'c'));
        // A capture group entry proves nothing about the first byte.
        assert_eq!(pred("(cat)", Options::default()), StartPredicate::Arbitrary);
    }

    #[test]
    fn icase_prefix_pair() {
        let options = Options::from("i");
        assert_eq!(pred("cat", options), StartPredicate::Byte2([b'c', b'C']));
        // Non-alphabetic bytes have no case to fold.
        assert_eq!(pred("9am", options), StartPredicate::Byte(b'9'));
    }

    #[test]
    fn anchored() {
        assert_eq!(pred("^cat", Options::default()), StartPredicate::StartAnchored);
        assert_eq!(pred("^cat", Options::from("m")), StartPredicate::LineAnchored);
    }

    #[test]
    fn skippable_entry_is_arbitrary() {
        assert_eq!(pred("a?bc", Options::default()), StartPredicate::Arbitrary);
        assert_eq!(pred("x|y", Options::default()), StartPredicate::Arbitrary);
        assert_eq!(pred(r"\dab", Options::default()), StartPredicate::Arbitrary);
    }
}
