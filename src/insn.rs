//! Instructions for a compiled regex

use crate::api::Options;
use crate::pattern::Pattern;

/// Instruction indices are u32; index 0 is the Nil sentinel, so 0 doubles
/// as "no successor" in `next`/`alt` fields.
pub type JumpTarget = u32;

/// A group index.
/// GroupID 0 corresponds to the first capture group (`\1` in the source).
pub type GroupID = u32;

/// An index into the Program's pattern table.
pub type PatternID = u32;

/// An instruction pointer.
pub type IP = usize;

/// Zero-width assertions tested against the current position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AssertKind {
    /// Start of input, or (multiline) just after a line feed; emitted by '^'.
    StartLineOrString,

    /// End of input, or (multiline) just before a line feed; emitted by '$'.
    EndLineOrString,

    /// Exactly one neighbor is a word byte; emitted by `\b`.
    WordBoundary,

    /// Negation of WordBoundary; emitted by `\B`.
    NonWordBoundary,
}

/// The opcode of an instruction, with opcode-specific payload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Op {
    /// Always fails; the sentinel at index 0.
    Nil,

    /// The match was successful.
    End,

    /// Nondeterministic branch: try `next`, else try `alt`.
    /// The sole source of nondeterminism in the machine.
    Split,

    /// Consume one byte if the referenced pattern accepts it.
    Match(PatternID),

    /// Zero-width assertion; no byte consumed.
    Assert(AssertKind),

    /// Record the current position as the start of a group.
    GroupStart(GroupID),

    /// Record the current position as the end of a group.
    GroupEnd(GroupID),

    /// Consume exactly the bytes previously captured by a group.
    Backref(GroupID),
}

/// An instruction: an opcode and two successor indices into the
/// instruction array. The graph is embedded in the array so that forward
/// targets can be patched by index after the fact.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Insn {
    pub op: Op,
    pub next: JumpTarget,
    pub alt: JumpTarget,
}

/// The peeled prefix start predicate.
/// This is a fast way of locating the first potential match.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartPredicate {
    /// May match starting anywhere.
    Arbitrary,

    /// Every match starts with this byte.
    Byte(u8),

    /// Every match starts with one of these two bytes
    /// (a case-insensitive letter pair).
    Byte2([u8; 2]),

    /// The regex is anchored to the start of the string.
    /// Only the beginning is tried.
    StartAnchored,

    /// The regex is anchored to line starts (multiline '^').
    LineAnchored,
}

/// The compiled artifact: the instruction list, the pattern table it
/// indexes, the number of capture groups, and the options the regex was
/// compiled with.
#[derive(Debug, Clone)]
pub struct Program {
    /// Sequence of instructions. `insns[0]` is Nil, the last is End.
    pub insns: Vec<Insn>,

    /// Patterns referenced by Match instructions.
    pub patterns: Vec<Pattern>,

    /// Number of capture groups declared in the source.
    pub group_count: GroupID,

    /// Predicate to rapidly find the first potential match.
    pub start_pred: StartPredicate,

    /// Flags controlling matching.
    pub options: Options,
}

impl Program {
    /// Debug-mode structural check, run at the end of every compile.
    /// Violations of these invariants are compiler bugs.
    pub(crate) fn check_invariants(&self) {
        debug_assert!(self.insns.len() >= 2, "Program should have Nil and End");
        debug_assert!(self.insns[0].op == Op::Nil, "Index 0 should be Nil");
        debug_assert!(
            self.insns[self.insns.len() - 1].op == Op::End,
            "Last instruction should be End"
        );
        let len = self.insns.len() as JumpTarget;
        for insn in &self.insns {
            debug_assert!(insn.next < len, "next target out of range");
            debug_assert!(insn.alt < len, "alt target out of range");
            match insn.op {
                Op::Match(p) => {
                    debug_assert!((p as usize) < self.patterns.len(), "pattern out of range")
                }
                Op::GroupStart(g) | Op::GroupEnd(g) | Op::Backref(g) => {
                    debug_assert!(g < self.group_count, "group out of range")
                }
                _ => {}
            }
        }
    }
}
