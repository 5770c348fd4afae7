//! One-pass compiler from pattern text to a Program

use crate::api::Options;
use crate::charclasses;
use crate::insn::{AssertKind, GroupID, Insn, JumpTarget, Op, PatternID, Program, StartPredicate};
use crate::pattern::Pattern;
use crate::startpredicate;
use std::fmt;

/// Represents an error encountered during regex compilation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The pattern ended mid-token: a trailing `\`, or an unknown escape.
    UnexpectedEOF,

    /// `^` somewhere other than the start, `$` somewhere other than the
    /// end, or an empty character class.
    UnsupportedClass,

    /// `+`, `?`, or `*` with nothing to repeat.
    MissingRepeatArgument,

    /// Unterminated `[...]`.
    MissingBracket,

    /// Unterminated `(...)`, or a stray `)`.
    MissingParen,

    /// Character range endpoints reversed or not literal.
    InvalidCharRange,

    /// Backreference to a group that has not been opened.
    InvalidBackReference,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            Error::UnexpectedEOF => "Unexpected end of pattern",
            Error::UnsupportedClass => "Unsupported anchor or class",
            Error::MissingRepeatArgument => "Nothing to repeat",
            Error::MissingBracket => "Unbalanced bracket",
            Error::MissingParen => "Unbalanced parenthesis",
            Error::InvalidCharRange => "Invalid character range",
            Error::InvalidBackReference => "Backreference exceeds number of capture groups",
        };
        f.write_str(text)
    }
}

impl std::error::Error for Error {}

/// \return the literal byte a `\x`-style escape denotes, or None if the
/// escape does not denote a single byte. Shared between top-level atoms,
/// class atoms, and class range endpoints.
fn escape_literal(c: u8) -> Option<u8> {
    match c {
        b't' => Some(0x09),
        b'n' => Some(0x0A),
        b'v' => Some(0x0B),
        b'f' => Some(0x0C),
        b'r' => Some(0x0D),
        b'e' => Some(0x1B),
        // Metacharacter and identity escapes.
        b'-' | b'|' | b'*' | b'+' | b'?' | b'(' | b')' | b'\\' | b'[' | b']' | b'.' | b'^'
        | b'$' | b'{' | b'}' | b'/' => Some(c),
        _ => None,
    }
}

/// Represents the state used to compile a regex: a cursor into the source
/// plus the partially emitted program.
struct Compiler<'a> {
    /// The pattern source.
    raw: &'a [u8],

    /// Cursor into `raw`.
    pos: usize,

    /// Emitted instructions. Index 0 is the Nil sentinel.
    insns: Vec<Insn>,

    /// Emitted patterns, indexed by Match instructions.
    patterns: Vec<Pattern>,

    /// Number of capture groups opened so far.
    group_count: GroupID,
}

impl<'a> Compiler<'a> {
    fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            pos: 0,
            insns: Vec::new(),
            patterns: Vec::new(),
            group_count: 0,
        }
    }

    /// Peek at the next byte.
    fn peek(&self) -> Option<u8> {
        self.raw.get(self.pos).copied()
    }

    /// \return the next byte, advancing the cursor.
    fn next(&mut self) -> Option<u8> {
        let b = self.peek();
        if b.is_some() {
            self.pos += 1;
        }
        b
    }

    /// Consume a byte known to be next.
    fn consume(&mut self, c: u8) {
        let nc = self.next();
        debug_assert!(nc == Some(c), "byte was not next");
    }

    /// If the source begins with byte `c`, consume it and return true.
    fn try_consume(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Append a fall-through instruction: `next` is the following index,
    /// `alt` is the Nil sentinel. \return its index.
    fn emit(&mut self, op: Op) -> usize {
        let idx = self.insns.len();
        self.insns.push(Insn {
            op,
            next: (idx + 1) as JumpTarget,
            alt: 0,
        });
        idx
    }

    /// Append an instruction with explicit successors. \return its index.
    fn emit_with(&mut self, op: Op, next: JumpTarget, alt: JumpTarget) -> usize {
        let idx = self.insns.len();
        self.insns.push(Insn { op, next, alt });
        idx
    }

    /// Append a pattern and a Match instruction referencing it.
    /// \return the pattern's index.
    fn emit_match(&mut self, pat: Pattern) -> PatternID {
        let pid = self.patterns.len() as PatternID;
        self.patterns.push(pat);
        self.emit(Op::Match(pid));
        pid
    }

    fn run(&mut self) -> Result<(), Error> {
        self.emit_with(Op::Nil, 0, 0);
        // A leading '^' compiles to a real assertion so that it composes
        // with everything after it as an ordinary chain link.
        if self.try_consume(b'^') {
            self.emit(Op::Assert(AssertKind::StartLineOrString));
        }
        self.compile_alternation()?;
        if self.peek().is_some() {
            // Concatenations stop only at '|' (consumed above), the end of
            // the source, or ')'. Whatever remains is an unbalanced paren.
            return Err(Error::MissingParen);
        }
        self.emit_with(Op::End, 0, 0);
        Ok(())
    }

    /// alternation := concat ( '|' concat )*
    ///
    /// Every alternation begins with a Split, even a trivial one, so that
    /// quantifiers always find a patchable entry instruction. When a '|'
    /// is present, a degenerate Split (alt = 0) appended after the left
    /// branch acts as its jump to the merge point; its target is patched
    /// once the right branch has been emitted.
    fn compile_alternation(&mut self) -> Result<(), Error> {
        let split_idx = self.emit(Op::Split);
        self.compile_concat()?;
        if self.try_consume(b'|') {
            let jump_idx = self.emit_with(Op::Split, 0, 0);
            self.insns[split_idx].alt = self.insns.len() as JumpTarget;
            self.compile_alternation()?;
            self.insns[jump_idx].next = self.insns.len() as JumpTarget;
        }
        Ok(())
    }

    /// concat := repetition*
    fn compile_concat(&mut self) -> Result<(), Error> {
        loop {
            let c = match self.peek() {
                None => return Ok(()),
                Some(c) => c,
            };
            match c {
                // A concatenation is terminated by a closing paren or a
                // vertical bar.
                b')' | b'|' => return Ok(()),

                // A quantifier here has no atom to its left: either the
                // concat is empty or the previous atom already consumed
                // its quantifier.
                b'+' | b'?' | b'*' => return Err(Error::MissingRepeatArgument),

                _ => {}
            }

            let start_idx = self.insns.len();
            self.compile_atom()?;
            self.try_compile_quantifier(start_idx);
        }
    }

    /// If a quantifier follows, apply it to the atom that began emitting
    /// at `start_idx`. For subexpressions that index is their Split or
    /// GroupStart entry, so the quantifier acts over the whole atom.
    fn try_compile_quantifier(&mut self, start_idx: usize) {
        match self.peek() {
            Some(b'+') => {
                // One or more: loop back greedily, fall out on failure.
                self.consume(b'+');
                let here = self.insns.len();
                self.emit_with(Op::Split, start_idx as JumpTarget, (here + 1) as JumpTarget);
            }
            Some(b'?') => {
                // Zero or one: make the atom's entry skippable. Valid
                // because an unquantified entry always has alt = 0.
                self.consume(b'?');
                debug_assert!(self.insns[start_idx].alt == 0, "entry should be patchable");
                self.insns[start_idx].alt = self.insns.len() as JumpTarget;
            }
            Some(b'*') => {
                // Zero or more: the '?' skip combined with the '+' loop.
                self.consume(b'*');
                let here = self.insns.len();
                debug_assert!(self.insns[start_idx].alt == 0, "entry should be patchable");
                self.insns[start_idx].alt = (here + 1) as JumpTarget;
                self.emit_with(Op::Split, start_idx as JumpTarget, (here + 1) as JumpTarget);
            }
            _ => {}
        }
    }

    /// atom := escape | char_group | capture | '.' | '$' | literal
    fn compile_atom(&mut self) -> Result<(), Error> {
        // The caller has peeked, so the source is not empty.
        match self.next() {
            Some(b'\\') => self.compile_escape(),
            Some(b'[') => self.compile_char_group(),
            Some(b'(') => self.compile_capture(),
            Some(b'.') => {
                self.emit_match(Pattern::Func(charclasses::is_any));
                Ok(())
            }
            Some(b'$') => {
                // '$' is only meaningful as the final byte of the source.
                if self.pos == self.raw.len() {
                    self.emit(Op::Assert(AssertKind::EndLineOrString));
                    Ok(())
                } else {
                    Err(Error::UnsupportedClass)
                }
            }
            Some(b'^') => Err(Error::UnsupportedClass),
            Some(b) => {
                self.emit_match(Pattern::Char(b));
                Ok(())
            }
            None => Err(Error::UnexpectedEOF),
        }
    }

    /// escape := '\\' ( class | control | assertion | backref | metachar )
    /// The leading backslash has been consumed.
    fn compile_escape(&mut self) -> Result<(), Error> {
        let c = match self.peek() {
            None => return Err(Error::UnexpectedEOF),
            Some(c) => c,
        };
        match c {
            b'd' => {
                self.consume(c);
                self.emit_match(Pattern::Func(charclasses::is_digit));
                Ok(())
            }
            b'w' => {
                self.consume(c);
                self.emit_match(Pattern::Func(charclasses::is_word));
                Ok(())
            }
            b's' => {
                self.consume(c);
                self.emit_match(Pattern::Func(charclasses::is_space));
                Ok(())
            }
            b'b' | b'B' => {
                self.consume(c);
                let kind = if c == b'b' {
                    AssertKind::WordBoundary
                } else {
                    AssertKind::NonWordBoundary
                };
                self.emit(Op::Assert(kind));
                Ok(())
            }
            b'1'..=b'9' => self.compile_backref(),
            _ => match escape_literal(c) {
                Some(b) => {
                    self.consume(c);
                    self.emit_match(Pattern::Char(b));
                    Ok(())
                }
                None => Err(Error::UnexpectedEOF),
            },
        }
    }

    /// A backreference: the decimal integer starting at the current digit.
    /// It must name a group already opened.
    fn compile_backref(&mut self) -> Result<(), Error> {
        let mut n: u32 = 0;
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            self.consume(c);
            n = n.saturating_mul(10).saturating_add((c - b'0') as u32);
        }
        debug_assert!(n >= 1, "first digit is nonzero");
        if n > self.group_count {
            return Err(Error::InvalidBackReference);
        }
        // \1 refers to the first capture group, which has index 0.
        self.emit(Op::Backref((n - 1) as GroupID));
        Ok(())
    }

    /// capture := '(' alternation ')'
    /// The '(' has been consumed.
    fn compile_capture(&mut self) -> Result<(), Error> {
        let group = self.group_count;
        self.group_count += 1;
        self.emit(Op::GroupStart(group));
        self.compile_alternation()?;
        if !self.try_consume(b')') {
            return Err(Error::MissingParen);
        }
        self.emit(Op::GroupEnd(group));
        Ok(())
    }

    /// char_group := '[' [ '^' ] ( class_atom | range )+ ']'
    /// The '[' has been consumed.
    ///
    /// Items are emitted between an initial Split (the quantifier-patchable
    /// entry) and a fixup pass that rewires each item once the closing
    /// bracket fixes the group's extent. A positive group exits forward to
    /// the first index past the items on any hit and chains item-to-item on
    /// misses; a negated group turns every hit into a failure and appends a
    /// catch-all that consumes the byte when nothing was hit.
    fn compile_char_group(&mut self) -> Result<(), Error> {
        self.emit(Op::Split);
        let negated = self.try_consume(b'^');
        let start = self.insns.len();
        loop {
            match self.peek() {
                None => return Err(Error::MissingBracket),
                Some(b']') => {
                    self.consume(b']');
                    break;
                }
                Some(b'-') => {
                    self.consume(b'-');
                    if self.insns.len() == start || self.peek() == Some(b']') {
                        // Leading or trailing '-' is a literal.
                        self.emit_match(Pattern::Char(b'-'));
                    } else {
                        self.convert_last_to_range()?;
                    }
                }
                Some(_) => {
                    self.compile_class_atom()?;
                }
            }
        }
        let end = self.insns.len();
        if start == end {
            return Err(Error::UnsupportedClass);
        }
        if !negated {
            for i in start..end {
                self.insns[i].next = end as JumpTarget;
                self.insns[i].alt = (i + 1) as JumpTarget;
            }
            self.insns[end - 1].alt = 0;
        } else {
            for i in start..end {
                // Any hit fails the whole group; a miss tries the next
                // item, falling into the catch-all after the last.
                self.insns[i].next = 0;
                self.insns[i].alt = (i + 1) as JumpTarget;
            }
            // The catch-all consumes the byte no item claimed.
            self.emit_match(Pattern::Func(charclasses::is_any));
        }
        Ok(())
    }

    /// One item of a character group. Emits exactly one Match instruction,
    /// which the group fixup relies on.
    fn compile_class_atom(&mut self) -> Result<(), Error> {
        let pat = match self.next() {
            None => return Err(Error::MissingBracket),
            Some(b'\\') => match self.next() {
                None => return Err(Error::UnexpectedEOF),
                Some(b'd') => Pattern::Func(charclasses::is_digit),
                Some(b'w') => Pattern::Func(charclasses::is_word),
                Some(b's') => Pattern::Func(charclasses::is_space),
                // Inside a class, \b denotes backspace.
                Some(b'b') => Pattern::Char(0x08),
                Some(c @ b'0'..=b'9') => Pattern::Char(c),
                Some(c) => match escape_literal(c) {
                    Some(b) => Pattern::Char(b),
                    None => return Err(Error::UnexpectedEOF),
                },
            },
            Some(b) => Pattern::Char(b),
        };
        self.emit_match(pat);
        Ok(())
    }

    /// A '-' in range position: rewrite the most recently emitted pattern
    /// from Char(from) to Range{from, to}. Both endpoints must be
    /// literals and ordered.
    fn convert_last_to_range(&mut self) -> Result<(), Error> {
        let to = match self.next() {
            None => return Err(Error::MissingBracket),
            Some(b'\\') => match self.next() {
                None => return Err(Error::UnexpectedEOF),
                Some(c) => match escape_literal(c) {
                    Some(b) => b,
                    None => return Err(Error::InvalidCharRange),
                },
            },
            Some(b) => b,
        };
        let slot = match self.patterns.last_mut() {
            Some(slot) => slot,
            None => return Err(Error::InvalidCharRange),
        };
        match *slot {
            Pattern::Char(from) if from <= to => {
                *slot = Pattern::Range { from, to };
                Ok(())
            }
            _ => Err(Error::InvalidCharRange),
        }
    }
}

/// Compile the given pattern into a Program.
pub fn compile(pattern: &str, options: Options) -> Result<Program, Error> {
    let mut c = Compiler::new(pattern.as_bytes());
    c.run()?;
    let mut program = Program {
        insns: c.insns,
        patterns: c.patterns,
        group_count: c.group_count,
        start_pred: StartPredicate::Arbitrary,
        options,
    };
    program.start_pred = startpredicate::predicate_for(&program);
    program.check_invariants();
    Ok(program)
}
