//! Classical backtracking execution engine

use crate::charclasses;
use crate::insn::{AssertKind, Op, Program, StartPredicate, IP};
use memchr::{memchr, memchr2, memchr_iter};
use smallvec::{smallvec, SmallVec};

/// Recorded bounds of one capture group. Both ends start unset; a group
/// that was never fully exited reports no range.
#[derive(Debug, Copy, Clone, Default)]
pub(crate) struct Capture {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Capture {
    pub fn as_range(&self) -> Option<core::ops::Range<usize>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(start..end),
            _ => None,
        }
    }
}

/// Capture state for one attempt. Inline capacity keeps branch clones
/// allocation-free for small group counts.
pub(crate) type CaptureList = SmallVec<[Capture; 4]>;

/// One pending exploration: resume at instruction `ip` with the input at
/// `pos` and this capture state.
#[derive(Debug)]
struct Job {
    ip: IP,
    pos: usize,
    captures: CaptureList,
}

/// A successful attempt: where the match ended and what the groups
/// captured. The start is whatever position the attempt was made at.
pub(crate) type Matched = (usize, CaptureList);

#[derive(Debug)]
pub(crate) struct Matcher<'r, 't> {
    program: &'r Program,
    input: &'t [u8],
}

impl<'r, 't> Matcher<'r, 't> {
    pub fn new(program: &'r Program, input: &'t [u8]) -> Self {
        Self { program, input }
    }

    /// Search the whole input, attempting candidate start positions in
    /// order. \return the leftmost match as (start, end, captures).
    pub fn scan(&self) -> Option<(usize, usize, CaptureList)> {
        let input = self.input;
        match self.program.start_pred {
            StartPredicate::Arbitrary => {
                // Inclusive of len: a regex accepting the empty string
                // matches empty input, and '$' may assert at the very end.
                for pos in 0..=input.len() {
                    if let Some((end, captures)) = self.try_at(pos) {
                        return Some((pos, end, captures));
                    }
                }
                None
            }
            StartPredicate::Byte(b) => {
                let mut from = 0;
                while let Some(i) = memchr(b, &input[from..]) {
                    let pos = from + i;
                    if let Some((end, captures)) = self.try_at(pos) {
                        return Some((pos, end, captures));
                    }
                    from = pos + 1;
                }
                None
            }
            StartPredicate::Byte2([a, b]) => {
                let mut from = 0;
                while let Some(i) = memchr2(a, b, &input[from..]) {
                    let pos = from + i;
                    if let Some((end, captures)) = self.try_at(pos) {
                        return Some((pos, end, captures));
                    }
                    from = pos + 1;
                }
                None
            }
            StartPredicate::StartAnchored => {
                self.try_at(0).map(|(end, captures)| (0, end, captures))
            }
            StartPredicate::LineAnchored => {
                if let Some((end, captures)) = self.try_at(0) {
                    return Some((0, end, captures));
                }
                for nl in memchr_iter(b'\n', input) {
                    let pos = nl + 1;
                    if let Some((end, captures)) = self.try_at(pos) {
                        return Some((pos, end, captures));
                    }
                }
                None
            }
        }
    }

    /// Attempt to match at a single start position.
    ///
    /// The recursion of the instruction graph is driven as an explicit
    /// LIFO stack of jobs. Each nondeterministic choice pushes its `alt`
    /// continuation before its `next` continuation, so `next` is explored
    /// first; that ordering is what makes quantifiers greedy and makes
    /// the leftmost alternative the winning one. Capture state travels
    /// with each job: a branch writes only to its own copy, so captures
    /// recorded down a failing branch never leak into its sibling.
    fn try_at(&self, start: usize) -> Option<Matched> {
        let re = self.program;
        let input = self.input;
        let fresh: CaptureList = smallvec![Capture::default(); re.group_count as usize];
        let mut jobs: Vec<Job> = vec![Job {
            ip: 1,
            pos: start,
            captures: fresh,
        }];

        while let Some(job) = jobs.pop() {
            let Job {
                ip,
                pos,
                mut captures,
            } = job;
            let insn = re.insns[ip];
            let next = insn.next as IP;
            let alt = insn.alt as IP;
            match insn.op {
                // A dead end; fall back to the remaining jobs.
                Op::Nil => {}

                Op::End => return Some((pos, captures)),

                Op::Split => {
                    if alt != 0 {
                        jobs.push(Job {
                            ip: alt,
                            pos,
                            captures: captures.clone(),
                        });
                    }
                    if next != 0 {
                        jobs.push(Job { ip: next, pos, captures });
                    }
                }

                Op::Match(pid) => {
                    let accepted = pos < input.len()
                        && re.patterns[pid as usize].matches(input[pos], re.options.ignore_case);
                    if accepted {
                        jobs.push(Job {
                            ip: next,
                            pos: pos + 1,
                            captures,
                        });
                    } else if alt != 0 {
                        jobs.push(Job { ip: alt, pos, captures });
                    }
                }

                Op::Assert(kind) => {
                    if self.assert_holds(kind, pos) {
                        jobs.push(Job { ip: next, pos, captures });
                    } else if alt != 0 {
                        jobs.push(Job { ip: alt, pos, captures });
                    }
                }

                Op::GroupStart(g) => {
                    if alt != 0 {
                        // Skippable group: the skip path must not see the
                        // start about to be recorded.
                        jobs.push(Job {
                            ip: alt,
                            pos,
                            captures: captures.clone(),
                        });
                    }
                    let cap = &mut captures[g as usize];
                    cap.start = Some(pos);
                    // Clear any end left by a previous iteration so a
                    // stale pair never forms a bogus range.
                    cap.end = None;
                    jobs.push(Job { ip: next, pos, captures });
                }

                Op::GroupEnd(g) => {
                    captures[g as usize].end = Some(pos);
                    jobs.push(Job { ip: next, pos, captures });
                }

                Op::Backref(g) => {
                    // An unset group fails rather than matching empty.
                    let matched_to = captures[g as usize].as_range().and_then(|r| {
                        let text = &input[r];
                        let stop = pos.checked_add(text.len())?;
                        if stop > input.len() {
                            return None;
                        }
                        let candidate = &input[pos..stop];
                        let equal = if re.options.ignore_case {
                            candidate.eq_ignore_ascii_case(text)
                        } else {
                            candidate == text
                        };
                        if equal {
                            Some(stop)
                        } else {
                            None
                        }
                    });
                    match matched_to {
                        Some(stop) => jobs.push(Job {
                            ip: next,
                            pos: stop,
                            captures,
                        }),
                        None => {
                            if alt != 0 {
                                jobs.push(Job { ip: alt, pos, captures });
                            }
                        }
                    }
                }
            }
        }
        None
    }

    /// Evaluate a zero-width assertion at a position.
    fn assert_holds(&self, kind: AssertKind, pos: usize) -> bool {
        let input = self.input;
        let multiline = self.program.options.multiline;
        match kind {
            AssertKind::StartLineOrString => {
                pos == 0 || (multiline && input[pos - 1] == b'\n')
            }
            AssertKind::EndLineOrString => {
                pos == input.len() || (multiline && input[pos] == b'\n')
            }
            AssertKind::WordBoundary | AssertKind::NonWordBoundary => {
                // Out-of-range neighbors count as non-word.
                let prev_word = pos > 0 && charclasses::is_word(input[pos - 1]);
                let curr_word = pos < input.len() && charclasses::is_word(input[pos]);
                let boundary = prev_word != curr_word;
                (kind == AssertKind::WordBoundary) == boundary
            }
        }
    }
}
