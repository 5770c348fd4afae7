use crate::backtrack;
use crate::compile;
use crate::insn::Program;

use core::{fmt, str::FromStr};

pub use compile::Error;

/// Options used to control regex compilation and matching.
/// The defaults are case-sensitive and not-multiline.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// If set, `^` and `$` match at line separators, not just the input
    /// boundaries.
    pub multiline: bool,

    /// If set, make the regex case-insensitive (ASCII folding).
    pub ignore_case: bool,
}

impl Options {
    /// Construct an Options from an iterator of flag characters.
    /// 'm' means multiline, 'i' means ignore case.
    /// Other characters are silently skipped.
    #[inline]
    pub fn new<T: Iterator<Item = char>>(chars: T) -> Self {
        let mut result = Self::default();
        for c in chars {
            match c {
                'm' => {
                    result.multiline = true;
                }
                'i' => {
                    result.ignore_case = true;
                }
                _ => {
                    // Silently skip unsupported flags.
                }
            }
        }
        result
    }
}

impl From<&str> for Options {
    /// Construct an Options from a flag string such as `"mi"`.
    ///
    /// See also: [`Options::new`].
    #[inline]
    fn from(s: &str) -> Self {
        Self::new(s.chars())
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.multiline {
            f.write_str("m")?;
        }
        if self.ignore_case {
            f.write_str("i")?;
        }
        Ok(())
    }
}

/// Range is used to express the extent of a match, as byte indexes into
/// the input.
pub type Range = core::ops::Range<usize>;

/// A Match represents a portion of the input which was found to match a
/// Regex.
#[derive(Debug, Clone)]
pub struct Match {
    /// The total range of the match. Note this may be empty, if the regex
    /// matched an empty string.
    pub range: Range,

    /// The list of captures. This has length equal to the number of
    /// capturing groups in the regex. For each capture, if the value is
    /// None, that group did not match (for example, it was in a not-taken
    /// branch of an alternation, or in a skipped optional group). If the
    /// value is Some, the group matched the enclosed range.
    pub captures: Vec<Option<Range>>,
}

impl Match {
    /// Access a group by index. Index 0 is the whole match; index `n`
    /// names the n'th capture group, as `\n` does in a pattern.
    #[inline]
    pub fn group(&self, idx: usize) -> Option<Range> {
        match idx.checked_sub(1) {
            None => Some(self.range.clone()),
            Some(cap) => self.captures[cap].clone(),
        }
    }

    /// The extent of the whole match, as an owned range.
    #[inline]
    pub fn range(&self) -> Range {
        self.range.clone()
    }

    /// The byte offset where the match begins.
    #[inline]
    pub fn start(&self) -> usize {
        self.range.start
    }

    /// The byte offset just past the match.
    #[inline]
    pub fn end(&self) -> usize {
        self.range.end
    }

    /// Iterate over the whole match followed by every capture group, in
    /// the order [`group`](Match::group) numbers them.
    pub fn groups(&self) -> impl Iterator<Item = Option<Range>> + '_ {
        (0..=self.captures.len()).map(move |idx| self.group(idx))
    }
}

/// A Regex is the compiled version of a pattern.
#[derive(Debug, Clone)]
pub struct Regex {
    program: Program,
}

impl Regex {
    /// Construct a regex by compiling `pattern` with the default options.
    /// An Error is returned if the syntax is invalid.
    /// Note that compilation is not free; prefer to cache a Regex which is
    /// intended to be used more than once.
    #[inline]
    pub fn new(pattern: &str) -> Result<Regex, Error> {
        Self::with_options(pattern, Options::default())
    }

    /// Construct a regex by compiling `pattern` with `options`.
    /// An Error is returned if the syntax is invalid.
    #[inline]
    pub fn with_options<O>(pattern: &str, options: O) -> Result<Regex, Error>
    where
        O: Into<Options>,
    {
        let program = compile::compile(pattern, options.into())?;
        Ok(Regex { program })
    }

    /// The options this regex was compiled with.
    #[inline]
    pub fn options(&self) -> Options {
        self.program.options
    }

    /// The number of capture groups declared in the pattern.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.program.group_count as usize
    }

    /// \return whether `input` contains a match for this regex.
    #[inline]
    pub fn is_match(&self, input: &[u8]) -> bool {
        backtrack::Matcher::new(&self.program, input)
            .scan()
            .is_some()
    }

    /// Search `input` for the leftmost match.
    /// The input is borrowed only for the duration of the call.
    pub fn find(&self, input: &[u8]) -> Option<Match> {
        let (start, end, captures) = backtrack::Matcher::new(&self.program, input).scan()?;
        Some(Match {
            range: start..end,
            captures: captures.iter().map(|c| c.as_range()).collect(),
        })
    }

    /// Replace this regex's internals by compiling `pattern`, keeping the
    /// current options. The previous program is released only after the
    /// new compile succeeds; on error the regex is left unchanged.
    pub fn recompile(&mut self, pattern: &str) -> Result<(), Error> {
        let program = compile::compile(pattern, self.program.options)?;
        self.program = program;
        Ok(())
    }
}

impl FromStr for Regex {
    type Err = Error;

    /// Attempts to compile a string into a regular expression.
    #[inline]
    fn from_str(s: &str) -> Result<Self, Error> {
        Self::new(s)
    }
}
