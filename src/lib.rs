/*!

# regrip - a backtracking regex engine over bytes

This crate provides a small regular expression engine which operates on 8-bit
byte sequences and supports capture groups and backreferences. It backs the
`rgrep` line-matching tool.

# Example: test if an input contains a match

```rust
use regrip::Regex;
let re = Regex::new(r"\d\d:\d\d").unwrap();
assert!(re.is_match(b"lunch at 12:30"));
```

# Example: using capture groups

Capture groups are available in the `Match` object produced by a successful
search. A capture group is a range of byte indexes into the original input.

```rust
use regrip::Regex;
let re = Regex::new(r"(\w+)-(\w+)").unwrap();
let text = b"a well-known example";
let m = re.find(text).unwrap();
assert_eq!(&text[m.group(1).unwrap()], &b"well"[..]);
assert_eq!(&text[m.group(2).unwrap()], &b"known"[..]);
```

# Example: backreferences

```rust
use regrip::Regex;
let re = Regex::new(r"(\w+) \1").unwrap();
assert!(re.is_match(b"hear hear"));
assert!(!re.is_match(b"hear here"));
```

# Supported syntax

Alternation `|`, greedy quantifiers `+` `?` `*`, character classes with
ranges and negation, capture groups, backreferences `\1`..`\9` and beyond,
anchors `^` and `$`, word boundaries `\b` and `\B`, and the class escapes
`\d`, `\w`, `\s`. Matching is over bytes: there is no Unicode awareness, no
lookaround, and no counted repetition.

# Comparison to the regex crate

regrip supports backreferences, which regex does not. However the regex
crate provides linear-time matching guarantees, while regrip does not: this
engine is deliberately a classical backtracker, and pathological patterns
such as `(a+)+b` can take exponential time. Callers that accept untrusted
patterns must impose their own limits.

# Architecture

A one-pass recursive-descent compiler translates the pattern into a flat
array of instructions over a shared pattern table; nondeterminism is
expressed by a single Split instruction whose two successor indices are
patched as parsing proceeds. Execution is an explicit backtracking machine
over `(instruction, position, captures)` jobs, cloning capture state at
each branch point.

*/

#![warn(clippy::all)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

pub use crate::api::*;

mod api;
mod backtrack;
mod charclasses;
mod compile;
mod insn;
mod pattern;
mod startpredicate;
