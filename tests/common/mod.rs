use regrip::{Error, Match, Options, Regex};

/// Test that \p pattern fails to compile with default options.
pub fn test_compile_fails(pattern: &str) {
    let res = Regex::new(pattern);
    assert!(res.is_err(), "Pattern should not have compiled: {}", pattern);
}

/// Test that \p pattern fails to compile with the given error.
pub fn test_compile_err(pattern: &str, err: Error) {
    match Regex::new(pattern) {
        Ok(_) => panic!("Pattern should not have compiled: {}", pattern),
        Err(e) => assert_eq!(e, err, "Wrong error for pattern: {}", pattern),
    }
}

/// Format a Match by inserting commas between all capture groups.
fn format_match(m: &Match, input: &str) -> String {
    let mut result = input[m.range()].to_string();
    for cg in m.captures.iter() {
        result.push(',');
        if let Some(cg) = cg {
            result.push_str(&input[cg.clone()])
        }
    }
    result
}

pub trait StringTestHelpers {
    /// "Fluent" style helper for testing that a String is equal to a str.
    fn test_eq(&self, s: &str);
}

impl StringTestHelpers for String {
    fn test_eq(&self, rhs: &str) {
        assert_eq!(self.as_str(), rhs)
    }
}

/// A compiled regex which remembers its pattern for error reporting.
#[derive(Debug, Clone)]
pub struct TestCompiledRegex {
    re: Regex,
    pattern: String,
}

impl TestCompiledRegex {
    /// Search for self in \p input, returning the first Match, or None.
    pub fn find(&self, input: &str) -> Option<Match> {
        self.re.find(input.as_bytes())
    }

    /// Match against \p input, returning the total matched text.
    pub fn match1(&self, input: &str) -> String {
        match self.find(input) {
            Some(m) => input[m.range()].to_string(),
            None => panic!("Failed to match {} against {}", self.pattern, input),
        }
    }

    /// Match against \p input, returning the match and capture groups
    /// joined with commas.
    pub fn match1g(&self, input: &str) -> String {
        match self.find(input) {
            Some(m) => format_match(&m, input),
            None => panic!("Failed to match {} against {}", self.pattern, input),
        }
    }

    /// Test that the regex matches somewhere in \p input.
    pub fn test_matches(&self, input: &str) {
        assert!(
            self.re.is_match(input.as_bytes()),
            "Pattern {} should match {}",
            self.pattern,
            input
        );
    }

    /// Test that the regex matches nowhere in \p input.
    pub fn test_fails(&self, input: &str) {
        assert!(
            !self.re.is_match(input.as_bytes()),
            "Pattern {} should not match {}",
            self.pattern,
            input
        );
    }
}

/// Compile \p pattern with default options, panicking on failure.
pub fn compile(pattern: &str) -> TestCompiledRegex {
    compilef(pattern, "")
}

/// Compile \p pattern with options given as flag letters ("m", "i").
pub fn compilef(pattern: &str, flags: &str) -> TestCompiledRegex {
    match Regex::with_options(pattern, Options::from(flags)) {
        Ok(re) => TestCompiledRegex {
            re,
            pattern: pattern.to_string(),
        },
        Err(e) => panic!("Failed to compile {}: {}", pattern, e),
    }
}
