// Work around dead code warnings: rust-lang issue #46379
pub mod common;
use common::*;

use regrip::Error;

#[test]
fn test_unexpected_eof() {
    test_compile_err("abc\\", Error::UnexpectedEOF);
    test_compile_err(r"\z", Error::UnexpectedEOF);
    test_compile_err(r"\0", Error::UnexpectedEOF);
    test_compile_err(r"[a\z]", Error::UnexpectedEOF);
    test_compile_err(r"[ab\", Error::UnexpectedEOF);
}

#[test]
fn test_unsupported_class() {
    test_compile_err("a^b", Error::UnsupportedClass);
    test_compile_err("(^a)", Error::UnsupportedClass);
    test_compile_err("a$b", Error::UnsupportedClass);
    test_compile_err("(a$)", Error::UnsupportedClass);
    test_compile_err("a[]b", Error::UnsupportedClass);
}

#[test]
fn test_missing_repeat_argument() {
    test_compile_err("*a", Error::MissingRepeatArgument);
    test_compile_err("+a", Error::MissingRepeatArgument);
    test_compile_err("?a", Error::MissingRepeatArgument);
    test_compile_err("a|*b", Error::MissingRepeatArgument);
    test_compile_err("(+x)", Error::MissingRepeatArgument);
    test_compile_err("a**", Error::MissingRepeatArgument);
}

#[test]
fn test_missing_bracket() {
    test_compile_err("[abc", Error::MissingBracket);
    test_compile_err("[^abc", Error::MissingBracket);
    test_compile_err("[a-", Error::MissingBracket);
    test_compile_err("x[", Error::MissingBracket);
}

#[test]
fn test_missing_paren() {
    test_compile_err("(ab", Error::MissingParen);
    test_compile_err("((ab)", Error::MissingParen);
    test_compile_err("(a|b", Error::MissingParen);
    test_compile_err("ab)", Error::MissingParen);
}

#[test]
fn test_invalid_char_range() {
    test_compile_err("[9-1] balls", Error::InvalidCharRange);
    test_compile_err("[z-a]", Error::InvalidCharRange);
    test_compile_err(r"[\d-z]", Error::InvalidCharRange);
    test_compile_err(r"[a-\d]", Error::InvalidCharRange);
}

#[test]
fn test_invalid_backreference() {
    test_compile_err(r"\1", Error::InvalidBackReference);
    test_compile_err(r"(a)\2", Error::InvalidBackReference);
    test_compile_err(r"\1(a)", Error::InvalidBackReference);
    test_compile_err(r"\d+ (\w+) squares and \1\2 circles", Error::InvalidBackReference);
    // A backreference may name the group it appears in.
    assert!(regrip::Regex::new(r"(a\1)").is_ok());
}

#[test]
fn test_display_messages() {
    // Every error renders a human-readable diagnostic.
    for pattern in &["(a", "[a", "a^b", "*", r"\1", "[z-a]", r"\"] {
        let err = regrip::Regex::new(pattern).unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}

#[test]
fn test_valid_edge_cases_still_compile() {
    for pattern in &["", "()", "a|", "|a", "(|)", "[-]", "[a-]", "[-a]", "a{2}"] {
        assert!(
            regrip::Regex::new(pattern).is_ok(),
            "Pattern should compile: {}",
            pattern
        );
    }
}
