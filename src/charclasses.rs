// Character classes like \d or \s, as byte predicates.

/// \return whether the byte is an ASCII decimal digit.
#[inline(always)]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// \return whether the byte is a word byte: `0-9A-Za-z_`.
#[inline(always)]
pub fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// \return whether the byte is whitespace: space or `\t`..`\r`
/// (tab, line feed, vertical tab, form feed, carriage return).
#[inline(always)]
pub fn is_space(b: u8) -> bool {
    b == b' ' || (0x09..=0x0D).contains(&b)
}

/// \return true for every byte; the acceptor behind `.`.
#[inline(always)]
pub fn is_any(_b: u8) -> bool {
    true
}
