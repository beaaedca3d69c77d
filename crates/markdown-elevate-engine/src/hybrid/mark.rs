use regex::Regex;
use std::sync::OnceLock;

/// Opening delimiter of a mark (Private Use Area).
pub const MARK_OPEN: char = '\u{E000}';
/// Closing delimiter of a mark (Private Use Area).
pub const MARK_CLOSE: char = '\u{E001}';

/// Code point of digit zero in a mark body. Digits run up to `DIGIT_BASE + 35`.
pub const DIGIT_BASE: u32 = 0xE010;

/// Regex source matching one mark, for embedding in larger patterns.
pub const MARK_PATTERN: &str = r"\x{E000}[\x{E010}-\x{E033}]+\x{E001}";

/// Renders `n` in base 36 using Private Use Area digits.
///
/// No character of the result is matched by `\w`, `\d` or any ASCII class,
/// so user patterns cannot end a match halfway through a mark body.
pub fn encode_counter(mut n: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.extend(char::from_u32(DIGIT_BASE + (n % 36) as u32));
        n /= 36;
        if n == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// The mark for counter value `n`.
pub fn format_mark(n: u64) -> String {
    format!("{MARK_OPEN}{}{MARK_CLOSE}", encode_counter(n))
}

/// Matches any mark-shaped string.
pub fn mark_regex() -> &'static Regex {
    static MARK_REGEX: OnceLock<Regex> = OnceLock::new();
    MARK_REGEX.get_or_init(|| Regex::new(MARK_PATTERN).expect("Invalid mark regex"))
}
