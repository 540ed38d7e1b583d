//! Reserved words.

/// Words that can never be used as a variable, parameter, function or
/// class name.
pub const KEYWORDS: [&str; 16] = [
    "and", "class", "else", "false", "for", "fun", "if", "nil", "or", "print", "return", "super",
    "this", "true", "var", "while",
];

/// Returns `true` if `name` is a reserved word.
#[inline]
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}
