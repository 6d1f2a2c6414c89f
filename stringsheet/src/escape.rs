//! Backslash escaping used by Android string resources.
//!
//! Values travel escaped inside `strings.xml` (`Don\'t`, `line\nbreak`) and unescaped inside
//! spreadsheet cells. Only the characters in [`ESCAPES`] are touched; everything else,
//! including non-ASCII text, passes through unchanged.

/// `(literal character, escape letter)` pairs.
const ESCAPES: [(char, char); 6] = [
    ('@', '@'),
    ('?', '?'),
    ('\n', 'n'),
    ('\t', 't'),
    ('\'', '\''),
    ('"', '"'),
];

/// Escapes every special character that is not already preceded by a backslash.
///
/// Idempotent: `escape(&escape(s)) == escape(s)`.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut previous = None;
    for c in value.chars() {
        match ESCAPES.iter().find(|(literal, _)| *literal == c) {
            Some((_, letter)) if previous != Some('\\') => {
                out.push('\\');
                out.push(*letter);
            }
            _ => out.push(c),
        }
        previous = Some(c);
    }
    out
}

/// Replaces each two-character escape sequence with its literal character.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let literal = chars
                .peek()
                .and_then(|next| ESCAPES.iter().find(|(_, letter)| letter == next))
                .map(|(literal, _)| *literal);
            if let Some(literal) = literal {
                chars.next();
                out.push(literal);
                continue;
            }
        }
        out.push(c);
    }
    out
}
