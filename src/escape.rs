//! LaTeX text escaping for heading titles.

/// Characters with structural meaning in LaTeX text.
pub const TEX_SPECIALS: &str = "\\{}_^#&$%~";

/// Prefix character inserted before each special.
pub const ESCAPE_CHAR: char = '\\';

/// Backslash-escapes every character of [`TEX_SPECIALS`] in `text`.
///
/// Only heading titles go through here. Listing directives take the literal
/// path because the renderer opens the file by that name.
#[must_use]
pub fn escape_tex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        if TEX_SPECIALS.contains(c) {
            escaped.push(ESCAPE_CHAR);
        }
        escaped.push(c);
    }
    escaped
}
