//! Symbol classification.
//!
//! A conservative allow-list: placeholder and metavariable heads such as `X`,
//! `1` or `obj1` written in capitals are rejected, real procedure names pass.

/// First character: lowercase ASCII letter or `@ * + / -`.
const fn is_initial(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, '@' | '*' | '+' | '/' | '-')
}

/// Later characters: ASCII letters, digits, or `@ ? ! < > * / + -`.
const fn is_subsequent(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '@' | '?' | '!' | '<' | '>' | '*' | '/' | '+' | '-')
}

/// Whether `token` names a procedure or syntactic form.
#[must_use]
pub fn is_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next().is_some_and(is_initial) && chars.all(is_subsequent)
}
