//! Partial masking of bearer tokens for log output
//!
//! Tokens never appear verbatim in logs or error messages; only this
//! transform's output does. The visible prefix/suffix length scales with
//! the token length: 80% of the characters are hidden (rounded down to an
//! even count so both ends show the same amount), and the asterisk run in
//! the middle is 70% of the token length.

use std::fmt;

/// Mask a token for display.
///
/// For a token of length `L`: the hidden span is `L - floor(0.8 * L)`
/// characters, decremented by one if odd; half of the remainder is shown
/// at each end around `floor(0.7 * L)` asterisks. A 10-character token
/// `abcdefghij` renders as `a*******j`.
pub fn mask(token: &str) -> String {
    let length = token.chars().count();
    let mut uncovered = length - (length * 8) / 10;
    if uncovered % 2 == 1 {
        uncovered -= 1;
    }
    let half = uncovered / 2;
    let stars = (length * 7) / 10;

    let mut out = String::with_capacity(uncovered + stars);
    out.extend(token.chars().take(half));
    out.extend(std::iter::repeat_n('*', stars));
    out.extend(token.chars().skip(length - half));
    out
}

/// Display adapter that masks a borrowed token.
///
/// Lets call sites log a token field without an intermediate `String`:
/// `info!(token = %Masked(token), ...)`.
pub struct Masked<'a>(pub &'a str);

impl fmt::Display for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask(self.0))
    }
}

impl fmt::Debug for Masked<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&mask(self.0))
    }
}
