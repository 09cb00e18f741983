//! Output side of the entity codec.
//!
//! Slack treats `&`, `<` and `>` as control characters in every text field, so all text that
//! reaches the output goes through [`encode`] exactly once. Decoding happens in the parser.

use std::borrow::Cow;

/// Encode `&`, `<` and `>` as entities.
pub fn encode(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
