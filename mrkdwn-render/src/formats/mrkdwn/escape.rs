//! Context-sensitive escaping of text leaves.
//!
//! Every text leaf is escaped exactly once, before any markup is placed around it, so the output
//! of this module never contains tags of its own. The rules depend on where the text sits:
//!
//! | context      | `&` `<` `>` | `*` `_` `~` `` ` `` (and full-width forms)   |
//! |--------------|-------------|----------------------------------------------|
//! | plain text   | entities    | prefixed with U+00AD                          |
//! | link text    | entities    | replaced by `∗` `ˍ` `∼` `ˋ`                   |
//! | inline code  | entities    | only backticks change, to `ˋ`                 |
//! | code block   | entities    | untouched                                     |
//!
//! Emoji shorthand such as `:thumbs_up:` is left alone in plain and link text.

use crate::common::entities::encode;
use once_cell::sync::Lazy;
use regex::Regex;

/// Invisible guard placed in front of markup characters.
pub const GUARD: char = '\u{00AD}';

static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        ":[-a-z0-9ÀÁÂÃÄÇÈÉÊËÍÎÏÑÓÔÕÖŒœÙÚÛÜŸßàáâãäçèéêëíîïñóôõöùúûüÿ_＿+＋'\u{02bc}]+:",
    )
    .expect("valid emoji shorthand regex")
});

/// Where a piece of text is being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContext {
    Plain,
    LinkText,
    InlineCode,
    CodeBlock,
}

/// Escape a text leaf for the given context.
pub fn escape_text(text: &str, context: TextContext) -> String {
    let encoded = encode(text);
    match context {
        TextContext::Plain => outside_emoji(&encoded, guard_char),
        TextContext::LinkText => outside_emoji(&encoded, look_alike),
        TextContext::InlineCode => encoded.replace('`', "\u{02CB}"),
        TextContext::CodeBlock => encoded.into_owned(),
    }
}

/// Escape a link target: entities, and `|` percent-encoded so it cannot end the URL.
pub fn escape_url(url: &str) -> String {
    encode(url).replace('|', "%7C")
}

/// Escape the format or fallback of a time token, where `|` would end the token.
pub fn escape_time_part(text: &str) -> String {
    encode(text).replace('|', "\u{01C0}")
}

/// Guard a line whose text would start a quote in Slack.
pub fn guard_line_start(line: &str) -> Option<String> {
    line.starts_with("&gt;").then(|| format!("{GUARD}{line}"))
}

fn is_markup_char(c: char) -> bool {
    matches!(c, '*' | '_' | '~' | '`' | '＊' | '＿' | '～' | '｀')
}

fn guard_char(c: char, out: &mut String) {
    out.push(GUARD);
    out.push(c);
}

fn look_alike(c: char, out: &mut String) {
    out.push(match c {
        '*' | '＊' => '\u{2217}',
        '_' | '＿' => '\u{02CD}',
        '~' | '～' => '\u{223C}',
        _ => '\u{02CB}',
    });
}

/// Apply `substitute` to markup characters outside emoji shorthand.
fn outside_emoji(text: &str, substitute: fn(char, &mut String)) -> String {
    if !text.contains(is_markup_char) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    for emoji in EMOJI.find_iter(text) {
        substitute_all(&text[last..emoji.start()], substitute, &mut out);
        out.push_str(emoji.as_str());
        last = emoji.end();
    }
    substitute_all(&text[last..], substitute, &mut out);
    out
}

fn substitute_all(segment: &str, substitute: fn(char, &mut String), out: &mut String) {
    for c in segment.chars() {
        if is_markup_char(c) {
            substitute(c, out);
        } else {
            out.push(c);
        }
    }
}
