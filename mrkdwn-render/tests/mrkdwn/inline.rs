use crate::common::render;
use insta::assert_snapshot;
use std::time::{Duration, Instant};

#[test]
fn test_nested_formatting() {
    assert_snapshot!(render("<i>Hello, <b>World</b>!</i>"), @"_Hello, *World*!_");
}

#[test]
fn test_repeated_formatting_is_not_doubled() {
    assert_snapshot!(render("<b><b>text</b></b>"), @"*text*");
    assert_snapshot!(render("<em>a <i>b</i> c</em>"), @"_a b c_");
}

#[test]
fn test_tag_synonyms() {
    let out = render("<strong>a</strong> <s>b</s> <strike>c</strike> <del>d</del>");
    assert_snapshot!(out, @"*a* ~b~ ~c~ ~d~");
}

#[test]
fn test_inline_code() {
    assert_snapshot!(render("run <code>a*b `c`</code>"), @"run `a*b ˋcˋ`");
    assert_snapshot!(render("<code><b>x</b> <i>y</i></code>"), @"`x y`");
    assert_snapshot!(render("<b>bold <code>code</code></b>"), @"*bold `code`*");
}

#[test]
fn test_transparent_tags() {
    assert_snapshot!(render("<span>a</span><small>b</small>"), @"ab");
}

#[test]
fn test_whitespace_stays_outside_delimiters() {
    assert_snapshot!(render("a<b> padded </b>b"), @"a *padded* b");
}

#[test]
fn test_line_break_reopens_formatting() {
    assert_snapshot!(render("<i>one<br>two</i>"), @r"
    _one_
    _two_
    ");
}

#[test]
fn test_markup_characters_are_guarded() {
    assert_eq!(render("5 * 3 = 15_000"), "5 \u{AD}* 3 = 15\u{AD}_000");
    assert_eq!(render("~home and `tick`"), "\u{AD}~home and \u{AD}`tick\u{AD}`");
}

#[test]
fn test_emoji_shorthand_is_left_alone() {
    assert_eq!(
        render(":smile_cat: is *not* bold"),
        ":smile_cat: is \u{AD}*not\u{AD}* bold"
    );
}

#[test]
fn test_entities_are_encoded() {
    assert_snapshot!(render("&lt;b&gt; &amp; co"), @"&lt;b&gt; &amp; co");
}

#[test]
fn test_quote_lookalike_is_guarded() {
    assert_eq!(render("&gt; not a quote"), "\u{AD}&gt; not a quote");
    assert_eq!(render("a<br>&gt; b"), "a\n\u{AD}&gt; b");
    assert_snapshot!(render("a &gt; b"), @"a &gt; b");
}

#[test]
fn test_deep_nesting_in_blockquote_renders_quickly() {
    let depth = 60;
    let mut source = String::from("<blockquote>");
    for level in 0..depth {
        source.push_str(if level % 2 == 0 { "<i>" } else { "<b>" });
        source.push_str("x<br>");
    }
    for level in (0..depth).rev() {
        source.push_str(if level % 2 == 0 { "</i>" } else { "</b>" });
    }
    source.push_str("</blockquote>");

    let started = Instant::now();
    let out = render(&source);
    let elapsed = started.elapsed();

    let expected = std::iter::once("> _x_")
        .chain(std::iter::repeat("> _*x*_").take(depth - 1))
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(out, expected);
    assert!(elapsed < Duration::from_secs(1), "took {elapsed:?}");
}
