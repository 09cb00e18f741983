//! Property-based tests for the renderer.

use crate::common::options;
use mrkdwn_render::formats::mrkdwn::escape::{escape_text, TextContext};
use mrkdwn_render::formats::mrkdwn::numbering::{alpha, roman};
use mrkdwn_render::{render_with_options, Element, MarkupNode, Tag};
use proptest::prelude::*;

/// Text with nothing that needs escaping
fn inert_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,40}",
        "[a-zA-Z0-9 ,.!?;:'\"()+=#/-]{0,40}",
        // Emoji shorthand
        "[a-z ]{0,10}:[a-z_]{1,10}:[a-z ]{0,10}",
    ]
}

/// Single-line text that survives markup parsing unchanged
fn sentence_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ,.!?]{0,30}[a-zA-Z0-9.]"
}

/// Code block contents: markup characters and indentation, no entities
fn code_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 *_~`#.,;(){}=+-]{1,30}(\n[a-zA-Z0-9 *_~`#.,;(){}=+-]{0,30}){0,3}"
}

fn decode_alpha(s: &str) -> i64 {
    s.bytes().fold(0, |n, b| n * 26 + i64::from(b - b'a' + 1))
}

fn decode_roman(s: &str) -> i64 {
    let value = |c: char| match c {
        'i' => 1,
        'v' => 5,
        'x' => 10,
        'l' => 50,
        'c' => 100,
        'd' => 500,
        'm' => 1000,
        _ => panic!("not a roman digit: {c}"),
    };
    let digits: Vec<i64> = s.chars().map(value).collect();
    digits
        .iter()
        .enumerate()
        .map(|(i, &d)| match digits.get(i + 1) {
            Some(&next) if next > d => -d,
            _ => d,
        })
        .sum()
}

proptest! {
    #[test]
    fn test_decimal_markers_align_to_widest(n in 1usize..120) {
        let items: String = (1..=n).map(|i| format!("<li>item{i}</li>")).collect();
        let out = render_with_options(format!("<ol>{items}</ol>").as_str(), &options()).unwrap();

        let width = format!("{n}.").len();
        let lines: Vec<&str> = out.lines().collect();
        prop_assert_eq!(lines.len(), n);
        for (i, line) in lines.iter().enumerate() {
            let marker = format!("{}.", i + 1);
            prop_assert_eq!(*line, format!("{marker:>width$} item{}", i + 1));
        }
    }

    #[test]
    fn test_alpha_is_bijective_base_26(n in 1i64..200_000) {
        let letters = alpha(n).unwrap();
        prop_assert!(letters.bytes().all(|b| b.is_ascii_lowercase()));
        prop_assert_eq!(decode_alpha(&letters), n);
    }

    #[test]
    fn test_roman_round_trips(n in 1i64..=3999) {
        let numeral = roman(n).unwrap();
        prop_assert_eq!(decode_roman(&numeral), n);
    }

    #[test]
    fn test_inert_text_is_not_escaped(text in inert_text_strategy()) {
        prop_assert_eq!(escape_text(&text, TextContext::Plain), text.clone());
        prop_assert_eq!(escape_text(&text, TextContext::LinkText), text.clone());
        prop_assert_eq!(escape_text(&text, TextContext::InlineCode), text);
    }

    #[test]
    fn test_plain_sentences_render_unchanged(text in sentence_strategy()) {
        let out = render_with_options(text.as_str(), &options()).unwrap();
        prop_assert_eq!(out, text);
    }

    #[test]
    fn test_code_block_contents_are_byte_for_byte(code in code_strategy()) {
        let tree = MarkupNode::from(Element::new(Tag::Pre).child(code.as_str()));
        let out = render_with_options(&tree, &options()).unwrap();
        prop_assert_eq!(out, format!("```\n{code}\n```"));
    }
}
