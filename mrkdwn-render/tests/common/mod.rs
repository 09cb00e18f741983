//! Shared helpers, and tests for the markup → events → block tree stages.

use chrono::{DateTime, Utc};
use mrkdwn_render::ir::events::Event;
use mrkdwn_render::ir::nodes::*;
use mrkdwn_render::{
    events_to_tree, markup_to_events, parse_markup, render_with_options, RenderOptions,
};

/// 2014-02-18 20:00 UTC, the same day as the timestamps used in these tests.
pub fn now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2014-02-18T20:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn options() -> RenderOptions {
    RenderOptions::default()
        .with_exact_mode(false)
        .with_now(now())
}

pub fn render(source: &str) -> String {
    render_with_options(source, &options()).unwrap()
}

fn tree(source: &str) -> Document {
    let nodes = parse_markup(source).unwrap();
    events_to_tree(&markup_to_events(&nodes)).unwrap()
}

#[test]
fn test_paragraph_list_paragraph() {
    let doc = tree("<p>Intro</p><ul><li>one</li><li>two</li></ul>Outro");
    assert_eq!(doc.children.len(), 3);

    match &doc.children[1] {
        BlockNode::List(list) => {
            assert!(!list.ordered);
            assert_eq!(list.items.len(), 2);
            assert!(matches!(
                &list.items[0].children[0],
                BlockNode::Paragraph(p) if p.content == vec![InlineNode::Text("one".to_string())]
            ));
        }
        other => panic!("Expected List, got {other:?}"),
    }
    assert!(matches!(&doc.children[2], BlockNode::Paragraph(_)));
}

#[test]
fn test_list_directly_in_list_becomes_item() {
    let doc = tree("<ul><li>a</li><ul><li>b</li></ul></ul>");

    let BlockNode::List(outer) = &doc.children[0] else {
        panic!("Expected List");
    };
    assert_eq!(outer.items.len(), 2);
    assert_eq!(outer.items[1].children.len(), 1);
    assert!(outer.items[1].children[0].is_list());
}

#[test]
fn test_stray_list_items_share_a_list() {
    let doc = tree("<li>a</li><li>b</li>");
    assert_eq!(doc.children.len(), 1);
    assert!(matches!(&doc.children[0], BlockNode::List(list) if list.items.len() == 2));
}

#[test]
fn test_pre_keeps_links_and_times_only() {
    let doc = tree(
        r#"<pre><b>x</b> <a href="https://x.test">y</a> <time datetime="0">{date}</time></pre>"#,
    );

    let BlockNode::CodeBlock(code) = &doc.children[0] else {
        panic!("Expected CodeBlock");
    };
    assert_eq!(code.content.len(), 4);
    assert_eq!(code.content[0], InlineNode::Text("x ".to_string()));
    assert!(matches!(&code.content[1], InlineNode::Link(link) if link.url == "https://x.test"));
    assert_eq!(code.content[2], InlineNode::Text(" ".to_string()));
    assert!(matches!(&code.content[3], InlineNode::Time(_)));
}

#[test]
fn test_event_stream_shape() {
    let events = markup_to_events(&parse_markup("<blockquote>hi</blockquote>").unwrap());
    assert_eq!(
        events,
        vec![
            Event::StartDocument,
            Event::StartBlockquote,
            Event::text("hi"),
            Event::EndBlockquote,
            Event::EndDocument,
        ]
    );
}

#[test]
fn test_block_tree_serializes_to_json() {
    let doc = tree(r#"<ol start="3" type="a"><li><b>x</b></li></ol>"#);
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["children"][0]["type"], "list");
    assert_eq!(json["children"][0]["start"], 3);
    assert_eq!(json["children"][0]["style"], "lower_alpha");
    assert_eq!(
        json["children"][0]["items"][0]["children"][0]["content"][0]["type"],
        "strong"
    );
}
