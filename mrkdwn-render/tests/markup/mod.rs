//! Tests for reading markup strings.

use mrkdwn_render::{parse_markup, render, Element, MarkupNode, RenderError, Tag};
use rstest::rstest;

#[rstest]
#[case("<div>x</div>", "div")]
#[case("<h1>Title</h1>", "h1")]
#[case("<table><tr><td>x</td></tr></table>", "table")]
#[case("<p>a <img src=\"x.png\"> b</p>", "img")]
#[case("<ul><li><u>x</u></li></ul>", "u")]
fn test_unknown_tags_abort(#[case] source: &str, #[case] tag: &str) {
    assert_eq!(
        render(source),
        Err(RenderError::UnsupportedMarkup(tag.to_string()))
    );
}

#[test]
fn test_tag_names_ignore_case() {
    let nodes = parse_markup("<B>x</B><Time DateTime=\"0\">{date}</Time>").unwrap();
    assert_eq!(nodes[0], MarkupNode::from(Element::new(Tag::B).child("x")));
    let MarkupNode::Element(time) = &nodes[1] else {
        panic!("Expected <time>");
    };
    assert_eq!(time.get_attr("datetime"), Some("0"));
}

#[test]
fn test_entities_are_decoded() {
    let nodes = parse_markup("a &amp; b &lt;c&gt; &#42;").unwrap();
    assert_eq!(nodes, vec![MarkupNode::text("a & b <c> *")]);
}

#[test]
fn test_comments_are_dropped() {
    let nodes = parse_markup("a<!-- hidden -->b").unwrap();
    let text: String = nodes.iter().map(MarkupNode::text_content).collect();
    assert_eq!(text, "ab");
}

#[test]
fn test_attributes_are_kept() {
    let nodes = parse_markup(r#"<ol start="4" type="i"><li value="7">x</li></ol>"#).unwrap();
    let MarkupNode::Element(list) = &nodes[0] else {
        panic!("Expected <ol>");
    };
    assert_eq!(list.tag, Tag::Ol);
    assert_eq!(list.get_attr("start"), Some("4"));
    assert_eq!(list.get_attr("type"), Some("i"));
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_markup("").unwrap(), vec![]);
    assert_eq!(render("").unwrap(), "");
}
