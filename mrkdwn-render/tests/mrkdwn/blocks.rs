use crate::common::render;
use insta::assert_snapshot;

#[test]
fn test_paragraphs_are_separated_by_a_blank_line() {
    assert_snapshot!(render("<p>one</p><p>two</p>"), @r"
    one

    two
    ");
}

#[test]
fn test_blockquote_with_two_paragraphs() {
    assert_eq!(
        render("<blockquote><p>first</p><p>second</p></blockquote>"),
        "> first\n> \n> second"
    );
}

#[test]
fn test_nested_blockquotes() {
    assert_eq!(
        render("<blockquote>a<blockquote>b</blockquote></blockquote>"),
        "> a\n> \n> > b"
    );
}

#[test]
fn test_formatting_carries_into_blockquote() {
    assert_snapshot!(render("<i><blockquote>x</blockquote></i>"), @"> _x_");
}

#[test]
fn test_unordered_list() {
    assert_snapshot!(render("<ul><li>one</li><li>two</li></ul>"), @r"
    • one
    • two
    ");
}

#[test]
fn test_nested_bullets_cycle() {
    let out =
        render("<ul><li>a<ul><li>b<ul><li>c<ul><li>d</li></ul></li></ul></li></ul></li></ul>");
    assert_snapshot!(out, @r"
    • a
      ◦ b
        ▪ c
          • d
    ");
}

#[test]
fn test_nested_list_stays_tight() {
    assert_snapshot!(render("<ul><li>one<ul><li>sub</li></ul></li><li>two</li></ul>"), @r"
    • one
      ◦ sub
    • two
    ");
}

#[test]
fn test_list_directly_inside_list() {
    assert_snapshot!(render("<ul><li>a</li><ul><li>b</li></ul></ul>"), @r"
    • a
    • ◦ b
    ");
}

#[test]
fn test_ordered_list_start_aligns_markers() {
    let out = render(r#"<ol start="9"><li>first</li><li>second<br>line</li></ol>"#);
    assert_snapshot!(out, @r"
     9. first
    10. second
        line
    ");
}

#[test]
fn test_ordered_list_styles() {
    assert_snapshot!(render(r#"<ol type="a"><li>x</li><li>y</li></ol>"#), @r"
    a. x
    b. y
    ");
    assert_snapshot!(render(r#"<ol type="I" start="3"><li>x</li><li>y</li></ol>"#), @r"
    III. x
     IV. y
    ");
}

#[test]
fn test_item_value_resets_counter() {
    assert_snapshot!(render(r#"<ol><li>a</li><li value="10">b</li><li>c</li></ol>"#), @r"
     1. a
    10. b
    11. c
    ");
}

#[test]
fn test_item_with_paragraphs() {
    assert_eq!(render("<ul><li><p>a</p><p>b</p></li></ul>"), "• a\n\n  b");
}

#[test]
fn test_stray_list_items() {
    assert_snapshot!(render("<li>a</li><li>b</li>"), @r"
    • a
    • b
    ");
}

#[test]
fn test_code_block_is_verbatim() {
    assert_snapshot!(render("<pre>let x = *y*;\n  _z_ ~w~</pre>"), @r"
    ```
    let x = *y*;
      _z_ ~w~
    ```
    ");
}

#[test]
fn test_code_block_keeps_links_and_encodes_entities() {
    assert_snapshot!(
        render(r#"<pre>see <a href="https://x.test">docs</a> &amp; <b>more</b></pre>"#),
        @r"
    ```
    see <https://x.test|docs> &amp; more
    ```
    "
    );
}

#[test]
fn test_code_block_in_list_item() {
    assert_snapshot!(render("<ul><li>run<pre>make\nmake test</pre></li></ul>"), @r"
    • run
      ```
      make
      make test
      ```
    ");
}

#[test]
fn test_code_block_in_blockquote() {
    assert_snapshot!(render("<blockquote><pre>a\nb</pre></blockquote>"), @r"
    > ```
    > a
    > b
    > ```
    ");
}

#[test]
fn test_code_block_between_paragraphs() {
    assert_snapshot!(render("<p>before</p><pre>x</pre><p>after</p>"), @r"
    before
    ```
    x
    ```
    after
    ");
}

#[test]
fn test_empty_code_block() {
    assert_snapshot!(render("<pre></pre>"), @r"
    ```
    ```
    ");
}

#[test]
fn test_source_indentation_is_ignored() {
    let source = "<ul>\n  <li>One</li>\n  <li>Two</li>\n</ul>\n<p>\n  Done.\n</p>";
    assert_snapshot!(render(source), @r"
    • One
    • Two

    Done.
    ");
}

#[test]
fn test_list_after_text_in_paragraph() {
    assert_snapshot!(render("<p>Steps:<ul><li>one</li></ul></p>"), @r"
    Steps:

    • one
    ");
}

#[test]
fn test_formatting_spanning_paragraphs() {
    assert_snapshot!(render("<b><p>x</p><p>y</p></b>"), @r"
    *x*

    *y*
    ");
}

#[test]
fn test_closing_line_break_adds_nothing() {
    assert_snapshot!(render("<b>a<br></b>"), @"*a*");
    assert_snapshot!(render("<p>a<br></p><p>b</p>"), @r"
    a

    b
    ");
}
