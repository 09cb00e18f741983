use crate::common::{options, render};
use insta::assert_snapshot;
use mrkdwn_render::common::links::SpecialLinkRules;
use mrkdwn_render::render_with_options;

#[test]
fn test_link_text_uses_lookalikes() {
    assert_snapshot!(
        render(r#"<a href="https://example.com/a_b_c"><i>_link_</i></a>"#),
        @"<https://example.com/a_b_c|_ˍlinkˍ_>"
    );
}

#[test]
fn test_link_with_text() {
    let out = render(r#"<a href="https://slack.com">Slack</a>"#);
    assert_snapshot!(out, @"<https://slack.com|Slack>");
}

#[test]
fn test_link_text_equal_to_url_is_compact() {
    let out = render(r#"<a href="https://slack.com">https://slack.com</a>"#);
    assert_snapshot!(out, @"<https://slack.com>");
    assert_snapshot!(render(r#"<a href="https://slack.com">&nbsp;</a>"#), @"<https://slack.com>");
}

#[test]
fn test_link_url_escaping() {
    assert_snapshot!(
        render(r#"<a href="https://x.test/?a=1&amp;b=2|3">q&amp;a</a>"#),
        @"<https://x.test/?a=1&amp;b=2%7C3|q&amp;a>"
    );
}

#[test]
fn test_formatting_around_link() {
    assert_snapshot!(render(r#"<b><a href="https://x.test">x</a></b>"#), @"*<https://x.test|x>*");
    assert_snapshot!(
        render(r#"<code><a href="https://x.test">a_b</a></code>"#),
        @"`<https://x.test|a_b>`"
    );
}

#[test]
fn test_link_across_line_break() {
    assert_snapshot!(render(r#"<a href="https://x.test">one<br>two</a>"#), @r"
    <https://x.test|one>
    <https://x.test|two>
    ");
}

#[test]
fn test_link_without_href() {
    assert_snapshot!(render("<a>no href</a> <a href=\" \">blank</a>"), @"no href blank");
}

#[test]
fn test_nested_anchor_is_split_by_parser() {
    assert_snapshot!(
        render(r#"<a href="https://outer.test">a <a href="https://inner.test">b</a></a>"#),
        @"<https://outer.test|a> <https://inner.test|b>"
    );
}

#[test]
fn test_mentions() {
    assert_snapshot!(render(r##"<a href="#C0123ABCD">general</a>"##), @"<#C0123ABCD>");
    assert_snapshot!(render(r#"<a href="@U0123ABCD">bob</a>"#), @"<@U0123ABCD>");
    assert_snapshot!(render(r#"<a href="@W0123ABCD">bob</a>"#), @"<@W0123ABCD>");
    assert_snapshot!(render(r#"<a href="@S0123ABCD">team</a>"#), @"<!subteam^S0123ABCD>");
    assert_snapshot!(render(r#"<a href="@here">everyone here</a>"#), @"<!here|here>");
    assert_snapshot!(render(r#"<a href="@channel">x</a>"#), @"<!channel|channel>");
    assert_snapshot!(render(r#"<a href="@everyone">x</a>"#), @"<!everyone|everyone>");
}

#[test]
fn test_short_ids_are_plain_links() {
    assert_snapshot!(render(r##"<a href="#C12">x</a>"##), @"<#C12|x>");

    let mut relaxed = options();
    relaxed.links = SpecialLinkRules { min_id_length: 3 };
    assert_eq!(
        render_with_options(r##"<a href="#C12">x</a>"##, &relaxed).unwrap(),
        "<#C12>"
    );
}

#[test]
fn test_mention_inside_formatting() {
    assert_snapshot!(render(r#"hi <b><a href="@U0123ABCD">bob</a></b>"#), @"hi *<@U0123ABCD>*");
}
