use crate::common::{options, render};
use insta::assert_snapshot;
use mrkdwn_render::render_with_options;

#[test]
fn test_time_token_with_relative_fallback() {
    assert_snapshot!(
        render(r#"<time datetime="1392734382">{date_short_pretty} at {time}</time>"#),
        @"<!date^1392734382^{date_short_pretty} at {time}|Today at 2:39 PM>"
    );
}

#[test]
fn test_empty_time_uses_default_format() {
    assert_snapshot!(
        render(r#"<time datetime="1392734382"></time>"#),
        @"<!date^1392734382^{date_short_pretty} at {time}|Today at 2:39 PM>"
    );

    let mut custom = options();
    custom.default_time_format = "{date_num}".to_string();
    assert_eq!(
        render_with_options(r#"<time datetime="1392734382"> </time>"#, &custom).unwrap(),
        "<!date^1392734382^{date_num}|2014-02-18>"
    );
}

#[test]
fn test_explicit_fallback_and_pipes() {
    assert_snapshot!(
        render(r#"<time datetime="1392734382" fallback="Feb 18 | 6:39 AM PST">{date_num}</time>"#),
        @"<!date^1392734382^{date_num}|Feb 18 ǀ 6:39 AM PST>"
    );
    assert_snapshot!(
        render(r#"<time datetime="1392734382">{date_num} | {time}</time>"#),
        @"<!date^1392734382^{date_num} ǀ {time}|2014-02-18 ǀ 2:39 PM>"
    );
}

#[test]
fn test_rfc3339_datetime() {
    assert_snapshot!(
        render(r#"Due <time datetime="2014-02-18T14:39:42Z">{date_num}</time>."#),
        @"Due <!date^1392734382^{date_num}|2014-02-18>."
    );
}

#[test]
fn test_time_inside_link_carries_url() {
    assert_snapshot!(
        render(r#"<a href="https://x.test"><time datetime="1392734382">{date}</time></a>"#),
        @"<!date^1392734382^{date}^https://x.test|February 18th, 2014>"
    );
}

#[test]
fn test_time_inside_formatting() {
    assert_snapshot!(
        render(r#"<b><time datetime="1392734382">{date_num}</time></b>"#),
        @"*<!date^1392734382^{date_num}|2014-02-18>*"
    );
}

#[test]
fn test_formatted_time_inside_link_text() {
    let out = render(
        r#"<a href="https://x.test">Due <b><time datetime="1392734382">{date_num}</time></b> now</a>"#,
    );
    assert_snapshot!(
        out,
        @"<https://x.test|Due> *<!date^1392734382^{date_num}^https://x.test|2014-02-18>* <https://x.test|now>"
    );
}

#[test]
fn test_malformed_datetime_is_text() {
    assert_snapshot!(render(r#"<time datetime="soon">{date}</time>"#), @"soon");
}

#[test]
fn test_time_without_datetime_is_text() {
    assert_snapshot!(render("<time>{date}</time>"), @"{date}");
}

#[test]
fn test_yesterday_relative_to_now() {
    let mut later = options();
    later.now = Some(crate::common::now() + chrono::Duration::days(1));
    assert_eq!(
        render_with_options(r#"<time datetime="1392734382">at {time} {date_pretty}</time>"#, &later)
            .unwrap(),
        "<!date^1392734382^at {time} {date_pretty}|at 2:39 PM yesterday>"
    );
}
