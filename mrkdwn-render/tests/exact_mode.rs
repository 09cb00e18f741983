//! The process-wide exact-mode flag.
//!
//! Lives in its own test binary: flipping the flag would race with every other test that
//! relies on the default options.

use mrkdwn_render::{is_exact_mode, render, render_with_options, set_exact_mode, RenderOptions};

const ZWSP: char = '\u{200B}';

#[test]
fn test_global_flag_seeds_default_options() {
    assert!(!is_exact_mode());
    assert_eq!(render("<b>x</b>").unwrap(), "*x*");

    set_exact_mode(true);
    assert!(is_exact_mode());
    assert!(RenderOptions::default().exact_mode);
    assert_eq!(
        render("in<b>side</b>word").unwrap(),
        format!("in{ZWSP}*{ZWSP}side{ZWSP}*{ZWSP}word")
    );
    assert_eq!(
        render("<pre>*code*</pre>").unwrap(),
        "```\n*code*\n```",
        "code fences and contents are never bracketed"
    );

    let explicit = RenderOptions::default().with_exact_mode(false);
    assert_eq!(render_with_options("<b>x</b>", &explicit).unwrap(), "*x*");

    set_exact_mode(false);
    assert!(!RenderOptions::default().exact_mode);
    assert_eq!(render("<i>x</i>").unwrap(), "_x_");
}
