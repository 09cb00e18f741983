//! Slack mrkdwn output
//!
//! # Element Mapping Table
//!
//! | Block tree       | mrkdwn                                   | Notes                                        |
//! |------------------|------------------------------------------|----------------------------------------------|
//! | Paragraph        | text lines                               | Blank line between sibling blocks            |
//! | Blockquote       | every line prefixed with `> `            | Blank lines inside become `> `               |
//! | List             | `1.` / `a.` / `i.` / `•` markers         | Markers right-aligned, continuation indented |
//! | CodeBlock        | ```` ``` ```` fences on their own lines  | Contents verbatim except `&` `<` `>`         |
//! | Emphasis         | `_text_`                                 |                                              |
//! | Strong           | `*text*`                                 |                                              |
//! | Strikethrough    | `~text~`                                 |                                              |
//! | InlineCode       | `` `text` ``                             | Backticks inside become `ˋ`                  |
//! | Link             | `<url\|text>` or `<url>`                 | Mentions for `#C…`, `@U…`, `@S…`, `@here`…   |
//! | Time             | `<!date^epoch^format\|fallback>`         | `^url` added inside a link                   |
//! | LineBreak        | newline                                  | Formatting is re-opened on the next line     |
//!
//! # Exact Mode
//!
//! Slack only honors `*`, `_` and `~` at word boundaries. In exact mode every formatting
//! delimiter is bracketed with zero-width spaces so formatting applies inside words too.
//! Code fences are not delimiters in this sense and are never bracketed.

pub mod date;
pub mod escape;
pub mod numbering;
mod serializer;
pub mod vault;

pub use date::format_date;
pub use serializer::serialize_to_mrkdwn;
