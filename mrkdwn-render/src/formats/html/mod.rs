//! HTML-like markup input
//!
//! Messages are authored in a small, closed subset of HTML and parsed into
//! [`MarkupNode`](crate::markup::MarkupNode) trees.
//!
//! # Library Choice
//!
//! We use `html5ever` + `markup5ever_rcdom` for parsing:
//! - Browser-grade tokenizer: named and numeric entity references are decoded in text and
//!   attribute values, tag names are case-insensitive, unclosed tags are recovered
//! - The `RcDom` tree is easy to walk and is discarded right after conversion
//!
//! # Element Mapping Table
//!
//! | Markup                    | Block tree                                  | Notes                               |
//! |---------------------------|---------------------------------------------|-------------------------------------|
//! | `p`                       | Paragraph                                   | Nested `p` flattens                 |
//! | `blockquote`              | Blockquote                                  | Content is block-structured         |
//! | `ul` / `ol`               | List                                        | `ol` reads `start` and `type`       |
//! | `li`                      | ListItem                                    | `value` restarts numbering          |
//! | `pre`                     | CodeBlock                                   | Only links, times and breaks inside |
//! | `b`, `strong`             | Strong                                      |                                     |
//! | `i`, `em`                 | Emphasis                                    |                                     |
//! | `s`, `strike`, `del`      | Strikethrough                               |                                     |
//! | `code`                    | InlineCode                                  | Formatting inside is ignored        |
//! | `a`                       | Link                                        | Plain text without `href`           |
//! | `time`                    | Time                                        | Text content is the format string   |
//! | `br`                      | LineBreak                                   |                                     |
//! | `span`, `small`           | (transparent)                               |                                     |
//!
//! Anything else fails with [`RenderError::UnsupportedMarkup`](crate::error::RenderError).
//!
//! # Lossy Conversions
//!
//! - Comments, doctypes and processing instructions are dropped
//! - The HTML tree builder repairs misnested markup the way a browser does (a `p` is closed by
//!   a following `ul`, a leading newline inside `pre` is dropped)

mod parser;

pub use parser::parse_markup;
