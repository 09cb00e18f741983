//! Core data structures for the block tree.

use serde::Serialize;

/// The root of a rendered message.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Document {
    pub children: Vec<BlockNode>,
}

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockNode {
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    List(List),
    CodeBlock(CodeBlock),
}

impl BlockNode {
    pub fn is_code_block(&self) -> bool {
        matches!(self, BlockNode::CodeBlock(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockNode::List(_))
    }
}

/// A paragraph: one run of inline content.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Paragraph {
    pub content: Vec<InlineNode>,
}

/// A quoted section, itself made of blocks.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Blockquote {
    pub children: Vec<BlockNode>,
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub start: i64,
    pub style: NumberingStyle,
    pub items: Vec<ListItem>,
}

/// A list entry; `value` restarts numbering from this item on.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ListItem {
    pub value: Option<i64>,
    pub children: Vec<BlockNode>,
}

/// Preformatted content. Only text, links, time tokens and line breaks survive
/// inside it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CodeBlock {
    pub content: Vec<InlineNode>,
}

/// Marker style of an ordered list, as given by the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingStyle {
    #[default]
    Decimal,
    LowerAlpha,
    UpperAlpha,
    LowerRoman,
    UpperRoman,
}

impl NumberingStyle {
    /// Map an HTML `type` attribute value. Unknown values fall back to decimal.
    pub fn from_type_attr(value: &str) -> Self {
        match value.trim() {
            "a" => NumberingStyle::LowerAlpha,
            "A" => NumberingStyle::UpperAlpha,
            "i" => NumberingStyle::LowerRoman,
            "I" => NumberingStyle::UpperRoman,
            _ => NumberingStyle::Decimal,
        }
    }
}

/// Inline content of paragraphs and code blocks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum InlineNode {
    Text(String),
    Emphasis(Vec<InlineNode>),
    Strong(Vec<InlineNode>),
    Strikethrough(Vec<InlineNode>),
    InlineCode(Vec<InlineNode>),
    Link(Link),
    Time(Time),
    LineBreak,
}

/// A hyperlink (or a special mention, depending on the URL shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    pub children: Vec<InlineNode>,
}

/// A localized timestamp token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Time {
    /// The raw `datetime` attribute: epoch seconds or an RFC 3339 timestamp.
    pub datetime: String,
    /// Slack date format string, e.g. `{date_short} at {time}`.
    pub format: String,
    pub fallback: Option<String>,
}

impl Time {
    /// Resolve `datetime` to epoch seconds, or `None` when it is malformed or out of range.
    pub fn epoch_seconds(&self) -> Option<i64> {
        let raw = self.datetime.trim();
        let seconds = if let Ok(seconds) = raw.parse::<i64>() {
            seconds
        } else if let Ok(seconds) = raw.parse::<f64>() {
            if !seconds.is_finite() {
                return None;
            }
            seconds.floor() as i64
        } else {
            chrono::DateTime::parse_from_rfc3339(raw).ok()?.timestamp()
        };
        chrono::DateTime::<chrono::Utc>::from_timestamp(seconds, 0).map(|_| seconds)
    }
}
