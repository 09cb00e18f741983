//! Defines the flat event stream representation of a message.

use crate::ir::nodes::{NumberingStyle, Time};
use serde::Serialize;

/// Represents a single event in the message stream.
///
/// Block containers come as `Start`/`End` pairs. Inline content is flattened:
/// every leaf carries the full stack of marks that were active around it, so
/// the stream can be produced by a plain recursive walk and regrouped later.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    StartDocument,
    EndDocument,
    StartParagraph,
    EndParagraph,
    StartBlockquote,
    EndBlockquote,
    StartList {
        ordered: bool,
        start: i64,
        style: NumberingStyle,
    },
    EndList,
    StartListItem {
        value: Option<i64>,
    },
    EndListItem,
    StartCodeBlock,
    EndCodeBlock,
    Inline {
        marks: Vec<Mark>,
        leaf: Leaf,
    },
}

impl Event {
    /// Shorthand for an unformatted text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Event::Inline {
            marks: vec![],
            leaf: Leaf::Text(value.into()),
        }
    }

    /// Whether this event opens a block container.
    pub fn is_block_start(&self) -> bool {
        matches!(
            self,
            Event::StartParagraph
                | Event::StartBlockquote
                | Event::StartList { .. }
                | Event::StartListItem { .. }
                | Event::StartCodeBlock
        )
    }
}

/// An inline formatting mark, outermost first in [`Event::Inline::marks`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mark", content = "url", rename_all = "snake_case")]
pub enum Mark {
    Emphasis,
    Strong,
    Strike,
    Code,
    Link(String),
}

/// The content carried by an inline event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "leaf", content = "value", rename_all = "snake_case")]
pub enum Leaf {
    Text(String),
    Time(Time),
    LineBreak,
}
