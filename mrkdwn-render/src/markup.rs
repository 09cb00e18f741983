//! The input markup tree.
//!
//! Callers either build these nodes directly (a templating layer assembling a
//! message) or obtain them from [`crate::formats::html::parse_markup`]. The
//! tag vocabulary is closed: anything outside [`Tag`] is rejected with
//! [`RenderError::UnsupportedMarkup`].

use crate::error::RenderError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The supported tags.
///
/// Synonyms (`b`/`strong`, `i`/`em`, `s`/`strike`/`del`) are kept distinct so
/// an inspected tree reads like its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    B,
    Strong,
    I,
    Em,
    S,
    Strike,
    Del,
    Code,
    Pre,
    P,
    Blockquote,
    Ul,
    Ol,
    Li,
    A,
    Time,
    Span,
    Small,
    Br,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::B => "b",
            Tag::Strong => "strong",
            Tag::I => "i",
            Tag::Em => "em",
            Tag::S => "s",
            Tag::Strike => "strike",
            Tag::Del => "del",
            Tag::Code => "code",
            Tag::Pre => "pre",
            Tag::P => "p",
            Tag::Blockquote => "blockquote",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::A => "a",
            Tag::Time => "time",
            Tag::Span => "span",
            Tag::Small => "small",
            Tag::Br => "br",
        }
    }

    /// Tags that start a block of their own.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Tag::P | Tag::Pre | Tag::Blockquote | Tag::Ul | Tag::Ol | Tag::Li
        )
    }

    pub fn is_list(self) -> bool {
        matches!(self, Tag::Ul | Tag::Ol)
    }
}

impl FromStr for Tag {
    type Err = RenderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "b" => Tag::B,
            "strong" => Tag::Strong,
            "i" => Tag::I,
            "em" => Tag::Em,
            "s" => Tag::S,
            "strike" => Tag::Strike,
            "del" => Tag::Del,
            "code" => Tag::Code,
            "pre" => Tag::Pre,
            "p" => Tag::P,
            "blockquote" => Tag::Blockquote,
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "a" => Tag::A,
            "time" => Tag::Time,
            "span" => Tag::Span,
            "small" => Tag::Small,
            "br" => Tag::Br,
            _ => return Err(RenderError::UnsupportedMarkup(name.to_string())),
        };
        Ok(tag)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the input tree: text or an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MarkupNode {
    Text { value: String },
    Element(Element),
}

impl MarkupNode {
    pub fn text(value: impl Into<String>) -> Self {
        MarkupNode::Text {
            value: value.into(),
        }
    }

    /// Concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text { value } => out.push_str(value),
            MarkupNode::Element(element) => {
                if element.tag == Tag::Br {
                    out.push('\n');
                }
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<&str> for MarkupNode {
    fn from(value: &str) -> Self {
        MarkupNode::text(value)
    }
}

impl From<String> for MarkupNode {
    fn from(value: String) -> Self {
        MarkupNode::text(value)
    }
}

impl From<Element> for MarkupNode {
    fn from(element: Element) -> Self {
        MarkupNode::Element(element)
    }
}

/// An element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub tag: Tag,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<MarkupNode>,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Build an element from a tag name, rejecting names outside the vocabulary.
    pub fn named(name: &str) -> Result<Self, RenderError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<MarkupNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<MarkupNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
