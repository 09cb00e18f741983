//! Converts a flat event stream into the nested block tree.
//!
//! # The High-Level Concept
//!
//! The walker over the markup emits a linear sequence of events. The algorithm uses a stack to
//! keep track of the current nesting level: a `Start` event pushes a new open container, the
//! matching `End` event pops it and attaches it to its parent, which is the new top of the stack.
//!
//! # Implicit Containers
//!
//! Markup is loose about block structure, so the converter repairs it instead of rejecting it:
//!
//! - Inline content arriving outside a paragraph opens an *implicit* paragraph.
//! - Any block start closes the paragraph that is currently open, implicit or not. A later
//!   `EndParagraph` for a paragraph that was closed this way is a no-op.
//! - Inline content or a non-item block arriving directly inside a list opens an implicit item.
//! - A list item arriving outside a list opens an implicit unordered list; consecutive stray
//!   items share it.
//!
//! Implicit containers are closed by whatever event cannot live inside them, and at the latest by
//! the `End` event of the enclosing explicit container.
//!
//! Example event stream for `<p>a<ul><li>b</li></ul>c</p>`:
//! ```text
//! StartDocument
//! StartParagraph        <- Opens paragraph
//! Inline(a)
//! StartList             <- Auto-closes the paragraph
//! StartListItem
//! Inline(b)             <- Opens implicit paragraph inside the item
//! EndListItem           <- Closes implicit paragraph, then the item
//! EndList
//! Inline(c)             <- Opens implicit paragraph
//! EndParagraph          <- Closes it
//! EndDocument
//! ```
//!
//! # Inline Nesting
//!
//! Each inline event carries its full mark stack. When a paragraph or code block is closed, its
//! leaves are regrouped into [`InlineNode`] trees: consecutive leaves sharing the same outermost
//! mark become one wrapper node, recursively.

use crate::ir::events::{Event, Leaf, Mark};
use crate::ir::nodes::*;
use log::debug;

/// Error type for flat-to-nested conversion
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Stack was empty when trying to pop
    UnexpectedEnd(String),
    /// Mismatched start/end events
    MismatchedEvents { expected: String, found: String },
    /// Events remaining after document end
    ExtraEvents,
    /// Stack not empty at end (unclosed containers)
    UnclosedContainers(usize),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::UnexpectedEnd(msg) => write!(f, "Unexpected end event: {msg}"),
            ConversionError::MismatchedEvents { expected, found } => {
                write!(f, "Mismatched events: expected {expected}, found {found}")
            }
            ConversionError::ExtraEvents => write!(f, "Extra events after document end"),
            ConversionError::UnclosedContainers(count) => {
                write!(f, "Unclosed containers: {count} nodes remain on stack")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

type Leaves = Vec<(Vec<Mark>, Leaf)>;

/// Represents a node being built on the stack
#[derive(Debug)]
enum StackNode {
    Document(Document),
    Paragraph {
        leaves: Leaves,
        implicit: bool,
    },
    Blockquote {
        children: Vec<BlockNode>,
    },
    List {
        ordered: bool,
        start: i64,
        style: NumberingStyle,
        items: Vec<ListItem>,
        implicit: bool,
    },
    ListItem {
        value: Option<i64>,
        children: Vec<BlockNode>,
        implicit: bool,
    },
    CodeBlock {
        leaves: Leaves,
    },
}

/// What a popped container turns into.
enum Built {
    Block(BlockNode),
    Item(ListItem),
    /// Paragraphs without content vanish.
    Nothing,
}

impl StackNode {
    /// Convert into its finished form (used when popping from stack)
    fn into_built(self) -> Result<Built, ConversionError> {
        let built = match self {
            StackNode::Document(_) => {
                return Err(ConversionError::UnexpectedEnd(
                    "Document cannot be closed by a block end".to_string(),
                ))
            }
            StackNode::Paragraph { leaves, .. } => {
                if leaves.is_empty() {
                    Built::Nothing
                } else {
                    Built::Block(BlockNode::Paragraph(Paragraph {
                        content: nest_inline(leaves),
                    }))
                }
            }
            StackNode::Blockquote { children } => {
                Built::Block(BlockNode::Blockquote(Blockquote { children }))
            }
            StackNode::List {
                ordered,
                start,
                style,
                items,
                ..
            } => Built::Block(BlockNode::List(List {
                ordered,
                start,
                style,
                items,
            })),
            StackNode::ListItem {
                value, children, ..
            } => Built::Item(ListItem { value, children }),
            StackNode::CodeBlock { leaves } => Built::Block(BlockNode::CodeBlock(CodeBlock {
                content: nest_inline(leaves),
            })),
        };
        Ok(built)
    }

    /// Get the node type name for error messages
    fn type_name(&self) -> &str {
        match self {
            StackNode::Document(_) => "Document",
            StackNode::Paragraph { .. } => "Paragraph",
            StackNode::Blockquote { .. } => "Blockquote",
            StackNode::List { .. } => "List",
            StackNode::ListItem { .. } => "ListItem",
            StackNode::CodeBlock { .. } => "CodeBlock",
        }
    }

    fn is_implicit(&self) -> bool {
        match self {
            StackNode::Paragraph { implicit, .. }
            | StackNode::List { implicit, .. }
            | StackNode::ListItem { implicit, .. } => *implicit,
            _ => false,
        }
    }

    /// Add a finished child to this container
    fn add_child(&mut self, child: Built) -> Result<(), ConversionError> {
        match (self, child) {
            (_, Built::Nothing) => Ok(()),
            (StackNode::Document(doc), Built::Block(block)) => {
                doc.children.push(block);
                Ok(())
            }
            (StackNode::Blockquote { children }, Built::Block(block))
            | (StackNode::ListItem { children, .. }, Built::Block(block)) => {
                children.push(block);
                Ok(())
            }
            (StackNode::List { items, .. }, Built::Item(item)) => {
                items.push(item);
                Ok(())
            }
            (parent, Built::Item(_)) => Err(ConversionError::MismatchedEvents {
                expected: "List".to_string(),
                found: parent.type_name().to_string(),
            }),
            (parent, Built::Block(block)) => Err(ConversionError::MismatchedEvents {
                expected: "block container".to_string(),
                found: format!("{block:?} inside {}", parent.type_name()),
            }),
        }
    }

    /// Add an inline leaf to this node
    fn add_inline(&mut self, marks: &[Mark], leaf: &Leaf) -> Result<(), ConversionError> {
        match self {
            StackNode::Paragraph { leaves, .. } | StackNode::CodeBlock { leaves } => {
                leaves.push((marks.to_vec(), leaf.clone()));
                Ok(())
            }
            other => Err(ConversionError::MismatchedEvents {
                expected: "Paragraph or CodeBlock".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }
}

/// Tracks explicit paragraphs that were closed before their `EndParagraph` arrived.
#[derive(Default)]
struct Builder {
    stack: Vec<StackNode>,
    orphaned_paragraph_ends: usize,
}

impl Builder {
    fn top(&self) -> Option<&StackNode> {
        self.stack.last()
    }

    fn finalize_container<F>(
        &mut self,
        event_name: &str,
        parent_label: &str,
        validate: F,
    ) -> Result<(), ConversionError>
    where
        F: FnOnce(StackNode) -> Result<StackNode, ConversionError>,
    {
        let node = self.stack.pop().ok_or_else(|| {
            ConversionError::UnexpectedEnd(format!("{event_name} with empty stack"))
        })?;

        let node = validate(node)?;

        let built = node.into_built()?;
        let parent = self.stack.last_mut().ok_or_else(|| {
            ConversionError::UnexpectedEnd(format!("No parent for {parent_label}"))
        })?;
        parent.add_child(built)?;

        Ok(())
    }

    /// Close whatever sits on top of the stack, whatever its kind.
    fn close_top(&mut self, event_name: &str) -> Result<(), ConversionError> {
        self.finalize_container(event_name, "auto-closed container", Ok)
    }

    /// Close an open paragraph before a block starts.
    fn auto_close_paragraph(&mut self) -> Result<(), ConversionError> {
        if let Some(StackNode::Paragraph { implicit, .. }) = self.top() {
            if !*implicit {
                self.orphaned_paragraph_ends += 1;
            }
            self.close_top("auto-close paragraph")?;
        }
        Ok(())
    }

    /// Close an implicit list left open by stray list items.
    fn auto_close_implicit_list(&mut self) -> Result<(), ConversionError> {
        if let Some(StackNode::List { implicit: true, .. }) = self.top() {
            self.close_top("auto-close implicit list")?;
        }
        Ok(())
    }

    /// Close every implicit container (and any open paragraph) on top of the stack.
    fn auto_close_implicit(&mut self) -> Result<(), ConversionError> {
        loop {
            match self.top() {
                Some(StackNode::Paragraph { .. }) => self.auto_close_paragraph()?,
                Some(node) if node.is_implicit() => self.close_top("auto-close implicit")?,
                _ => return Ok(()),
            }
        }
    }

    /// Prepare the stack for a block that is not a list item.
    fn enter_block(&mut self) -> Result<(), ConversionError> {
        self.auto_close_paragraph()?;
        self.auto_close_implicit_list()?;
        self.open_implicit_item_in_list();
        Ok(())
    }

    fn open_implicit_item_in_list(&mut self) {
        if let Some(StackNode::List { .. }) = self.top() {
            debug!("content directly inside a list; opening an implied item");
            self.stack.push(StackNode::ListItem {
                value: None,
                children: vec![],
                implicit: true,
            });
        }
    }

    fn inline(&mut self, marks: &[Mark], leaf: &Leaf) -> Result<(), ConversionError> {
        if !matches!(
            self.top(),
            Some(StackNode::Paragraph { .. } | StackNode::CodeBlock { .. })
        ) {
            self.auto_close_implicit_list()?;
            self.open_implicit_item_in_list();
            self.stack.push(StackNode::Paragraph {
                leaves: vec![],
                implicit: true,
            });
        }
        match self.stack.last_mut() {
            Some(node) => node.add_inline(marks, leaf),
            None => Err(ConversionError::UnexpectedEnd(
                "inline content with empty stack".to_string(),
            )),
        }
    }

    fn end_paragraph(&mut self) -> Result<(), ConversionError> {
        match self.top() {
            Some(StackNode::Paragraph { implicit, .. }) => {
                if *implicit {
                    self.orphaned_paragraph_ends = self.orphaned_paragraph_ends.saturating_sub(1);
                }
                self.close_top("EndParagraph")
            }
            _ if self.orphaned_paragraph_ends > 0 => {
                self.orphaned_paragraph_ends -= 1;
                Ok(())
            }
            other => Err(ConversionError::MismatchedEvents {
                expected: "Paragraph".to_string(),
                found: other.map_or("nothing", StackNode::type_name).to_string(),
            }),
        }
    }

    /// Close the explicit container `expected` after dropping implicit ones above it.
    fn end_container(&mut self, event_name: &str, expected: &str) -> Result<(), ConversionError> {
        self.auto_close_implicit()?;
        self.finalize_container(event_name, expected, |node| {
            if node.type_name() == expected {
                Ok(node)
            } else {
                Err(ConversionError::MismatchedEvents {
                    expected: expected.to_string(),
                    found: node.type_name().to_string(),
                })
            }
        })
    }
}

/// Regroup flat `(marks, leaf)` pairs into nested inline nodes.
///
/// Consecutive leaves whose outermost mark is equal share one wrapper node. Adjacent text
/// leaves are merged.
pub fn nest_inline(leaves: Leaves) -> Vec<InlineNode> {
    let mut out: Vec<InlineNode> = Vec::new();
    let mut iter = leaves.into_iter().peekable();

    while let Some((mut marks, leaf)) = iter.next() {
        if marks.is_empty() {
            push_leaf(&mut out, leaf);
            continue;
        }

        let outer = marks.remove(0);
        let mut group = vec![(marks, leaf)];
        while let Some((next_marks, _)) = iter.peek() {
            if next_marks.first() != Some(&outer) {
                break;
            }
            if let Some((mut next_marks, next_leaf)) = iter.next() {
                next_marks.remove(0);
                group.push((next_marks, next_leaf));
            }
        }

        let children = nest_inline(group);
        out.push(match outer {
            Mark::Emphasis => InlineNode::Emphasis(children),
            Mark::Strong => InlineNode::Strong(children),
            Mark::Strike => InlineNode::Strikethrough(children),
            Mark::Code => InlineNode::InlineCode(children),
            Mark::Link(url) => InlineNode::Link(Link { url, children }),
        });
    }

    out
}

fn push_leaf(out: &mut Vec<InlineNode>, leaf: Leaf) {
    match leaf {
        Leaf::Text(text) => {
            if let Some(InlineNode::Text(previous)) = out.last_mut() {
                previous.push_str(&text);
            } else {
                out.push(InlineNode::Text(text));
            }
        }
        Leaf::Time(time) => out.push(InlineNode::Time(time)),
        Leaf::LineBreak => out.push(InlineNode::LineBreak),
    }
}

/// Converts a flat event stream into a nested block tree.
///
/// # Arguments
///
/// * `events` - The flat sequence of events to process
///
/// # Returns
///
/// * `Ok(Document)` - The reconstructed document tree
/// * `Err(ConversionError)` - If the event stream is malformed
///
/// # Example
///
/// ```ignore
/// use mrkdwn_render::ir::events::Event;
/// use mrkdwn_render::common::flat_to_nested::events_to_tree;
///
/// let events = vec![
///     Event::StartDocument,
///     Event::text("Hello"),
///     Event::EndDocument,
/// ];
///
/// let doc = events_to_tree(&events)?;
/// assert_eq!(doc.children.len(), 1);
/// ```
pub fn events_to_tree(events: &[Event]) -> Result<Document, ConversionError> {
    let mut event_iter = events.iter().peekable();
    let mut builder = Builder::default();

    // Expect StartDocument as first event
    match event_iter.next() {
        Some(Event::StartDocument) => {
            builder.stack.push(StackNode::Document(Document::default()));
        }
        Some(other) => {
            return Err(ConversionError::MismatchedEvents {
                expected: "StartDocument".to_string(),
                found: format!("{other:?}"),
            });
        }
        None => return Ok(Document::default()),
    }

    while let Some(event) = event_iter.next() {
        match event {
            Event::StartDocument => {
                return Err(ConversionError::MismatchedEvents {
                    expected: "content or EndDocument".to_string(),
                    found: "StartDocument".to_string(),
                });
            }

            Event::EndDocument => {
                builder.auto_close_implicit()?;
                if builder.stack.len() != 1 {
                    return Err(ConversionError::UnclosedContainers(builder.stack.len() - 1));
                }
                return match builder.stack.pop() {
                    Some(StackNode::Document(doc)) => {
                        if event_iter.peek().is_some() {
                            return Err(ConversionError::ExtraEvents);
                        }
                        Ok(doc)
                    }
                    other => Err(ConversionError::MismatchedEvents {
                        expected: "Document".to_string(),
                        found: other
                            .as_ref()
                            .map_or("nothing", StackNode::type_name)
                            .to_string(),
                    }),
                };
            }

            Event::StartParagraph => {
                builder.enter_block()?;
                builder.stack.push(StackNode::Paragraph {
                    leaves: vec![],
                    implicit: false,
                });
            }

            Event::EndParagraph => builder.end_paragraph()?,

            Event::StartBlockquote => {
                builder.enter_block()?;
                builder.stack.push(StackNode::Blockquote { children: vec![] });
            }

            Event::EndBlockquote => builder.end_container("EndBlockquote", "Blockquote")?,

            Event::StartList {
                ordered,
                start,
                style,
            } => {
                builder.enter_block()?;
                builder.stack.push(StackNode::List {
                    ordered: *ordered,
                    start: *start,
                    style: *style,
                    items: vec![],
                    implicit: false,
                });
            }

            Event::EndList => builder.end_container("EndList", "List")?,

            Event::StartListItem { value } => {
                builder.auto_close_paragraph()?;
                if let Some(StackNode::ListItem { implicit: true, .. }) = builder.top() {
                    builder.close_top("auto-close implied item")?;
                }
                if !matches!(builder.top(), Some(StackNode::List { .. })) {
                    debug!("list item outside a list; opening an implied unordered list");
                    builder.stack.push(StackNode::List {
                        ordered: false,
                        start: 1,
                        style: NumberingStyle::Decimal,
                        items: vec![],
                        implicit: true,
                    });
                }
                builder.stack.push(StackNode::ListItem {
                    value: *value,
                    children: vec![],
                    implicit: false,
                });
            }

            Event::EndListItem => builder.end_container("EndListItem", "ListItem")?,

            Event::StartCodeBlock => {
                builder.enter_block()?;
                builder.stack.push(StackNode::CodeBlock { leaves: vec![] });
            }

            Event::EndCodeBlock => builder.end_container("EndCodeBlock", "CodeBlock")?,

            Event::Inline { marks, leaf } => builder.inline(marks, leaf)?,
        }
    }

    // Ran out of events without EndDocument
    Err(ConversionError::UnclosedContainers(builder.stack.len()))
}
