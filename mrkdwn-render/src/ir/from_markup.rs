//! Flattens a markup tree into the event stream.
//!
//! The walk is a single depth-first pass. Block tags become `Start`/`End` pairs, formatting tags
//! push a [`Mark`] for the duration of their children, and every text, time or line-break leaf
//! is emitted with the marks active around it. Formatting that encloses a block therefore
//! carries into the block's content: `<b><p>x</p></b>` yields a paragraph whose text is strong.
//!
//! # Whitespace
//!
//! Outside `<pre>`, a whitespace run containing a line break is source formatting. It collapses
//! to one space, and it is held back as a *pending* space that is only emitted when more inline
//! content follows on the same line. A pending space reaching a block boundary or a `<br>` is
//! dropped, so indentation between blocks and at block edges never shows up in the output.
//! Whitespace-only text nodes are always treated this way. Spaces, tabs and non-breaking spaces
//! next to visible text are content and survive verbatim.
//!
//! Inside `<pre>` text is emitted as-is.

use crate::ir::events::{Event, Leaf, Mark};
use crate::ir::nodes::{NumberingStyle, Time};
use crate::markup::{Element, MarkupNode, Tag};
use log::debug;

/// Flatten top-level markup nodes into a complete event stream.
pub fn markup_to_events(nodes: &[MarkupNode]) -> Vec<Event> {
    let mut walker = Walker::default();
    walker.events.push(Event::StartDocument);
    walker.walk_children(nodes, false);
    walker.events.push(Event::EndDocument);
    walker.events
}

#[derive(Default)]
struct Walker {
    events: Vec<Event>,
    marks: Vec<Mark>,
    /// Depth of `<pre>` elements; only the outermost one opens a code block.
    pre_depth: usize,
    /// Depth of explicit paragraphs in the current block container; nested ones flatten.
    paragraph_depth: usize,
    /// Whether inline content was emitted since the last block boundary or line break.
    line_has_content: bool,
    /// Collapsible whitespace waiting for the next inline content, with the marks it was seen
    /// under.
    pending_space: Option<(String, Vec<Mark>)>,
}

impl Walker {
    fn walk_children(&mut self, children: &[MarkupNode], in_list: bool) {
        for child in children {
            match child {
                MarkupNode::Text { value } => self.text(value),
                MarkupNode::Element(element) => self.element(element, in_list),
            }
        }
    }

    fn element(&mut self, element: &Element, in_list: bool) {
        let children = &element.children;
        match element.tag {
            Tag::B | Tag::Strong => self.formatted(Mark::Strong, children),
            Tag::I | Tag::Em => self.formatted(Mark::Emphasis, children),
            Tag::S | Tag::Strike | Tag::Del => self.formatted(Mark::Strike, children),
            Tag::Code => self.formatted(Mark::Code, children),
            Tag::Span | Tag::Small => self.walk_children(children, false),
            Tag::Br => self.line_break(),
            Tag::A => self.link(element),
            Tag::Time => self.time(element),
            _ if self.pre_depth > 0 => {
                // Block structure does not exist inside preformatted text.
                if element.tag == Tag::Pre {
                    self.pre_depth += 1;
                    self.walk_children(children, false);
                    self.pre_depth -= 1;
                } else {
                    self.walk_children(children, false);
                }
            }
            Tag::P => self.paragraph(children),
            Tag::Pre => {
                self.block_event(Event::StartCodeBlock);
                self.pre_depth += 1;
                self.walk_children(children, false);
                self.pre_depth -= 1;
                self.block_event(Event::EndCodeBlock);
            }
            Tag::Blockquote => {
                self.block_event(Event::StartBlockquote);
                self.in_new_container(|walker| walker.walk_children(children, false));
                self.block_event(Event::EndBlockquote);
            }
            Tag::Ul | Tag::Ol => {
                if in_list {
                    debug!("<{}> directly inside a list; wrapping it in an item", element.tag);
                    self.block_event(Event::StartListItem { value: None });
                    self.list(element);
                    self.block_event(Event::EndListItem);
                } else {
                    self.list(element);
                }
            }
            Tag::Li => {
                let value = element.get_attr("value").and_then(parse_integer);
                self.block_event(Event::StartListItem { value });
                self.in_new_container(|walker| walker.walk_children(children, false));
                self.block_event(Event::EndListItem);
            }
        }
    }

    fn formatted(&mut self, mark: Mark, children: &[MarkupNode]) {
        // Code wins: nothing formats inside inline code or a code block.
        if self.pre_depth > 0 || self.marks.contains(&Mark::Code) {
            self.walk_children(children, false);
            return;
        }
        self.with_mark(mark, children);
    }

    fn with_mark(&mut self, mark: Mark, children: &[MarkupNode]) {
        self.marks.push(mark);
        self.walk_children(children, false);
        self.marks.pop();
    }

    fn link(&mut self, element: &Element) {
        let href = element.get_attr("href").filter(|href| !href.trim().is_empty());
        let nested = self.marks.iter().any(|m| matches!(m, Mark::Link(_)));
        match href {
            Some(href) if !nested => {
                self.with_mark(Mark::Link(href.trim().to_string()), &element.children)
            }
            Some(_) => {
                debug!("link nested inside a link; keeping the outer one");
                self.walk_children(&element.children, false);
            }
            None => {
                debug!("<a> without href; rendering its text");
                self.walk_children(&element.children, false);
            }
        }
    }

    fn time(&mut self, element: &Element) {
        let text: String = element.children.iter().map(MarkupNode::text_content).collect();
        let format = collapse_whitespace(&text).trim().to_string();
        let Some(datetime) = element.get_attr("datetime") else {
            debug!("<time> without datetime; rendering its text");
            self.walk_children(&element.children, false);
            return;
        };
        let time = Time {
            datetime: datetime.to_string(),
            format,
            fallback: element.get_attr("fallback").map(str::to_string),
        };
        self.content(Leaf::Time(time));
    }

    fn paragraph(&mut self, children: &[MarkupNode]) {
        if self.paragraph_depth > 0 {
            self.walk_children(children, false);
            return;
        }
        self.block_event(Event::StartParagraph);
        self.paragraph_depth += 1;
        self.walk_children(children, false);
        self.paragraph_depth -= 1;
        self.block_event(Event::EndParagraph);
    }

    fn list(&mut self, element: &Element) {
        let ordered = element.tag == Tag::Ol;
        let start = element.get_attr("start").and_then(parse_integer).unwrap_or(1);
        let style = match element.get_attr("type") {
            Some(kind) if ordered => NumberingStyle::from_type_attr(kind),
            _ => NumberingStyle::Decimal,
        };
        self.block_event(Event::StartList {
            ordered,
            start,
            style,
        });
        self.in_new_container(|walker| walker.walk_children(&element.children, true));
        self.block_event(Event::EndList);
    }

    /// Run `f` with paragraph nesting reset, for containers that hold their own paragraphs.
    fn in_new_container(&mut self, f: impl FnOnce(&mut Self)) {
        let saved = std::mem::take(&mut self.paragraph_depth);
        f(self);
        self.paragraph_depth = saved;
    }

    fn block_event(&mut self, event: Event) {
        self.pending_space = None;
        self.line_has_content = false;
        self.events.push(event);
    }

    fn line_break(&mut self) {
        self.pending_space = None;
        self.emit(Leaf::LineBreak, self.effective_marks());
        self.line_has_content = false;
    }

    fn text(&mut self, value: &str) {
        if value.is_empty() {
            return;
        }
        if self.pre_depth > 0 {
            self.content(Leaf::Text(value.to_string()));
            return;
        }

        let core = value.trim_matches(is_collapsible);
        if core.is_empty() {
            if has_line_break(value) {
                self.soft_space(" ");
            } else {
                self.soft_space(value);
            }
            return;
        }

        let lead_len = value.len() - value.trim_start_matches(is_collapsible).len();
        let trail_start = value.trim_end_matches(is_collapsible).len();
        let (lead, trail) = (&value[..lead_len], &value[trail_start..]);

        if has_line_break(lead) {
            self.soft_space(" ");
        } else if !lead.is_empty() {
            self.content(Leaf::Text(lead.to_string()));
        }

        self.content(Leaf::Text(collapse_whitespace(core)));

        if has_line_break(trail) {
            self.soft_space(" ");
        } else if !trail.is_empty() {
            self.content(Leaf::Text(trail.to_string()));
        }
    }

    fn soft_space(&mut self, space: &str) {
        if self.line_has_content && self.pending_space.is_none() {
            self.pending_space = Some((space.to_string(), self.effective_marks()));
        }
    }

    /// Emit visible inline content, preceded by any pending space.
    fn content(&mut self, leaf: Leaf) {
        let marks = self.effective_marks();
        if let Some((space, space_marks)) = self.pending_space.take() {
            let shared = space_marks
                .iter()
                .zip(&marks)
                .take_while(|(a, b)| a == b)
                .count();
            self.emit(Leaf::Text(space), marks[..shared].to_vec());
        }
        self.emit(leaf, marks);
        self.line_has_content = true;
    }

    /// Push an inline event, extending the previous text leaf when the marks match.
    fn emit(&mut self, leaf: Leaf, marks: Vec<Mark>) {
        if let (
            Leaf::Text(text),
            Some(Event::Inline {
                marks: last_marks,
                leaf: Leaf::Text(last),
            }),
        ) = (&leaf, self.events.last_mut())
        {
            if *last_marks == marks {
                last.push_str(text);
                return;
            }
        }
        self.events.push(Event::Inline { marks, leaf });
    }

    /// Inside a code block only links survive.
    fn effective_marks(&self) -> Vec<Mark> {
        if self.pre_depth > 0 {
            self.marks
                .iter()
                .filter(|mark| matches!(mark, Mark::Link(_)))
                .cloned()
                .collect()
        } else {
            self.marks.clone()
        }
    }
}

fn is_collapsible(c: char) -> bool {
    c.is_ascii_whitespace()
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// Collapse every whitespace run containing a line break into a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.chars() {
        if is_collapsible(c) {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if has_line_break(run) {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
