//! Block tree → mrkdwn string
//!
//! Pipeline: Document → lines of [`Piece`]s (code text vaulted) → joined string
//!
//! Blocks render bottom-up into lines, and every enclosing block rewrites the lines of its
//! children: a blockquote prefixes them with `> `, a list item prefixes the first with its
//! marker and indents the rest. Inline content renders into lines of fragments, where a
//! fragment is either text that formatting may wrap and a link may enclose, or a finished
//! token (a link, a mention, a date) that a link must not enclose again.

use crate::common::links::SpecialLink;
use crate::error::RenderError;
use crate::formats::mrkdwn::date::format_date;
use crate::formats::mrkdwn::escape::{
    escape_text, escape_time_part, escape_url, guard_line_start, TextContext,
};
use crate::formats::mrkdwn::numbering::number;
use crate::formats::mrkdwn::vault::{join_lines, CodeVault, Line};
use crate::ir::nodes::*;
use crate::options::RenderOptions;
use chrono::{DateTime, Utc};
use log::warn;

const FENCE: &str = "```";
const ZERO_WIDTH_SPACE: char = '\u{200B}';

/// Serialize a block tree into mrkdwn.
pub fn serialize_to_mrkdwn(doc: &Document, options: &RenderOptions) -> Result<String, RenderError> {
    let mut serializer = Serializer {
        options,
        now: options.now.unwrap_or_else(Utc::now),
        vault: CodeVault::new(),
    };
    let lines = serializer.blocks(&doc.children, false, 0);
    join_lines(&lines, &serializer.vault)
}

struct Serializer<'a> {
    options: &'a RenderOptions,
    now: DateTime<Utc>,
    vault: CodeVault,
}

impl Serializer<'_> {
    /// Render sibling blocks with their separators.
    ///
    /// Siblings are separated by a blank line, except around code blocks (whose fences already
    /// delimit them) and around a list nested in a list item.
    fn blocks(&mut self, blocks: &[BlockNode], in_item: bool, list_depth: usize) -> Vec<Line> {
        let mut lines = Vec::new();
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                let prev = &blocks[i - 1];
                let tight = prev.is_code_block()
                    || block.is_code_block()
                    || (in_item && (prev.is_list() || block.is_list()));
                if !tight {
                    lines.push(Line::default());
                }
            }
            lines.extend(self.block(block, list_depth));
        }
        lines
    }

    fn block(&mut self, block: &BlockNode, list_depth: usize) -> Vec<Line> {
        match block {
            BlockNode::Paragraph(paragraph) => self.paragraph(paragraph),
            BlockNode::Blockquote(quote) => self
                .blocks(&quote.children, false, list_depth)
                .into_iter()
                .map(|line| line.prefixed("> "))
                .collect(),
            BlockNode::List(list) => self.list(list, list_depth),
            BlockNode::CodeBlock(code) => self.code_block(code),
        }
    }

    fn paragraph(&self, paragraph: &Paragraph) -> Vec<Line> {
        let mut lines = self
            .inlines(&paragraph.content, &InlineContext::plain())
            .into_strings();
        // A closing line break has nothing after it to push down.
        while lines.len() > 1 && lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        lines
            .into_iter()
            .map(|line| Line::markup(guard_line_start(&line).unwrap_or(line)))
            .collect()
    }

    fn code_block(&mut self, code: &CodeBlock) -> Vec<Line> {
        let mut lines = vec![Line::markup(FENCE)];
        if !code.content.is_empty() {
            let context = InlineContext {
                text: TextContext::CodeBlock,
                ..InlineContext::plain()
            };
            for literal in self.inlines(&code.content, &context).into_strings() {
                lines.push(Line::vaulted(self.vault.store(literal)));
            }
        }
        lines.push(Line::markup(FENCE));
        lines
    }

    fn list(&mut self, list: &List, list_depth: usize) -> Vec<Line> {
        let mut counter = list.start;
        let markers: Vec<String> = list
            .items
            .iter()
            .map(|item| {
                if let Some(value) = item.value {
                    counter = value;
                }
                let n = counter;
                counter = counter.saturating_add(1);
                if list.ordered {
                    format!("{}.", number(n, list.style))
                } else {
                    self.options.bullet(list_depth).to_string()
                }
            })
            .collect();
        let width = markers.iter().map(|m| m.chars().count()).max().unwrap_or(0);
        let indent = " ".repeat(width + 1);

        let mut lines = Vec::new();
        for (item, marker) in list.items.iter().zip(&markers) {
            let padded = format!("{marker:>width$}");
            let item_lines = self.blocks(&item.children, true, list_depth + 1);
            if item_lines.is_empty() {
                lines.push(Line::markup(padded));
                continue;
            }
            for (i, line) in item_lines.into_iter().enumerate() {
                if i == 0 {
                    lines.push(line.prefixed(&format!("{padded} ")));
                } else if line.is_empty() {
                    lines.push(line);
                } else {
                    lines.push(line.prefixed(&indent));
                }
            }
        }
        lines
    }

    fn inlines(&self, nodes: &[InlineNode], context: &InlineContext) -> Run {
        let mut run = Run::new();
        for node in nodes {
            self.inline(node, context, &mut run);
        }
        run
    }

    fn inline(&self, node: &InlineNode, context: &InlineContext, run: &mut Run) {
        match node {
            InlineNode::Text(text) => {
                let escaped = escape_text(text, context.text);
                for (i, part) in escaped.split('\n').enumerate() {
                    if i > 0 {
                        run.new_line();
                    }
                    run.push_text(part);
                }
            }
            InlineNode::LineBreak => run.new_line(),
            InlineNode::Emphasis(children) => {
                self.wrapped(Wrapper::Emphasis, children, context, run)
            }
            InlineNode::Strong(children) => self.wrapped(Wrapper::Strong, children, context, run),
            InlineNode::Strikethrough(children) => {
                self.wrapped(Wrapper::Strike, children, context, run)
            }
            InlineNode::InlineCode(children) => {
                self.wrapped(Wrapper::Code, children, context, run)
            }
            InlineNode::Link(link) => self.link(link, context, run),
            InlineNode::Time(time) => self.time(time, context, run),
        }
    }

    fn wrapped(
        &self,
        wrapper: Wrapper,
        children: &[InlineNode],
        context: &InlineContext,
        run: &mut Run,
    ) {
        if context.active.contains(&wrapper) || context.text == TextContext::CodeBlock {
            for child in children {
                self.inline(child, context, run);
            }
            return;
        }

        let mut inner = context.clone();
        inner.active.push(wrapper);
        if wrapper == Wrapper::Code {
            inner.text = TextContext::InlineCode;
        }

        let marker = self.marker(wrapper);
        let mut sub = self.inlines(children, &inner);
        for line in &mut sub.lines {
            wrap_line(line, &marker);
        }
        run.append(sub);
    }

    fn marker(&self, wrapper: Wrapper) -> String {
        let c = wrapper.marker();
        if self.options.exact_mode {
            format!("{ZERO_WIDTH_SPACE}{c}{ZERO_WIDTH_SPACE}")
        } else {
            c.to_string()
        }
    }

    fn link(&self, link: &Link, context: &InlineContext, run: &mut Run) {
        if let Some(special) = SpecialLink::detect(&link.url, &self.options.links) {
            run.push_token(special.render());
            return;
        }
        if context.link.is_some() {
            for child in &link.children {
                self.inline(child, context, run);
            }
            return;
        }

        let url = escape_url(&link.url);
        let compact = plain_text(&link.children).is_some_and(|text| text == link.url)
            && !link.url.contains('|');
        if compact {
            run.push_token(format!("<{url}>"));
            return;
        }

        let mut inner = context.clone();
        inner.link = Some(link.url.clone());
        if inner.text == TextContext::Plain {
            inner.text = TextContext::LinkText;
        }

        let mut sub = self.inlines(&link.children, &inner);
        if sub.is_blank() {
            run.push_token(format!("<{url}>"));
            return;
        }
        for line in &mut sub.lines {
            link_line(line, &url);
        }
        run.append(sub);
    }

    fn time(&self, time: &Time, context: &InlineContext, run: &mut Run) {
        let Some(epoch) = time.epoch_seconds() else {
            warn!(
                "malformed <time> datetime {:?}; rendering it as text",
                time.datetime
            );
            run.push_text(&escape_text(&time.datetime, context.text));
            return;
        };

        let format = if time.format.trim().is_empty() {
            self.options.default_time_format.as_str()
        } else {
            time.format.as_str()
        };
        let fallback = match &time.fallback {
            Some(fallback) => fallback.clone(),
            None => format_date(epoch, format, self.now),
        };
        let link = context
            .link
            .as_deref()
            .map(|url| format!("^{}", escape_url(url)))
            .unwrap_or_default();

        run.push_token(format!(
            "<!date^{epoch}^{}{link}|{}>",
            escape_time_part(format),
            escape_time_part(&fallback)
        ));
    }
}

/// Inline formatting that renders as a pair of delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrapper {
    Emphasis,
    Strong,
    Strike,
    Code,
}

impl Wrapper {
    fn marker(self) -> char {
        match self {
            Wrapper::Emphasis => '_',
            Wrapper::Strong => '*',
            Wrapper::Strike => '~',
            Wrapper::Code => '`',
        }
    }
}

/// Formatting state during inline traversal.
#[derive(Debug, Clone)]
struct InlineContext {
    active: Vec<Wrapper>,
    text: TextContext,
    /// Target of the enclosing link, embedded into time tokens.
    link: Option<String>,
}

impl InlineContext {
    fn plain() -> Self {
        Self {
            active: Vec::new(),
            text: TextContext::Plain,
            link: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Frag {
    /// Escaped text, open to wrapping.
    Text(String),
    /// A complete `<…>` token.
    Token(String),
    /// A formatting delimiter. A link only encloses it when the line holds no token.
    Marker(String),
}

type FragLine = Vec<Frag>;

/// Inline output as physical lines of fragments.
#[derive(Debug)]
struct Run {
    lines: Vec<FragLine>,
}

impl Run {
    fn new() -> Self {
        Self {
            lines: vec![Vec::new()],
        }
    }

    fn current(&mut self) -> &mut FragLine {
        if self.lines.is_empty() {
            self.lines.push(Vec::new());
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let line = self.current();
        if let Some(Frag::Text(last)) = line.last_mut() {
            last.push_str(text);
        } else {
            line.push(Frag::Text(text.to_string()));
        }
    }

    fn push_token(&mut self, token: String) {
        self.current().push(Frag::Token(token));
    }

    fn new_line(&mut self) {
        self.lines.push(Vec::new());
    }

    /// Continue the current line with the first line of `other`, then take its other lines.
    fn append(&mut self, other: Run) {
        let mut lines = other.lines.into_iter();
        if let Some(first) = lines.next() {
            for frag in first {
                match frag {
                    Frag::Text(text) => self.push_text(&text),
                    token => self.current().push(token),
                }
            }
        }
        self.lines.extend(lines);
    }

    /// True when no line holds anything but whitespace.
    fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| is_blank_line(line))
    }

    fn into_strings(self) -> Vec<String> {
        self.lines
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .map(|frag| match frag {
                        Frag::Text(text) | Frag::Token(text) | Frag::Marker(text) => text,
                    })
                    .collect()
            })
            .collect()
    }
}

fn is_blank_line(line: &FragLine) -> bool {
    line.iter().all(|frag| match frag {
        Frag::Text(text) => text.trim().is_empty(),
        Frag::Token(_) | Frag::Marker(_) => false,
    })
}

/// Split `text` into leading whitespace, core and trailing whitespace.
fn split_whitespace_edges(text: &str) -> (&str, &str, &str) {
    let core_start = text.len() - text.trim_start().len();
    let core_end = text.trim_end().len().max(core_start);
    (&text[..core_start], &text[core_start..core_end], &text[core_end..])
}

/// Wrap one physical line in `marker`, keeping edge whitespace outside it.
fn wrap_line(line: &mut FragLine, marker: &str) {
    if is_blank_line(line) {
        return;
    }

    let mut lead = String::new();
    if let Some(Frag::Text(first)) = line.first_mut() {
        let (before, _, _) = split_whitespace_edges(first);
        lead = before.to_string();
        first.drain(..lead.len());
    }
    let mut trail = String::new();
    if let Some(Frag::Text(last)) = line.last_mut() {
        let (_, _, after) = split_whitespace_edges(last);
        trail = after.to_string();
        last.truncate(last.len() - trail.len());
    }

    line.insert(0, Frag::Marker(marker.to_string()));
    line.insert(0, Frag::Text(lead));
    line.push(Frag::Marker(marker.to_string()));
    line.push(Frag::Text(trail));
    merge_text(line);
}

/// Enclose every text stretch of a line in `<url|…>`; tokens stay outside.
///
/// Without tokens the whole line is one stretch, delimiters included. With tokens each text
/// segment is linked on its own and delimiters stay around the segments and tokens they wrap.
fn link_line(line: &mut FragLine, url: &str) {
    if !line.iter().any(|frag| matches!(frag, Frag::Token(_))) {
        for frag in line.iter_mut() {
            if let Frag::Marker(marker) = frag {
                *frag = Frag::Text(std::mem::take(marker));
            }
        }
        merge_text(line);
    }

    let mut linked = Vec::with_capacity(line.len());
    for frag in line.drain(..) {
        match frag {
            Frag::Text(text) if !text.trim().is_empty() => {
                let (lead, core, trail) = split_whitespace_edges(&text);
                if !lead.is_empty() {
                    linked.push(Frag::Text(lead.to_string()));
                }
                linked.push(Frag::Token(format!("<{url}|{core}>")));
                if !trail.is_empty() {
                    linked.push(Frag::Text(trail.to_string()));
                }
            }
            other => linked.push(other),
        }
    }
    *line = linked;
}

fn merge_text(line: &mut FragLine) {
    let mut merged: FragLine = Vec::with_capacity(line.len());
    for frag in line.drain(..) {
        match (merged.last_mut(), frag) {
            (_, Frag::Text(text)) if text.is_empty() => {}
            (Some(Frag::Text(last)), Frag::Text(text)) => last.push_str(&text),
            (_, frag) => merged.push(frag),
        }
    }
    *line = merged;
}

/// The text of inline content that carries no formatting at all.
fn plain_text(nodes: &[InlineNode]) -> Option<String> {
    let mut out = String::new();
    for node in nodes {
        match node {
            InlineNode::Text(text) => out.push_str(text),
            _ => return None,
        }
    }
    Some(out)
}
