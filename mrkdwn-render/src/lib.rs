//! HTML-like markup to Slack mrkdwn
//!
//!     This crate renders a small, closed vocabulary of HTML-like markup (bold, italic,
//!     strikethrough, code, links, lists, blockquotes, paragraphs, preformatted blocks and
//!     localized `<time>` tokens) into the text dialect Slack uses in message and surface text
//!     fields.
//!
//!     This is a pure lib: it powers the mrkdwn-cli but is shell agnostic, no code here reads
//!     the environment or prints. Assembling the surrounding Block Kit JSON is left to callers,
//!     which hand in markup and get a string back.
//!
//! Architecture
//!
//!     Rendering is a pipeline of small stages, each one usable on its own:
//!
//!         markup string ──parse_markup──▶ MarkupNode tree
//!                       ──markup_to_events──▶ flat Event stream
//!                       ──events_to_tree──▶ Document (block tree)
//!                       ──serialize_to_mrkdwn──▶ String
//!
//!     Callers that build trees themselves skip the first stage.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── markup.rs               # Input tree and the closed tag vocabulary
//!     ├── options.rs              # RenderOptions and the exact-mode default
//!     ├── formats
//!     │   ├── html                # Markup string → MarkupNode (html5ever)
//!     │   └── mrkdwn              # Block tree → mrkdwn (escaping, numbering, dates, vault)
//!     ├── ir                      # Intermediate Representation: events, nodes, markup walker
//!     ├── common                  # Flat-to-nested conversion, entity encoding, mentions
//!     └── lib.rs
//!
//! Core Algorithms
//!
//!     The markup walker flattens everything into events, carrying the active inline marks on
//!     each leaf. The flat-to-nested stack machine (./common/flat_to_nested.rs) rebuilds the
//!     block structure, repairing loose markup with implicit paragraphs, items and lists. The
//!     serializer renders blocks bottom-up into lines, so quote prefixes and list indentation
//!     are applied structurally, and code-block text only becomes part of the output string in
//!     the final join.
//!
//! Exact Mode
//!
//!     A process-wide flag ([`set_exact_mode`]) seeds [`RenderOptions::default`]. Every render
//!     reads the options it was given, so explicit options always win.

pub mod common;
pub mod error;
pub mod formats;
pub mod ir;
pub mod markup;
pub mod options;

pub use common::flat_to_nested::events_to_tree;
pub use error::RenderError;
pub use formats::{format_date, parse_markup, serialize_to_mrkdwn};
pub use ir::from_markup::markup_to_events;
pub use markup::{Element, MarkupNode, Tag};
pub use options::{is_exact_mode, set_exact_mode, RenderOptions};

use log::debug;

/// What to render: a markup string or a tree built by the caller.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Markup(&'a str),
    Nodes(&'a [MarkupNode]),
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(markup: &'a str) -> Self {
        Source::Markup(markup)
    }
}

impl<'a> From<&'a String> for Source<'a> {
    fn from(markup: &'a String) -> Self {
        Source::Markup(markup)
    }
}

impl<'a> From<&'a MarkupNode> for Source<'a> {
    fn from(node: &'a MarkupNode) -> Self {
        Source::Nodes(std::slice::from_ref(node))
    }
}

impl<'a> From<&'a [MarkupNode]> for Source<'a> {
    fn from(nodes: &'a [MarkupNode]) -> Self {
        Source::Nodes(nodes)
    }
}

impl<'a> From<&'a Vec<MarkupNode>> for Source<'a> {
    fn from(nodes: &'a Vec<MarkupNode>) -> Self {
        Source::Nodes(nodes)
    }
}

/// Render markup into mrkdwn with default options.
///
/// # Example
///
/// ```ignore
/// let text = mrkdwn_render::render("<i>Hello, <b>World</b>!</i>")?;
/// assert_eq!(text, "_Hello, *World*!_");
/// ```
pub fn render<'a>(source: impl Into<Source<'a>>) -> Result<String, RenderError> {
    render_with_options(source, &RenderOptions::default())
}

/// Render markup into mrkdwn.
pub fn render_with_options<'a>(
    source: impl Into<Source<'a>>,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let parsed;
    let nodes = match source.into() {
        Source::Markup(markup) => {
            parsed = parse_markup(markup)?;
            parsed.as_slice()
        }
        Source::Nodes(nodes) => nodes,
    };

    let events = markup_to_events(nodes);
    debug!("flattened markup into {} events", events.len());
    let doc = events_to_tree(&events)?;
    serialize_to_mrkdwn(&doc, options)
}
