//! Format implementations
//!
//! The input side (`html`) turns markup strings into [`MarkupNode`](crate::markup::MarkupNode)
//! trees; the output side (`mrkdwn`) turns the block tree into Slack text.

pub mod html;
pub mod mrkdwn;

pub use html::parse_markup;
pub use mrkdwn::{format_date, serialize_to_mrkdwn};
