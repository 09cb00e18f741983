//! CLI-specific transforms
//!
//! This module defines the transforms available to `mrkdwn inspect`. Each transform is a
//! stage + format combination (e.g., "events-json").
//!
//! ## Transform Pipeline
//!
//! Rendering goes through these stages:
//!
//! 1. **Parsing** - Markup string → markup tree
//!    - `markup-json`: the parsed elements and text nodes
//!
//! 2. **Flattening** - Markup tree → event stream
//!    - `events-json`: block start/end events and inline leaves with their marks
//!
//! 3. **Nesting** - Events → block tree
//!    - `blocks-json`: the document the mrkdwn serializer consumes
//!
//! Example: `mrkdwn inspect message.html events-json`

use mrkdwn_render::{events_to_tree, markup_to_events, parse_markup};
use serde::Serialize;

/// All available CLI transforms (stage + format combinations)
pub const AVAILABLE_TRANSFORMS: &[&str] = &["markup-json", "events-json", "blocks-json"];

/// The transform `inspect` runs when none is named.
pub const DEFAULT_TRANSFORM: &str = "blocks-json";

/// Execute a named transform on a markup source
///
/// # Returns
///
/// The transformed output as a string, or an error message
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("<b>hi</b>", "events-json")?;
/// ```
pub fn execute_transform(source: &str, transform_name: &str) -> Result<String, String> {
    let nodes = parse_markup(source).map_err(|e| format!("Parse failed: {e}"))?;

    match transform_name {
        "markup-json" => to_json(&nodes),
        "events-json" => to_json(&markup_to_events(&nodes)),
        "blocks-json" => {
            let doc = events_to_tree(&markup_to_events(&nodes))
                .map_err(|e| format!("Transform failed: {e}"))?;
            to_json(&doc)
        }
        _ => Err(format!(
            "Unknown transform '{transform_name}'. Use --list-transforms to see all options."
        )),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}
