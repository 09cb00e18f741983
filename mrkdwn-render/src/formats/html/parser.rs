//! Markup string → `MarkupNode` tree
//!
//! Pipeline: markup string → RcDom (html5ever) → MarkupNode

use crate::error::RenderError;
use crate::markup::{Element, MarkupNode};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse a markup string into top-level nodes.
///
/// The string is treated as the body of an HTML document. Any element outside the supported
/// vocabulary, including elements the HTML parser hoists into `<head>`, is an error.
pub fn parse_markup(source: &str) -> Result<Vec<MarkupNode>, RenderError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(source);

    let mut nodes = Vec::new();
    for child in dom.document.children.borrow().iter() {
        if let NodeData::Element { name, .. } = &child.data {
            if &*name.local == "html" {
                convert_root(child, &mut nodes)?;
            }
        }
    }
    Ok(nodes)
}

/// Walk `<html>`: reject anything in `<head>`, convert the contents of `<body>`.
fn convert_root(html: &Handle, nodes: &mut Vec<MarkupNode>) -> Result<(), RenderError> {
    for section in html.children.borrow().iter() {
        let NodeData::Element { name, .. } = &section.data else {
            continue;
        };
        match &*name.local {
            "head" => {
                if let Some(tag) = section.children.borrow().iter().find_map(element_name) {
                    return Err(RenderError::UnsupportedMarkup(tag));
                }
            }
            "body" => {
                for child in section.children.borrow().iter() {
                    if let Some(node) = convert_node(child)? {
                        nodes.push(node);
                    }
                }
            }
            other => return Err(RenderError::UnsupportedMarkup(other.to_string())),
        }
    }
    Ok(())
}

fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn convert_node(handle: &Handle) -> Result<Option<MarkupNode>, RenderError> {
    match &handle.data {
        NodeData::Text { contents } => {
            let text = contents.borrow().to_string();
            Ok((!text.is_empty()).then(|| MarkupNode::text(text)))
        }
        NodeData::Element { name, attrs, .. } => {
            let mut element = Element::named(&name.local)?;
            for attr in attrs.borrow().iter() {
                element = element.attr(attr.name.local.to_string(), attr.value.to_string());
            }
            for child in handle.children.borrow().iter() {
                if let Some(node) = convert_node(child)? {
                    element.children.push(node);
                }
            }
            Ok(Some(MarkupNode::Element(element)))
        }
        // Comments, doctypes and processing instructions carry no content.
        _ => Ok(None),
    }
}
