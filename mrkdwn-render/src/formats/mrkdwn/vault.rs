//! Deferred code-block contents and the line model that references them.
//!
//! Code-block text must come out byte-for-byte, but block rendering keeps rewriting lines
//! (quote prefixes, list indentation, blank-line separators). Literal code lines therefore live
//! in a [`CodeVault`] and the line model only holds their index. Because a [`Piece::Vaulted`]
//! is a structural value rather than a placeholder string, user text can never be mistaken for
//! a vault reference. Indices are resolved in [`join_lines`], after every prefix is in place.

use crate::error::RenderError;

/// Literal strings referenced from rendered lines by index.
#[derive(Debug, Default)]
pub struct CodeVault {
    entries: Vec<String>,
}

impl CodeVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a literal and return its index.
    pub fn store(&mut self, literal: String) -> usize {
        self.entries.push(literal);
        self.entries.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }
}

/// A fragment of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Already escaped mrkdwn.
    Markup(String),
    /// A vault entry, emitted verbatim at join time.
    Vaulted(usize),
}

/// One physical output line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line(pub Vec<Piece>);

impl Line {
    pub fn markup(text: impl Into<String>) -> Self {
        Line(vec![Piece::Markup(text.into())])
    }

    pub fn vaulted(index: usize) -> Self {
        Line(vec![Piece::Vaulted(index)])
    }

    /// A line with no content at all.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|piece| match piece {
            Piece::Markup(text) => text.is_empty(),
            Piece::Vaulted(_) => false,
        })
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Piece::Markup(last)) = self.0.last_mut() {
            last.push_str(text);
        } else {
            self.0.push(Piece::Markup(text.to_string()));
        }
    }

    pub fn append(&mut self, other: Line) {
        for piece in other.0 {
            match piece {
                Piece::Markup(text) => self.push_str(&text),
                vaulted => self.0.push(vaulted),
            }
        }
    }

    /// Prepend `prefix` to the line.
    pub fn prefixed(self, prefix: &str) -> Line {
        let mut line = Line::markup(prefix);
        line.append(self);
        line
    }

    /// The markup text of a line that holds no vault entries.
    pub fn as_markup(&self) -> Option<String> {
        let mut out = String::new();
        for piece in &self.0 {
            match piece {
                Piece::Markup(text) => out.push_str(text),
                Piece::Vaulted(_) => return None,
            }
        }
        Some(out)
    }
}

/// Resolve every vault reference and join the lines with `\n`.
pub fn join_lines(lines: &[Line], vault: &CodeVault) -> Result<String, RenderError> {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for piece in &line.0 {
            match piece {
                Piece::Markup(text) => out.push_str(text),
                Piece::Vaulted(index) => {
                    let literal = vault.get(*index).ok_or_else(|| {
                        RenderError::Internal(format!("unresolved code vault entry {index}"))
                    })?;
                    out.push_str(literal);
                }
            }
        }
    }
    Ok(out)
}
