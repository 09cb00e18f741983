//! Error types for render operations

use crate::common::flat_to_nested::ConversionError;
use std::fmt;

/// Errors that can occur while turning markup into mrkdwn
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A tag outside the supported vocabulary was encountered
    UnsupportedMarkup(String),
    /// The flat event stream could not be assembled into a block tree
    Structure(ConversionError),
    /// Rendering left an internal token unresolved (a defect, not bad input)
    Internal(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedMarkup(tag) => write!(f, "Unsupported markup: <{tag}>"),
            RenderError::Structure(err) => write!(f, "Structure error: {err}"),
            RenderError::Internal(msg) => write!(f, "Internal render error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Structure(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConversionError> for RenderError {
    fn from(err: ConversionError) -> Self {
        RenderError::Structure(err)
    }
}
