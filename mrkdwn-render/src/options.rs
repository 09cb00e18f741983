//! Render options and the process-wide exact-mode default.

use crate::common::links::SpecialLinkRules;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

/// Bullets for unordered lists, cycled by nesting depth.
pub const DEFAULT_BULLETS: [&str; 3] = ["•", "◦", "▪"];

/// Format used by `<time>` elements without content.
pub const DEFAULT_TIME_FORMAT: &str = "{date_short_pretty} at {time}";

static EXACT_MODE: AtomicBool = AtomicBool::new(false);

/// Set the exact-mode default picked up by [`RenderOptions::default`].
///
/// Renders that pass explicit options are not affected.
pub fn set_exact_mode(enabled: bool) {
    EXACT_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_exact_mode() -> bool {
    EXACT_MODE.load(Ordering::Relaxed)
}

/// Options threaded through a single render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Bracket every formatting delimiter with U+200B so Slack applies it even inside words.
    pub exact_mode: bool,
    pub links: SpecialLinkRules,
    pub bullets: Vec<String>,
    pub default_time_format: String,
    /// The instant relative dates are computed against; the current time when unset.
    pub now: Option<DateTime<Utc>>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            exact_mode: is_exact_mode(),
            links: SpecialLinkRules::default(),
            bullets: DEFAULT_BULLETS.iter().map(|b| b.to_string()).collect(),
            default_time_format: DEFAULT_TIME_FORMAT.to_string(),
            now: None,
        }
    }
}

impl RenderOptions {
    pub fn with_exact_mode(mut self, exact_mode: bool) -> Self {
        self.exact_mode = exact_mode;
        self
    }

    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Bullet for an unordered list nested `depth` lists deep.
    pub fn bullet(&self, depth: usize) -> &str {
        if self.bullets.is_empty() {
            return DEFAULT_BULLETS[depth % DEFAULT_BULLETS.len()];
        }
        &self.bullets[depth % self.bullets.len()]
    }
}
