//! Special link targets: channel, user and group mentions.
//!
//! A link whose `href` has one of the shapes below renders as a Slack mention instead of a
//! hyperlink, and its text is dropped:
//!
//! | href                          | output                  |
//! |-------------------------------|-------------------------|
//! | `#C0123ABCD`                  | `<#C0123ABCD>`          |
//! | `@U0123ABCD`, `@W0123ABCD`    | `<@U0123ABCD>`          |
//! | `@S0123ABCD`                  | `<!subteam^S0123ABCD>`  |
//! | `@channel`, `@everyone`, `@here` | `<!channel\|channel>` |
//!
//! IDs must be alphanumeric and at least [`SpecialLinkRules::min_id_length`] long, prefix
//! letter included. Anything else is an ordinary URL.

use once_cell::sync::Lazy;
use regex::Regex;

static CHANNEL_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(C[A-Za-z0-9]+)$").expect("valid channel id regex"));
static USER_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@([UW][A-Za-z0-9]+)$").expect("valid user id regex"));
static SUBTEAM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@(S[A-Za-z0-9]+)$").expect("valid subteam id regex"));

/// Tunables for mention detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialLinkRules {
    pub min_id_length: usize,
}

impl Default for SpecialLinkRules {
    fn default() -> Self {
        Self { min_id_length: 8 }
    }
}

/// A link target that Slack renders as a mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialLink {
    Channel(String),
    User(String),
    Subteam(String),
    Broadcast(Broadcast),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Broadcast {
    Channel,
    Everyone,
    Here,
}

impl Broadcast {
    fn keyword(self) -> &'static str {
        match self {
            Broadcast::Channel => "channel",
            Broadcast::Everyone => "everyone",
            Broadcast::Here => "here",
        }
    }
}

impl SpecialLink {
    /// Recognize `url` as a mention, if it has one of the special shapes.
    pub fn detect(url: &str, rules: &SpecialLinkRules) -> Option<Self> {
        let broadcast = match url {
            "@channel" => Some(Broadcast::Channel),
            "@everyone" => Some(Broadcast::Everyone),
            "@here" => Some(Broadcast::Here),
            _ => None,
        };
        if let Some(broadcast) = broadcast {
            return Some(SpecialLink::Broadcast(broadcast));
        }

        let id = |re: &Regex| {
            re.captures(url)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .filter(|id| id.len() >= rules.min_id_length)
        };

        if let Some(id) = id(&CHANNEL_ID) {
            Some(SpecialLink::Channel(id))
        } else if let Some(id) = id(&USER_ID) {
            Some(SpecialLink::User(id))
        } else {
            id(&SUBTEAM_ID).map(SpecialLink::Subteam)
        }
    }

    /// The mrkdwn form of the mention.
    pub fn render(&self) -> String {
        match self {
            SpecialLink::Channel(id) => format!("<#{id}>"),
            SpecialLink::User(id) => format!("<@{id}>"),
            SpecialLink::Subteam(id) => format!("<!subteam^{id}>"),
            SpecialLink::Broadcast(broadcast) => {
                let keyword = broadcast.keyword();
                format!("<!{keyword}|{keyword}>")
            }
        }
    }
}
