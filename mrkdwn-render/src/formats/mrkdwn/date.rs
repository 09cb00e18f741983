//! Localized text for time tokens.
//!
//! Slack replaces a `<!date^…>` token with text computed on the reader's device. The fallback
//! shown to clients that cannot do that is computed here, in UTC, from the same format string.
//!
//! Relative tokens (`{date_pretty}` and friends) are resolved in two steps: first the relative
//! step substitutes `today` / `yesterday` / `tomorrow` when the date is within a day of `now`
//! (comparing UTC calendar days), then every remaining token is formatted absolutely, with the
//! pretty tokens falling back to their plain counterparts.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("valid date token regex"));

/// Format `epoch_seconds` according to a Slack date format string.
///
/// Unknown `{…}` tokens are left as-is. An epoch outside the representable range leaves the
/// whole format untouched.
pub fn format_date(epoch_seconds: i64, format: &str, now: DateTime<Utc>) -> String {
    let Some(date) = DateTime::<Utc>::from_timestamp(epoch_seconds, 0) else {
        return format.to_string();
    };

    TOKEN
        .replace_all(format, |caps: &Captures| {
            let at_start = caps.get(0).is_some_and(|m| m.start() == 0);
            let token = &caps[1];
            relative(token, date, now, at_start)
                .or_else(|| absolute(token, date))
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn relative(
    token: &str,
    date: DateTime<Utc>,
    now: DateTime<Utc>,
    at_start: bool,
) -> Option<String> {
    if !matches!(
        token,
        "date_pretty" | "date_short_pretty" | "date_long_pretty"
    ) {
        return None;
    }
    let word = match day_offset(date.date_naive(), now.date_naive()) {
        0 => "today",
        -1 => "yesterday",
        1 => "tomorrow",
        _ => return None,
    };
    Some(if at_start {
        capitalize(word)
    } else {
        word.to_string()
    })
}

fn absolute(token: &str, date: DateTime<Utc>) -> Option<String> {
    let text = match token {
        "date_num" => date.format("%Y-%m-%d").to_string(),
        "date" | "date_pretty" => format!(
            "{} {}, {}",
            date.format("%B"),
            ordinal(date.day()),
            date.year()
        ),
        "date_short" | "date_short_pretty" => {
            format!("{} {}, {}", date.format("%b"), date.day(), date.year())
        }
        "date_long" | "date_long_pretty" => format!(
            "{}, {} {}, {}",
            date.format("%A"),
            date.format("%B"),
            ordinal(date.day()),
            date.year()
        ),
        "time" => date.format("%-I:%M %p").to_string(),
        "time_secs" => date.format("%-I:%M:%S %p").to_string(),
        _ => return None,
    };
    Some(text)
}

fn day_offset(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{day}{suffix}")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
