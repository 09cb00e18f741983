//! End-to-end rendering: markup string in, mrkdwn out.

mod blocks;
mod inline;
mod links;
mod time;
