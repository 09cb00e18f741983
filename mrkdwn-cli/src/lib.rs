//! Library side of the `mrkdwn` binary: the inspect transforms.

pub mod transforms;
