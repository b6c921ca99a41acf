use crate::domain::model::{Classification, ConnectionEvent, Notification, NodeId};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

const EMOJI_BLOCKED: &str = "🚫";

/// Builds the push text for an event. `describe` renders a node's
/// database entry, e.g. `(W1AW Hub in Newington, CT)`. `disconnected` is
/// whether a blocked node's link was dropped by this run.
pub fn compose<Tz, F>(
    event: &ConnectionEvent,
    classification: Classification,
    disconnected: bool,
    echolink: Option<NodeId>,
    describe: F,
    at: &DateTime<Tz>,
) -> Notification
where
    Tz: TimeZone,
    Tz::Offset: Display,
    F: Fn(NodeId) -> String,
{
    let time = at.format("%H:%M:%S");
    let remote = event.remote;
    let local = event.local;

    if classification == Classification::Blocked && disconnected {
        return Notification {
            title: format!("Blocked node {} [{}]", remote, classification),
            message: format!(
                "{} Blocked node {} {} was auto disconnected from {} {} at {}",
                EMOJI_BLOCKED,
                remote,
                describe(remote),
                local,
                describe(local),
                time
            ),
        };
    }

    let target = if echolink == Some(local) {
        format!("Echolink ({})", local)
    } else {
        format!("{} {}", local, describe(local))
    };

    let emoji = if classification == Classification::Blocked {
        EMOJI_BLOCKED
    } else {
        event.kind.emoji()
    };

    Notification {
        title: format!("Node {} {} [{}]", remote, event.kind, classification),
        message: format!(
            "{} Node {} {} {} {} at {}",
            emoji,
            remote,
            describe(remote),
            event.kind.action(),
            target,
            time
        ),
    }
}
