use crate::utils::error::HookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// AllStar / EchoLink node number.
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Connect,
    Disconnect,
}

impl EventKind {
    pub fn action(&self) -> &'static str {
        match self {
            EventKind::Connect => "connected to",
            EventKind::Disconnect => "disconnected from",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            EventKind::Connect => "🔌",
            EventKind::Disconnect => "❌",
        }
    }
}

impl TryFrom<u8> for EventKind {
    type Error = HookError;

    fn try_from(status: u8) -> Result<Self, Self::Error> {
        match status {
            1 => Ok(EventKind::Connect),
            0 => Ok(EventKind::Disconnect),
            other => Err(HookError::UsageError {
                message: format!("connection status must be 1 or 0, got {}", other),
            }),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Connect => write!(f, "connect"),
            EventKind::Disconnect => write!(f, "disconnect"),
        }
    }
}

/// One hook invocation: the remote node linked to or unlinked from the local node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionEvent {
    pub kind: EventKind,
    pub local: NodeId,
    pub remote: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node: NodeId,
    pub callsign: String,
    pub description: String,
    pub location: String,
}

impl NodeRecord {
    /// `(CALL DESCRIPTION in LOCATION)`, dropping whichever parts are blank.
    pub fn describe(&self) -> String {
        let mut text = [self.callsign.as_str(), self.description.as_str()]
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let location = self.location.trim();
        if !location.is_empty() {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str("in ");
            text.push_str(location);
        }

        if text.is_empty() {
            "(unknown)".to_string()
        } else {
            format!("({})", text)
        }
    }
}

/// Group a remote node falls into. Declaration order is precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Blocked,
    Personal,
    Private,
    Echolink,
    Public,
}

impl Classification {
    pub fn permitted(&self) -> bool {
        !matches!(self, Classification::Blocked)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Blocked => "blocked",
            Classification::Personal => "personal",
            Classification::Private => "private",
            Classification::Echolink => "echolink",
            Classification::Public => "public",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

/// What a single invocation ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub classification: Classification,
    pub permitted: bool,
    pub disconnected: bool,
    pub notified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(callsign: &str, description: &str, location: &str) -> NodeRecord {
        NodeRecord {
            node: 2000,
            callsign: callsign.to_string(),
            description: description.to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn test_event_kind_from_status() {
        assert_eq!(EventKind::try_from(1).unwrap(), EventKind::Connect);
        assert_eq!(EventKind::try_from(0).unwrap(), EventKind::Disconnect);
        assert!(matches!(
            EventKind::try_from(7),
            Err(HookError::UsageError { .. })
        ));
    }

    #[test]
    fn test_describe_full_record() {
        let node = record("WB6NIL", "ASL Public Hub", "Los Angeles, CA");
        assert_eq!(node.describe(), "(WB6NIL ASL Public Hub in Los Angeles, CA)");
    }

    #[test]
    fn test_describe_partial_record() {
        assert_eq!(record("K1ABC", "", "").describe(), "(K1ABC)");
        assert_eq!(record("K1ABC", "", "Boston").describe(), "(K1ABC in Boston)");
        assert_eq!(record(" ", "", "").describe(), "(unknown)");
    }

    #[test]
    fn test_only_blocked_is_denied() {
        assert!(!Classification::Blocked.permitted());
        assert!(Classification::Personal.permitted());
        assert!(Classification::Private.permitted());
        assert!(Classification::Echolink.permitted());
        assert!(Classification::Public.permitted());
    }

    #[test]
    fn test_precedence_follows_declaration_order() {
        assert!(Classification::Blocked < Classification::Personal);
        assert!(Classification::Personal < Classification::Private);
        assert!(Classification::Private < Classification::Echolink);
        assert!(Classification::Echolink < Classification::Public);
    }
}
