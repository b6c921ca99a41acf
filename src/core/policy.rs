use crate::config::{NodeGroups, Policy};
use crate::domain::model::{Classification, NodeId};

/// Places `remote` in exactly one group. Blocked is checked first so no
/// other membership can lift a block.
pub fn classify(groups: &NodeGroups, remote: NodeId) -> Classification {
    if groups.blocked_nodes.contains(&remote) {
        Classification::Blocked
    } else if groups.personal_nodes.contains(&remote) {
        Classification::Personal
    } else if groups.private_nodes.contains(&remote) {
        Classification::Private
    } else if groups.echolink == Some(remote) {
        Classification::Echolink
    } else {
        Classification::Public
    }
}

impl Policy {
    pub fn should_announce(&self, classification: Classification) -> bool {
        match classification {
            Classification::Blocked => self.announce_blocked,
            Classification::Personal => self.announce_personal,
            Classification::Private => self.announce_private,
            Classification::Echolink | Classification::Public => self.announce_public,
        }
    }
}
