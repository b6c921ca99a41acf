use crate::domain::model::{Notification, NodeId};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Push delivery of an operator alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Control over the local node's links.
#[async_trait]
pub trait LinkController: Send + Sync {
    async fn disconnect(&self, local: NodeId, remote: NodeId) -> Result<()>;
}
