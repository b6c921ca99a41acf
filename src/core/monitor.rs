use crate::adapters::NodeDatabase;
use crate::config::Settings;
use crate::core::message;
use crate::core::policy::classify;
use crate::domain::model::{Classification, ConnectionEvent, Outcome};
use crate::domain::ports::{LinkController, Notifier};

/// Runs one connection event through policy: classify, drop blocked
/// links, then announce.
pub struct NodeMonitor<'a, N: Notifier, L: LinkController> {
    settings: &'a Settings,
    node_db: NodeDatabase,
    notifier: Option<N>,
    link: L,
}

impl<'a, N: Notifier, L: LinkController> NodeMonitor<'a, N, L> {
    pub fn new(settings: &'a Settings, node_db: NodeDatabase, notifier: Option<N>, link: L) -> Self {
        Self {
            settings,
            node_db,
            notifier,
            link,
        }
    }

    /// Never fails: link and delivery errors are logged and reflected in
    /// the returned [`Outcome`].
    pub async fn handle(&self, event: &ConnectionEvent) -> Outcome {
        let policy = &self.settings.policy;
        let classification = classify(&self.settings.nodes, event.remote);
        tracing::info!(
            "Node {} {} node {} (classification: {})",
            event.remote,
            event.kind,
            event.local,
            classification
        );

        let mut disconnected = false;
        if classification == Classification::Blocked {
            if policy.disconnect_blocked {
                match self.link.disconnect(event.local, event.remote).await {
                    Ok(()) => {
                        tracing::info!("🚫 Disconnected blocked node {} from {}", event.remote, event.local);
                        disconnected = true;
                    }
                    Err(e) => tracing::error!("Failed to disconnect blocked node {}: {}", event.remote, e),
                }
            } else {
                tracing::warn!("Blocked node {} seen but disconnect_blocked is off", event.remote);
            }
        }

        let notified = if policy.should_announce(classification) {
            self.announce(event, classification, disconnected).await
        } else {
            tracing::debug!("Policy does not announce {} nodes", classification);
            false
        };

        Outcome {
            classification,
            permitted: classification.permitted(),
            disconnected,
            notified,
        }
    }

    async fn announce(&self, event: &ConnectionEvent, classification: Classification, disconnected: bool) -> bool {
        let notifier = match (&self.notifier, self.settings.notifications_enabled()) {
            (Some(notifier), true) => notifier,
            _ => {
                tracing::debug!("Notifications disabled, nothing sent");
                return false;
            }
        };

        let notification = message::compose(
            event,
            classification,
            disconnected,
            self.settings.nodes.echolink,
            |node| self.node_db.describe(node),
            &chrono::Local::now(),
        );

        match notifier.send(&notification).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to send notification: {}", e);
                false
            }
        }
    }
}
