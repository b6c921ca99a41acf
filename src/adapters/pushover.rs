use crate::config::settings::EMERGENCY_PRIORITY;
use crate::config::PushoverSettings;
use crate::domain::model::Notification;
use crate::domain::ports::Notifier;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Body of a Pushover `messages.json` reply.
#[derive(Debug, Deserialize)]
struct PushoverReply {
    request: Option<String>,
    #[serde(default)]
    errors: Vec<String>,
}

/// Pushover explains rejections in an `errors` array; fall back to the raw body.
fn rejection_reason(body: &str) -> String {
    match serde_json::from_str::<PushoverReply>(body) {
        Ok(reply) if !reply.errors.is_empty() => reply.errors.join("; "),
        _ => body.trim().to_string(),
    }
}

pub struct PushoverNotifier {
    settings: PushoverSettings,
    client: Client,
}

impl PushoverNotifier {
    pub fn new(settings: PushoverSettings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { settings, client })
    }

    fn form(&self, notification: &Notification) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("token", self.settings.api_token.clone()),
            ("user", self.settings.user_key.clone()),
            ("title", notification.title.clone()),
            ("message", notification.message.clone()),
        ];
        if let Some(priority) = self.settings.priority {
            form.push(("priority", priority.to_string()));
            if priority == EMERGENCY_PRIORITY {
                if let (Some(retry), Some(expire)) = (self.settings.retry, self.settings.expire) {
                    form.push(("retry", retry.to_string()));
                    form.push(("expire", expire.to_string()));
                }
            }
        }
        if let Some(sound) = &self.settings.sound {
            form.push(("sound", sound.clone()));
        }
        form
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, notification: &Notification) -> Result<()> {
        tracing::debug!("Sending Pushover notification: {}", notification.message);

        let response = self
            .client
            .post(&self.settings.api_url)
            .form(&self.form(notification))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Pushover response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HookError::NotificationRejected {
                status: status.as_u16(),
                body: rejection_reason(&body),
            });
        }

        match response.json::<PushoverReply>().await {
            Ok(reply) => tracing::debug!(
                "Pushover accepted request {}",
                reply.request.as_deref().unwrap_or("-")
            ),
            Err(e) => tracing::debug!("Pushover reply not understood: {}", e),
        }

        Ok(())
    }
}
