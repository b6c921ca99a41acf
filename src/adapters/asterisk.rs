use crate::config::AsteriskConfig;
use crate::domain::model::NodeId;
use crate::domain::ports::LinkController;
use crate::utils::error::{HookError, Result};
use async_trait::async_trait;
use tokio::process::Command;

/// Drives app_rpt through the Asterisk CLI.
pub struct AsteriskLink {
    binary: String,
}

impl AsteriskLink {
    pub fn new(config: &AsteriskConfig) -> Self {
        Self {
            binary: config.binary.clone(),
        }
    }

    /// `rpt fun <local> *1<remote>` is the DTMF function that drops one link.
    pub fn disconnect_command(local: NodeId, remote: NodeId) -> String {
        format!("rpt fun {} *1{}", local, remote)
    }
}

#[async_trait]
impl LinkController for AsteriskLink {
    async fn disconnect(&self, local: NodeId, remote: NodeId) -> Result<()> {
        let command = Self::disconnect_command(local, remote);
        tracing::debug!("Running {} -rx \"{}\"", self.binary, command);

        let output = Command::new(&self.binary)
            .arg("-rx")
            .arg(&command)
            .output()
            .await
            .map_err(|e| HookError::LinkCommandError {
                message: format!("failed to start {}: {}", self.binary, e),
            })?;

        if !output.status.success() {
            return Err(HookError::LinkCommandError {
                message: format!(
                    "{} exited with {}: {}",
                    self.binary,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(())
    }
}
