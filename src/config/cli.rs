use crate::config::settings::DEFAULT_CONFIG_PATH;
use crate::domain::model::{ConnectionEvent, EventKind, NodeId};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Arguments passed by the node's connect/disconnect hook:
/// `asl-connection-hooks <status> <my_node> <their_node>`.
#[derive(Debug, Clone, Parser)]
#[command(name = "asl-connection-hooks")]
#[command(about = "AllStar node connection monitor")]
pub struct CliArgs {
    /// Connection status (1=connected, 0=disconnected)
    pub conn_status: u8,

    /// Local node number
    pub my_node: NodeId,

    /// Remote node number
    pub their_node: NodeId,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    pub fn event(&self) -> Result<ConnectionEvent> {
        Ok(ConnectionEvent {
            kind: EventKind::try_from(self.conn_status)?,
            local: self.my_node,
            remote: self.their_node,
        })
    }
}
