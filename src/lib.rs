pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{AsteriskLink, NodeDatabase, PushoverNotifier};
pub use config::{CliArgs, Settings};
pub use self::core::{classify, NodeMonitor};
pub use utils::error::{HookError, Result};
