pub mod cli;
pub mod settings;

pub use cli::CliArgs;
pub use settings::{
    AsteriskConfig, NodeGroups, Policy, PushoverSettings, Settings, DEFAULT_CONFIG_PATH,
};
