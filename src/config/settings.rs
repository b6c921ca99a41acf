use crate::domain::model::NodeId;
use crate::utils::error::{HookError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/asl-connection-hooks/config.toml";
pub const DEFAULT_PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";
const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]+)\}";

/// Pushover priority that repeats until acknowledged; needs `retry` and `expire`.
pub const EMERGENCY_PRIORITY: i8 = 2;

/// Operator-configured node groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeGroups {
    #[serde(alias = "my_nodes")]
    pub personal_nodes: Vec<NodeId>,
    pub private_nodes: Vec<NodeId>,
    pub blocked_nodes: Vec<NodeId>,
    /// Local node that fronts the EchoLink gateway, if any.
    pub echolink: Option<NodeId>,
}

/// Which classifications get a push, and whether blocked nodes are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub announce_blocked: bool,
    pub announce_personal: bool,
    pub announce_private: bool,
    pub announce_public: bool,
    pub disconnect_blocked: bool,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            announce_blocked: true,
            announce_personal: true,
            announce_private: false,
            announce_public: true,
            disconnect_blocked: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteriskConfig {
    pub binary: String,
}

impl Default for AsteriskConfig {
    fn default() -> Self {
        Self {
            binary: "asterisk".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub node_db: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PushoverConfig {
    pub enabled: bool,
    pub api_token: Option<String>,
    pub user_key: Option<String>,
    pub api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub priority: Option<i8>,
    pub retry: Option<u32>,
    pub expire: Option<u32>,
    pub sound: Option<String>,
}

/// The document as written on disk, before defaults are resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSettings {
    #[serde(default)]
    pub nodes: NodeGroups,
    pub paths: PathsConfig,
    pub pushover: Option<PushoverConfig>,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default)]
    pub asterisk: AsteriskConfig,
}

/// Resolved Pushover delivery settings; only present when delivery is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushoverSettings {
    pub api_url: String,
    pub api_token: String,
    pub user_key: String,
    pub timeout: Duration,
    pub priority: Option<i8>,
    /// Seconds between emergency repeats.
    pub retry: Option<u32>,
    /// Seconds until emergency repeats stop.
    pub expire: Option<u32>,
    pub sound: Option<String>,
}

/// Validated, immutable configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub nodes: NodeGroups,
    pub node_db: PathBuf,
    pub pushover: Option<PushoverSettings>,
    pub policy: Policy,
    pub asterisk: AsteriskConfig,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HookError::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => HookError::ConfigParse {
                message: format!("cannot read {}: {}", path.display(), e),
            },
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        let raw: RawSettings = toml::from_str(&processed).map_err(|e| HookError::ConfigParse {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Single pass that applies defaults and rejects bad values.
    pub fn from_raw(raw: RawSettings) -> Result<Self> {
        let node_db = raw.paths.node_db;
        validation::validate_path("paths.node_db", &node_db.to_string_lossy())?;
        validation::validate_non_empty_string("asterisk.binary", &raw.asterisk.binary)?;

        let mut nodes = raw.nodes;
        nodes.echolink = nodes.echolink.filter(|id| *id != 0);

        let pushover = match raw.pushover {
            Some(cfg) => resolve_pushover(cfg)?,
            None => {
                tracing::debug!("No [pushover] section, notifications disabled");
                None
            }
        };

        let settings = Self {
            nodes,
            node_db,
            pushover,
            policy: raw.policy,
            asterisk: raw.asterisk,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn notifications_enabled(&self) -> bool {
        self.pushover.is_some()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(pushover) = &self.pushover {
            validation::validate_url("pushover.api_url", &pushover.api_url)?;
            if let Some(priority) = pushover.priority {
                validation::validate_range("pushover.priority", priority, -2, EMERGENCY_PRIORITY)?;
            }
            if pushover.priority == Some(EMERGENCY_PRIORITY) {
                // 緊急優先級：Pushover 要求 retry/expire
                let retry = validation::validate_required_for("pushover.retry", pushover.retry, "priority = 2")?;
                let expire = validation::validate_required_for("pushover.expire", pushover.expire, "priority = 2")?;
                validation::validate_range("pushover.retry", retry, 30, 10800)?;
                validation::validate_range("pushover.expire", expire, retry, 10800)?;
            }
            validation::validate_range(
                "pushover.timeout_seconds",
                pushover.timeout.as_secs(),
                1,
                120,
            )?;
        }
        Ok(())
    }
}

fn resolve_pushover(cfg: PushoverConfig) -> Result<Option<PushoverSettings>> {
    if !cfg.enabled {
        tracing::debug!("Pushover disabled in configuration");
        return Ok(None);
    }

    // 未替換的 ${VAR} 視同未設定
    let placeholder = placeholder_regex()?;
    let credential = |field: &str, value: Option<String>| match value {
        Some(v) if placeholder.is_match(&v) => {
            tracing::warn!("pushover.{} still holds unresolved placeholder {}", field, v.trim());
            None
        }
        other => other.filter(|v| !v.trim().is_empty()),
    };
    let api_token = credential("api_token", cfg.api_token);
    let user_key = credential("user_key", cfg.user_key);
    let (api_token, user_key) = match (api_token, user_key) {
        (Some(token), Some(user)) => (token, user),
        _ => {
            tracing::warn!("Pushover enabled but api_token/user_key missing, notifications disabled");
            return Ok(None);
        }
    };

    Ok(Some(PushoverSettings {
        api_url: cfg.api_url.unwrap_or_else(|| DEFAULT_PUSHOVER_URL.to_string()),
        api_token,
        user_key,
        timeout: Duration::from_secs(cfg.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
        priority: cfg.priority,
        retry: cfg.retry,
        expire: cfg.expire,
        sound: cfg.sound.filter(|s| !s.trim().is_empty()),
    }))
}

fn placeholder_regex() -> Result<Regex> {
    Regex::new(PLACEHOLDER_PATTERN).map_err(|e| HookError::ConfigParse {
        message: e.to_string(),
    })
}

/// Replaces `${VAR}` with the environment value; unset variables stay verbatim.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = placeholder_regex()?;

    let result = re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    });

    Ok(result.into_owned())
}
