use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: String },

    #[error("Invalid configuration document: {message}")]
    ConfigParse { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Notification request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Notification rejected: HTTP {status}: {body}")]
    NotificationRejected { status: u16, body: String },

    #[error("Link command failed: {message}")]
    LinkCommandError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl HookError {
    pub fn exit_code(&self) -> u8 {
        match self {
            HookError::UsageError { .. } => 2,
            _ => 1,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HookError::ConfigNotFound { path } => {
                format!("Configuration file '{}' does not exist", path)
            }
            HookError::ConfigParse { .. } => {
                format!("{}. Check the TOML syntax of the config file", self)
            }
            HookError::InvalidConfigValue { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_exit_code() {
        let err = HookError::ConfigNotFound {
            path: "/nope.toml".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("/nope.toml"));
    }

    #[test]
    fn test_invalid_value_message_names_field() {
        let err = HookError::InvalidConfigValue {
            field: "pushover.retry".to_string(),
            value: "<unset>".to_string(),
            reason: "required when priority = 2".to_string(),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.user_friendly_message(),
            "Setting 'pushover.retry' is invalid: required when priority = 2"
        );
    }

    #[test]
    fn test_usage_error_exit_code() {
        let err = HookError::UsageError {
            message: "missing node".to_string(),
        };
        assert_eq!(err.exit_code(), 2);
    }
}
