use crate::utils::error::{HookError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> HookError {
    HookError::InvalidConfigValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// Notification endpoints must be absolute http(s) URLs.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| invalid(field_name, url_str, format!("not an absolute URL ({})", e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("push endpoint must use http or https, not {}", scheme),
        )),
    }
}

/// Only rejects paths the OS could never open; existence is checked at load time.
pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field_name, path, "file path is empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field_name, path.escape_default(), "file path contains a NUL byte"));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field_name, value, "must not be blank"));
    }
    Ok(())
}

/// `value` must be set because of another setting, named in `because`.
pub fn validate_required_for<T: Copy>(field_name: &str, value: Option<T>, because: &str) -> Result<T> {
    value.ok_or_else(|| invalid(field_name, "<unset>", format!("required when {}", because)))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field_name, value, format!("expected {}..={}", min, max)));
    }
    Ok(())
}
