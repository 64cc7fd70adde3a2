//! Run configuration.
//!
//! Settings may come from an optional TOML file; command-line values take
//! precedence over it.

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::Settings;

use url::Url;

/// Returns `value`, or [`ConfigError::MissingValue`] naming the setting.
///
/// # Errors
///
/// Returns [`ConfigError::MissingValue`] if `value` is `None`.
pub fn require<T>(value: Option<T>, name: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingValue { name })
}

/// Parses a GitHub API base URL.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidApiUrl`] unless the URL is absolute http(s).
pub fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidApiUrl {
        url: value.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiUrl {
            url: value.to_string(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(url)
}
