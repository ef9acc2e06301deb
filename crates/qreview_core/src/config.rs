//! Configuration loading from environment variables.

use crate::constants::DEFAULT_API_URL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration for QReview clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the review API, without a trailing slash.
    pub api_url: String,
    /// JSON file backing durable client storage (filters, last image page).
    pub state_path: PathBuf,
    /// Per-request timeout. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// `HOME`, then `USERPROFILE`, then the working directory.
fn home_dir() -> Option<PathBuf> {
    non_blank_var("HOME")
        .or_else(|| non_blank_var("USERPROFILE"))
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
}

/// Resolve a leading `~/` against [`home_dir`].
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

/// Interpret an on/off environment value.
///
/// `1`/`true`/`yes`/`on` enable and `0`/`false`/`no`/`off` (or blank) disable,
/// case-insensitively. Anything else yields `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    const ON: [&str; 4] = ["1", "true", "yes", "on"];
    const OFF: [&str; 5] = ["", "0", "false", "no", "off"];
    let value = value.trim().to_ascii_lowercase();
    if ON.contains(&value.as_str()) {
        Some(true)
    } else if OFF.contains(&value.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// True only when `name` is set to a recognized enabling value.
pub fn env_flag_enabled(name: &str) -> bool {
    env::var(name)
        .ok()
        .and_then(|value| parse_env_flag(&value))
        .unwrap_or(false)
}

/// Strip trailing slashes and surrounding whitespace from an API base URL.
///
/// # Returns
/// The normalized URL, or [`DEFAULT_API_URL`] when the input is blank.
pub fn normalize_api_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

fn default_state_path() -> PathBuf {
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/qreview/state.json")
}

impl Config {
    /// Read `QREVIEW_API_URL`, `QREVIEW_STATE_PATH`, and
    /// `QREVIEW_REQUEST_TIMEOUT_SECS`, falling back to defaults for unset values.
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("QREVIEW_API_URL")
                .map(|value| normalize_api_url(&value))
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            state_path: non_blank_var("QREVIEW_STATE_PATH")
                .map(|value| expand_home(&value))
                .unwrap_or_else(default_state_path),
            request_timeout: env::var("QREVIEW_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{env_lock, EnvGuard};

    #[test]
    fn env_flag_values() {
        for (raw, expected) in [
            ("1", Some(true)),
            (" Yes ", Some(true)),
            ("ON", Some(true)),
            ("", Some(false)),
            ("off", Some(false)),
            ("False", Some(false)),
            ("maybe", None),
        ] {
            assert_eq!(parse_env_flag(raw), expected, "value: {:?}", raw);
        }
    }

    #[test]
    fn state_path_expands_home_prefix() {
        let _lock = env_lock().lock().expect("env lock");
        let _home = EnvGuard::set("HOME", "/home/reviewer");
        let _state = EnvGuard::set("QREVIEW_STATE_PATH", "~/review/state.json");

        let config = Config::from_env();
        assert_eq!(
            config.state_path,
            PathBuf::from("/home/reviewer/review/state.json")
        );
    }

    #[test]
    fn normalize_api_url_strips_trailing_slashes() {
        assert_eq!(normalize_api_url("http://host:5000///"), "http://host:5000");
        assert_eq!(normalize_api_url("  "), DEFAULT_API_URL);
    }

    #[test]
    fn from_env_reads_overrides() {
        let _lock = env_lock().lock().expect("env lock");
        let _url = EnvGuard::set("QREVIEW_API_URL", "http://review.local:9000/");
        let _state = EnvGuard::set("QREVIEW_STATE_PATH", "/tmp/qreview-state.json");
        let _timeout = EnvGuard::set("QREVIEW_REQUEST_TIMEOUT_SECS", "12");

        let config = Config::from_env();
        assert_eq!(config.api_url, "http://review.local:9000");
        assert_eq!(config.state_path, PathBuf::from("/tmp/qreview-state.json"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn from_env_defaults_when_unset() {
        let _lock = env_lock().lock().expect("env lock");
        let _url = EnvGuard::remove("QREVIEW_API_URL");
        let _timeout = EnvGuard::set("QREVIEW_REQUEST_TIMEOUT_SECS", "0");
        let _home = EnvGuard::set("HOME", "/home/reviewer");
        let _state = EnvGuard::remove("QREVIEW_STATE_PATH");

        let config = Config::from_env();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(
            config.state_path,
            PathBuf::from("/home/reviewer/.config/qreview/state.json")
        );
    }
}
