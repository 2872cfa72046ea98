//! Process settings taken from the environment.
//!
//! The host passes only the three positional arguments, so everything else the
//! adapter can be tuned with comes from `QUOTE_ADAPTER_*` variables.
use std::path::PathBuf;
use std::time::Duration;

use adapter_common::net::PROVIDER_BASE_URL;

/// Provider base URL override.
pub const BASE_URL_VAR: &str = "QUOTE_ADAPTER_BASE_URL";
/// HTTP timeout in seconds.
pub const TIMEOUT_VAR: &str = "QUOTE_ADAPTER_TIMEOUT_SECS";
/// Directory of the log file.
pub const LOG_DIR_VAR: &str = "QUOTE_ADAPTER_LOG_DIR";
/// Number of previous runs' log files kept by rotation.
pub const LOG_KEEP_VAR: &str = "QUOTE_ADAPTER_LOG_KEEP";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_KEEP: usize = 5;

/// Settings of one adapter run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the market-data provider.
    pub base_url: String,
    /// Upper bound for the provider request.
    pub timeout: Duration,
    /// Directory holding `adapter.log` and its rotated predecessors.
    pub log_dir: PathBuf,
    /// Previous runs' log files kept next to the current one.
    pub log_keep: usize,
    /// Values that were ignored, reported once logging is up.
    pub warnings: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: String::from(PROVIDER_BASE_URL),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            log_keep: DEFAULT_LOG_KEEP,
            warnings: Vec::new(),
        }
    }
}

impl Settings {
    /// Reads the settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the settings through `lookup`, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let value = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(base_url) = value(BASE_URL_VAR) {
            settings.base_url = base_url;
        }
        if let Some(dir) = value(LOG_DIR_VAR) {
            settings.log_dir = PathBuf::from(dir);
        }
        if let Some(raw) = value(TIMEOUT_VAR) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.timeout = Duration::from_secs(secs),
                _ => settings
                    .warnings
                    .push(format!("Ignoring {}={:?}, using {}s", TIMEOUT_VAR, raw, DEFAULT_TIMEOUT_SECS)),
            }
        }
        if let Some(raw) = value(LOG_KEEP_VAR) {
            match raw.parse::<usize>() {
                Ok(keep) => settings.log_keep = keep,
                _ => settings
                    .warnings
                    .push(format!("Ignoring {}={:?}, keeping {}", LOG_KEEP_VAR, raw, DEFAULT_LOG_KEEP)),
            }
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.base_url, "https://api.finage.co.uk");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.log_keep, 5);
    }

    #[test]
    fn reads_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (BASE_URL_VAR, "http://127.0.0.1:9000"),
            (TIMEOUT_VAR, "5"),
            (LOG_DIR_VAR, "/tmp/adapter"),
            (LOG_KEEP_VAR, "2"),
        ]));
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.log_dir, PathBuf::from("/tmp/adapter"));
        assert_eq!(settings.log_keep, 2);
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn invalid_numbers_fall_back_with_warning() {
        let settings = Settings::from_lookup(lookup(&[(TIMEOUT_VAR, "soon"), (LOG_KEEP_VAR, "-1")]));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.log_keep, 5);
        assert_eq!(settings.warnings.len(), 2);
    }

    #[test]
    fn zero_keeps_no_previous_logs() {
        let settings = Settings::from_lookup(lookup(&[(LOG_KEEP_VAR, "0")]));
        assert_eq!(settings.log_keep, 0);
        assert!(settings.warnings.is_empty());
    }

    #[test]
    fn blank_values_are_ignored() {
        let settings = Settings::from_lookup(lookup(&[(BASE_URL_VAR, "  ")]));
        assert_eq!(settings.base_url, PROVIDER_BASE_URL);
    }
}
