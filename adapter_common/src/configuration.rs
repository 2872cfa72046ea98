//! Per-invocation configuration of the adapter.
use std::fmt;

use crate::instance::AdapterInstance;
use crate::Result;

/// Identifier key holding the stock ticker.
pub const TICKER: &str = "ticker";
/// Credential field holding the provider API key.
pub const API_KEY: &str = "apiKey";
/// Identifier key read by the host to size the adapter container.
pub const MEMORY_LIMIT: &str = "container_memory_limit";
/// Default container memory limit in MB.
pub const DEFAULT_MEMORY_LIMIT: i64 = 1024;

/// Ticker and API key the host configured for this adapter instance.
#[derive(Clone, PartialEq)]
pub struct Configuration {
    /// Stock symbol to quote.
    pub ticker: String,
    /// Provider API key. Kept out of `Debug` output.
    pub api_key: String,
}

impl Configuration {
    /// Creates a configuration from explicit values.
    pub fn new(ticker: &str, api_key: &str) -> Self {
        Configuration {
            ticker: String::from(ticker),
            api_key: String::from(api_key),
        }
    }

    /// Extracts the configuration from the adapter instance.
    pub fn from_instance(instance: &AdapterInstance) -> Result<Self> {
        let ticker = instance.identifier_value(TICKER)?;
        let api_key = instance.credential_value(API_KEY)?;
        Ok(Self::new(ticker, api_key))
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("ticker", &self.ticker)
            .field("api_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdapterError;

    fn instance(json: &str) -> AdapterInstance {
        AdapterInstance::from_reader(json.as_bytes()).unwrap()
    }

    #[test]
    fn reads_ticker_and_key() {
        let config = Configuration::from_instance(&instance(
            r#"{"adapter_key": {"name": "q", "adapter_kind": "k", "object_kind": "o",
                "identifiers": [{"key": "ticker", "value": "MSFT"}]},
               "credential_config": {"credential_key": "credential",
                "credential_fields": [{"key": "apiKey", "value": "abc"}]}}"#,
        ))
        .unwrap();
        assert_eq!(config, Configuration::new("MSFT", "abc"));
    }

    #[test]
    fn missing_ticker_is_reported() {
        let err = Configuration::from_instance(&instance(
            r#"{"adapter_key": {"name": "q", "adapter_kind": "k", "object_kind": "o"}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, AdapterError::MissingIdentifier(ref k) if k == TICKER));
    }

    #[test]
    fn debug_hides_the_key() {
        let shown = format!("{:?}", Configuration::new("ABC", "top-secret"));
        assert!(shown.contains("ABC"));
        assert!(!shown.contains("top-secret"));
    }
}
