//! The four operations the host can run.
//!
//! `test` and `collect` never fail outward: whatever goes wrong while talking to the
//! provider ends up as the error message of the returned result. Only the definition
//! can fail as a whole, and the dispatcher treats that as fatal.
use adapter_common::configuration::{API_KEY, DEFAULT_MEMORY_LIMIT, MEMORY_LIMIT, TICKER};
use adapter_common::definition::AdapterDefinition;
use adapter_common::report::{CollectResult, EndpointResult, Metric, TestResult};
use adapter_common::{AdapterError, Configuration, Result};
use chrono::Utc;
use log::{debug, error, info};
use reqwest::StatusCode;

use crate::market::MarketClient;
use crate::timer::Timings;

/// Adapter kind registered with the host.
pub const ADAPTER_KIND: &str = "StockQuoteAdapter";
/// Human readable adapter name.
pub const ADAPTER_NAME: &str = "Stock Quote Adapter";
/// Object kind of the collected quotes.
pub const QUOTE_KIND: &str = "Quote";
/// Metric keys of a quote.
pub const BID: &str = "bid";
pub const ASK: &str = "ask";

const TEST_ERROR: &str = "Unexpected connection test error";
const COLLECT_ERROR: &str = "Unexpected collection error";

/// Runs adapter operations against one market-data client.
pub struct Adapter {
    market: MarketClient,
    timings: Timings,
}

impl Adapter {
    pub fn new(market: MarketClient) -> Self {
        Adapter {
            market,
            timings: Timings::new(),
        }
    }

    /// Gives up the adapter, keeping the timings of the operations it ran.
    pub fn into_timings(self) -> Timings {
        self.timings
    }

    /// Builds the adapter definition: credential, instance parameters and the quote object type.
    pub fn describe_schema(&mut self) -> Result<AdapterDefinition> {
        let definition = self.timings.time("Get Adapter Definition", build_definition);
        if let Err(e) = &definition {
            error!("Cannot build adapter definition: {}", e);
        }
        definition
    }

    /// Checks that the provider answers 200 for the configured ticker and key.
    pub fn test_connection(&mut self, config: &Configuration) -> TestResult {
        let market = &self.market;
        let result = self.timings.time("Test", || {
            let mut result = TestResult::default();
            match market.check_status(config) {
                Ok(StatusCode::OK) => info!("Connection test passed for {}", config.ticker),
                Ok(status) => {
                    error!("Connection test got HTTP {}", status.as_u16());
                    result.with_error(format!("Error connecting to market: HTTP {}", status.as_u16()));
                }
                Err(e) => {
                    error!("{}", TEST_ERROR);
                    error!("{}", e);
                    result.with_error(format!("{}: {}", TEST_ERROR, e));
                }
            }
            result
        });
        log_result("test result", &result);
        result
    }

    /// Fetches the last quote and reports it as one `Quote` object with bid and ask metrics.
    pub fn collect(&mut self, config: &Configuration) -> CollectResult {
        let market = &self.market;
        let result = self.timings.time("Collection", || {
            let mut result = CollectResult::default();
            match market.last_quote(config) {
                Ok(quote) => {
                    let timestamp = Utc::now().timestamp_millis();
                    let object = result.object(ADAPTER_KIND, QUOTE_KIND, &config.ticker);
                    object.add_metric(Metric::new(BID, quote.bid, timestamp));
                    object.add_metric(Metric::new(ASK, quote.ask, timestamp));
                    info!("Collected {} bid={} ask={}", config.ticker, quote.bid, quote.ask);
                }
                Err(e) => {
                    error!("{}", COLLECT_ERROR);
                    error!("{}", e);
                    result.with_error(format!("{}: {}", COLLECT_ERROR, e));
                }
            }
            result
        });
        log_result("collection result", &result);
        result
    }

    /// Lists the URLs whose certificates the host should fetch.
    ///
    /// The provider is reached over public TLS, so nothing is declared here.
    pub fn list_endpoints(&mut self, config: Option<&Configuration>) -> EndpointResult {
        match config {
            Some(config) => debug!("No endpoints declared for ticker {}", config.ticker),
            None => debug!("No endpoints declared, configuration unavailable"),
        }
        let result = self.timings.time("Get Endpoints", EndpointResult::default);
        log_result("endpoints", &result);
        result
    }
}

/// Test result for a configuration that could not be loaded.
pub fn test_failure(err: &AdapterError) -> TestResult {
    error!("{}: {}", TEST_ERROR, err);
    let mut result = TestResult::default();
    result.with_error(format!("{}: {}", TEST_ERROR, err));
    result
}

/// Collection result for a configuration that could not be loaded.
pub fn collect_failure(err: &AdapterError) -> CollectResult {
    error!("{}: {}", COLLECT_ERROR, err);
    let mut result = CollectResult::default();
    result.with_error(format!("{}: {}", COLLECT_ERROR, err));
    result
}

fn build_definition() -> Result<AdapterDefinition> {
    let mut definition = AdapterDefinition::new(ADAPTER_KIND, ADAPTER_NAME);

    // The API key is a credential so the host keeps it in its secret store.
    definition
        .define_credential_type("credential", "API Key")?
        .define_password_parameter(API_KEY, "API Secret Key")?;

    definition.define_string_parameter(TICKER, "Ticker", "Stock ticker symbol", true)?;

    // Read by the host to size the adapter container, never by the adapter itself.
    definition
        .define_int_parameter(
            MEMORY_LIMIT,
            "Adapter Memory Limit (MB)",
            "Sets the maximum amount of memory the host can allocate to the container running this adapter instance.",
            true,
            Some(DEFAULT_MEMORY_LIMIT),
        )?
        .advanced();

    let quote = definition.define_object_type(QUOTE_KIND, "Quote")?;
    quote.define_metric(BID, "bid", None)?;
    quote.define_metric(ASK, "ask", None)?;

    Ok(definition)
}

fn log_result<T: serde::Serialize>(what: &str, result: &T) {
    match serde_json::to_string(result) {
        Ok(json) => debug!("Returning {}: {}", what, json),
        Err(e) => debug!("Returning {} (not serializable: {})", what, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter_common::definition::ParameterType;
    use mockito::Matcher;
    use std::time::Duration;

    fn adapter_for(server: &mockito::Server) -> Adapter {
        Adapter::new(MarketClient::new(&server.url(), Duration::from_secs(5)).unwrap())
    }

    fn offline_adapter() -> Adapter {
        Adapter::new(MarketClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap())
    }

    fn quote_mock(server: &mut mockito::Server, status: usize, body: &str) -> mockito::Mock {
        server
            .mock("GET", "/last/stock/ABC")
            .match_query(Matcher::UrlEncoded("apikey".into(), "key".into()))
            .with_status(status)
            .with_body(body)
            .create()
    }

    fn config() -> Configuration {
        Configuration::new("ABC", "key")
    }

    #[test]
    fn definition_declares_the_configuration_surface() {
        let definition = offline_adapter().describe_schema().unwrap();

        assert_eq!(definition.adapter_key, ADAPTER_KIND);
        assert_eq!(definition.credential_types.len(), 1);
        let credential = &definition.credential_types[0];
        assert_eq!(credential.fields.len(), 1);
        assert_eq!(credential.fields[0].key, "apiKey");
        assert!(credential.fields[0].password);

        let identifiers = &definition.adapter_instance.identifiers;
        assert_eq!(identifiers.len(), 2);
        let ticker = definition.parameter("ticker").unwrap();
        assert_eq!(ticker.kind, ParameterType::String);
        assert!(ticker.required);
        assert!(!ticker.advanced);
        let memory = definition.parameter("container_memory_limit").unwrap();
        assert_eq!(memory.kind, ParameterType::Integer);
        assert!(memory.advanced);
        assert_eq!(memory.default, Some(serde_json::json!(1024)));

        assert_eq!(definition.object_types.len(), 1);
        let quote = &definition.object_types[0];
        assert_eq!(quote.key, "Quote");
        let metrics: Vec<&str> = quote.metrics().map(|m| m.key.as_str()).collect();
        assert_eq!(metrics, vec!["bid", "ask"]);
    }

    #[test]
    fn definition_is_timed() {
        let mut adapter = offline_adapter();
        adapter.describe_schema().unwrap();
        assert_eq!(adapter.into_timings().entries()[0].0, "Get Adapter Definition");
    }

    #[test]
    fn test_passes_on_200_whatever_the_body() {
        let mut server = mockito::Server::new();
        let mock = quote_mock(&mut server, 200, "not json at all");
        let result = adapter_for(&server).test_connection(&config());
        mock.assert();
        assert!(result.is_success());
    }

    #[test]
    fn test_fails_on_other_status() {
        for status in [201, 401, 404, 500] {
            let mut server = mockito::Server::new();
            quote_mock(&mut server, status, r#"{"bid":1,"ask":2}"#);
            let result = adapter_for(&server).test_connection(&config());
            let message = result.error_message.unwrap();
            assert!(message.starts_with("Error connecting to market"), "{}", message);
            assert!(message.contains(&status.to_string()));
        }
    }

    #[test]
    fn test_reports_network_fault() {
        let result = offline_adapter().test_connection(&config());
        let message = result.error_message.unwrap();
        assert!(message.starts_with("Unexpected connection test error: "));
        assert!(!message.contains("key="));
    }

    #[test]
    fn collect_reports_quote() {
        let mut server = mockito::Server::new();
        quote_mock(&mut server, 200, r#"{"bid": 10.5, "ask": 10.7}"#);

        let result = adapter_for(&server).collect(&config());

        assert!(result.error_message.is_none());
        assert_eq!(result.result.len(), 1);
        let quote = &result.result[0];
        assert_eq!(quote.key.name, "ABC");
        assert_eq!(quote.key.object_kind, "Quote");
        assert_eq!(quote.key.adapter_kind, ADAPTER_KIND);
        assert_eq!(quote.metrics.len(), 2);
        assert_eq!(quote.metric("bid"), Some(10.5));
        assert_eq!(quote.metric("ask"), Some(10.7));
        assert!(quote.metrics[0].timestamp > 0);
    }

    #[test]
    fn collect_ignores_unexpected_types_in_other_keys() {
        let mut server = mockito::Server::new();
        quote_mock(
            &mut server,
            200,
            r#"{"symbol": 42, "bid": 10.5, "ask": 10.7, "asize": "3", "timestamp": 1700000000000.5}"#,
        );

        let result = adapter_for(&server).collect(&config());

        assert!(result.error_message.is_none());
        assert_eq!(result.result.len(), 1);
        assert_eq!(result.result[0].metric("bid"), Some(10.5));
        assert_eq!(result.result[0].metric("ask"), Some(10.7));
    }

    #[test]
    fn collect_rejects_missing_fields() {
        for body in [r#"{"bid": 10.5}"#, r#"{"ask": 10.7}"#, "{}", "oops"] {
            let mut server = mockito::Server::new();
            quote_mock(&mut server, 200, body);
            let result = adapter_for(&server).collect(&config());
            assert!(result.result.is_empty(), "{}", body);
            assert!(result
                .error_message
                .unwrap()
                .starts_with("Unexpected collection error: "));
        }
    }

    #[test]
    fn collect_rejects_error_status() {
        let mut server = mockito::Server::new();
        quote_mock(&mut server, 403, r#"{"bid": 10.5, "ask": 10.7}"#);
        let result = adapter_for(&server).collect(&config());
        assert!(result.result.is_empty());
        assert!(result.error_message.unwrap().contains("403"));
    }

    #[test]
    fn collect_reports_network_fault() {
        let mut adapter = offline_adapter();
        let result = adapter.collect(&config());
        assert!(result.result.is_empty());
        assert!(!result.error_message.unwrap().is_empty());
        assert_eq!(adapter.into_timings().entries()[0].0, "Collection");
    }

    #[test]
    fn endpoints_are_empty() {
        let result = offline_adapter().list_endpoints(Some(&config()));
        assert!(result.endpoint_urls.is_empty());
    }

    #[test]
    fn endpoints_are_empty_without_configuration() {
        let mut adapter = offline_adapter();
        assert!(adapter.list_endpoints(None).endpoint_urls.is_empty());
        assert_eq!(adapter.into_timings().entries()[0].0, "Get Endpoints");
    }

    #[test]
    fn failures_from_configuration_keep_the_prefixes() {
        let err = AdapterError::MissingIdentifier("ticker".into());
        assert_eq!(
            test_failure(&err).error_message.unwrap(),
            "Unexpected connection test error: Missing identifier: ticker"
        );
        let result = collect_failure(&err);
        assert!(result.result.is_empty());
        assert_eq!(
            result.error_message.unwrap(),
            "Unexpected collection error: Missing identifier: ticker"
        );
    }
}
