//! Blocking HTTP client for the market-data provider.
use std::time::Duration;

use adapter_common::net::{last_quote_url, redacted};
use adapter_common::{AdapterError, Configuration, Quote, Result};
use log::debug;
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};

/// Client for the provider's "last quote" endpoint.
pub struct MarketClient {
    http: Client,
    base_url: String,
}

impl MarketClient {
    /// Creates a client for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: String::from(base_url),
        })
    }

    /// Status of the last-quote request for the configured ticker, body ignored.
    pub fn check_status(&self, config: &Configuration) -> Result<StatusCode> {
        let response = self.get_last_quote(config)?;
        Ok(response.status())
    }

    /// Fetches and decodes the last quote for the configured ticker.
    ///
    /// Any status outside 2xx is an `AdapterError::Status`.
    pub fn last_quote(&self, config: &Configuration) -> Result<Quote> {
        let response = self.get_last_quote(config)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AdapterError::Status(status.as_u16()));
        }
        let body = response
            .bytes()
            .map_err(|e| AdapterError::Http(e.without_url()))?;
        Quote::from_json_bytes(&body)
    }

    // Errors are stripped of their URL so the API key never reaches a message.
    fn get_last_quote(&self, config: &Configuration) -> Result<Response> {
        let url = last_quote_url(&self.base_url, &config.ticker, &config.api_key)?;
        debug!("GET {}", redacted(&url));
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| AdapterError::Http(e.without_url()))?;
        debug!("Provider answered {}", response.status());
        Ok(response)
    }
}
