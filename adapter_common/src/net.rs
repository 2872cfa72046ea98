//! Market-data provider addressing.
use reqwest::Url;

use crate::error::AdapterError;
use crate::Result;

/// Default base URL of the market-data provider.
pub const PROVIDER_BASE_URL: &str = "https://api.finage.co.uk";
/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "apikey";

/// Builds the "last quote" URL for `ticker`: `{base}/last/stock/{ticker}?apikey={api_key}`.
///
/// The ticker is percent-encoded as a single path segment.
pub fn last_quote_url(base_url: &str, ticker: &str, api_key: &str) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| AdapterError::Url(format!("{}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| AdapterError::Url(format!("{} cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(["last", "stock", ticker]);
    url.query_pairs_mut().append_pair(API_KEY_PARAM, api_key);
    Ok(url)
}

/// Renders `url` for logging with the API key replaced.
pub fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == API_KEY_PARAM { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
