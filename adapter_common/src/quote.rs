//! Quote returned by the market-data provider.
//!
//! The provider's "last quote" endpoint answers with a JSON object such as
//! `{"symbol":"AAPL","ask":189.5,"bid":189.4,"asize":3,"bsize":1,"timestamp":1700000000000}`.
//! Only `bid` and `ask` are read; every other key is ignored whatever its type, and a
//! body without both prices fails to decode.
use serde::{Deserialize, Serialize};

use crate::Result;

/// Bid/ask price pair for a ticker at collection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Highest price a buyer is willing to pay.
    pub bid: f64,
    /// Lowest price a seller is willing to accept.
    pub ask: f64,
}

impl Quote {
    /// Decode a quote from the provider's JSON body.
    pub fn from_json_bytes(body: &[u8]) -> Result<Quote> {
        let quote = serde_json::from_slice(body)?;
        Ok(quote)
    }
}
