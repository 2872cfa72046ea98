//! Error type shared by the adapter crates.
//!
//! The `AdapterError` enum unifies the failure cases of one adapter run: reading
//! and writing the host's payload files, talking to the market-data provider,
//! decoding its JSON, and rejecting a malformed invocation. Operations propagate it
//! with `?` and the operation boundary turns it into a result payload message.
use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Unified error type for the adapter.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// I/O error while reading the input file or writing the output file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Transport-level failure reported by the HTTP client (connect, timeout, body read).
    /// The message carries the whole cause chain.
    #[error("HTTP request error: {}", error_chain(.0))]
    Http(#[from] reqwest::Error),

    /// The provider answered, but not with the status the operation needs.
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The provider base URL could not be turned into a request URL.
    #[error("Invalid provider URL: {0}")]
    Url(String),

    /// The adapter instance has no identifier with the given key.
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    /// The adapter instance carries no credential field with the given key.
    #[error("Missing credential field: {0}")]
    MissingCredential(String),

    /// A key was declared twice while building the adapter definition.
    #[error("Duplicate definition key: {0}")]
    DuplicateKey(String),

    /// The command line does not have the `<method> <inputfile> <outputfile>` shape.
    #[error("Usage error: {0}")]
    Usage(String),

    /// The requested method is not one the adapter implements.
    #[error("Command {0} not found")]
    UnknownMethod(String),
}

/// Renders `err` followed by each of its sources, separated by `": "`.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
