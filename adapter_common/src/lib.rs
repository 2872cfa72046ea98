//!
//! Common types shared by the stock quote adapter.
//!
//! This crate aggregates:
//! - `error` — unified error type `AdapterError` used across the workspace.
//! - `result` — handy `Result<T, AdapterError>` alias.
//! - `method` — the methods the host can dispatch.
//! - `instance` — the adapter instance read from the host's input file.
//! - `configuration` — ticker and API key extracted from the instance.
//! - `quote` — bid/ask quote returned by the market-data provider.
//! - `definition` — builder for the adapter definition (configuration schema).
//! - `report` — result payloads written to the host's output file.
//! - `net` — provider URL helpers.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod method;
pub mod instance;
pub mod configuration;
pub mod quote;
pub mod definition;
pub mod report;
pub mod net;

pub use error::AdapterError;
pub use result::Result;
pub use method::Method;
pub use configuration::Configuration;
pub use quote::Quote;
