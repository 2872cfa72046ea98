//! Methods the host can ask the adapter to run.
//!
//! The host appends the input and output file paths to the method name, so the
//! method is always the first of exactly three arguments.
use std::str::FromStr;

use strum_macros::{Display, EnumString};

use crate::error::AdapterError;

/// Operation requested on the command line.
#[derive(Debug, Clone, Copy, Display, EnumString, Hash, Eq, PartialEq)]
pub enum Method {
    /// Check that the provider accepts the configured ticker and key.
    #[strum(serialize = "test")]
    Test,
    /// Fetch the current quote and report it as metrics.
    #[strum(serialize = "collect")]
    Collect,
    /// List URLs whose certificates the host should fetch.
    #[strum(serialize = "endpoint_urls")]
    EndpointUrls,
    /// Describe the configuration surface and object types.
    #[strum(serialize = "adapter_definition")]
    AdapterDefinition,
}

impl Method {
    /// Parses a method name, mapping an unknown name to `AdapterError::UnknownMethod`.
    pub fn parse(name: &str) -> Result<Self, AdapterError> {
        Method::from_str(name).map_err(|_| AdapterError::UnknownMethod(name.to_string()))
    }

    /// Whether the method needs the adapter instance from the input file.
    pub fn reads_input(&self) -> bool {
        !matches!(self, Method::AdapterDefinition)
    }
}
