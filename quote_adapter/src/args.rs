//! Command-line arguments of the adapter.
//!
//! The host always calls `quote_adapter <method> <inputfile> <outputfile>`; the two
//! paths are appended by the host itself. Anything else is a usage error.
use std::ffi::OsString;
use std::path::PathBuf;

use adapter_common::AdapterError;
use clap::Parser;

/// Usage line logged when the invocation is malformed.
pub const USAGE: &str = "Arguments must be <method> <inputfile> <outputfile>";

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Method to run: test, collect, endpoint_urls or adapter_definition.
    pub method: String,

    /// JSON file holding the adapter instance written by the host.
    pub input: PathBuf,

    /// File the result payload is written to.
    pub output: PathBuf,
}

impl Args {
    /// Parses the full argument vector, program name included.
    pub fn from_argv<I, T>(argv: I) -> Result<Self, AdapterError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Args::try_parse_from(argv).map_err(|e| {
            AdapterError::Usage(format!("{} ({})", USAGE, e.kind()))
        })
    }
}
