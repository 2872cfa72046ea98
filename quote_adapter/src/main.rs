//! Stock Quote Adapter — a collection plugin run by a monitoring host, one process per
//! call. It reports the bid/ask quote of one stock ticker, fetched from the Finage
//! market-data API, and describes its configuration surface to the host.
//!
//! Usage (the host appends both paths itself):
//! ```bash
//! quote_adapter <method> <inputfile> <outputfile>
//! ```
//!
//! `method` is one of `test`, `collect`, `endpoint_urls` or `adapter_definition`.
//! The input file holds the configured adapter instance; the output file receives
//! the JSON result payload.
//!
//! Exit codes: `0` whenever the method ran and its payload was written, even if the
//! payload reports an error; `1` for a malformed invocation, an unknown method, a
//! definition that cannot be built, or an output file that cannot be written.
mod adapter;
mod args;
mod logging;
mod market;
mod settings;
mod timer;

use std::ffi::OsString;
use std::path::Path;

use adapter_common::instance::AdapterInstance;
use adapter_common::report::write_payload_to;
use adapter_common::{Configuration, Method, Result};
use log::{debug, error, info, warn};

use crate::adapter::{Adapter, collect_failure, test_failure};
use crate::args::Args;
use crate::logging::LogHandle;
use crate::market::MarketClient;
use crate::settings::Settings;
use crate::timer::Timings;

fn main() {
    let settings = Settings::from_env();
    let log = LogHandle::init(&settings.log_dir, settings.log_keep);
    if let Some(path) = log.path() {
        debug!("Logging to {}", path.display());
    }
    for warning in &settings.warnings {
        warn!("{}", warning);
    }

    let argv: Vec<OsString> = std::env::args_os().collect();
    info!("Running adapter code with arguments: {:?}", &argv[1.min(argv.len())..]);

    let mut timings = Timings::new();
    let exit_code = match run(&argv, &settings, &mut timings) {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", e);
            1
        }
    };

    debug!("{} operation(s) timed", timings.entries().len());
    info!("{}", timings.graph());
    log.finish(exit_code);
    std::process::exit(exit_code);
}

/// Parses the invocation, runs the requested method and writes its payload.
///
/// Returns an error only for faults that must end the process with a nonzero code.
fn run(argv: &[OsString], settings: &Settings, timings: &mut Timings) -> Result<()> {
    let args = Args::from_argv(argv)?;
    let method = Method::parse(&args.method)?;
    info!("Dispatching {}", method);

    let market = MarketClient::new(&settings.base_url, settings.timeout)?;
    let mut adapter = Adapter::new(market);
    let outcome = execute(&mut adapter, method, &args);
    *timings = adapter.into_timings();
    outcome
}

fn execute(adapter: &mut Adapter, method: Method, args: &Args) -> Result<()> {
    match method {
        Method::AdapterDefinition => {
            let definition = adapter.describe_schema()?;
            write_payload_to(&definition, &args.output)?;
        }
        Method::Test => {
            let result = match load_configuration(&args.input) {
                Ok(config) => adapter.test_connection(&config),
                Err(e) => test_failure(&e),
            };
            write_payload_to(&result, &args.output)?;
        }
        Method::Collect => {
            let result = match load_configuration(&args.input) {
                Ok(config) => adapter.collect(&config),
                Err(e) => collect_failure(&e),
            };
            write_payload_to(&result, &args.output)?;
        }
        Method::EndpointUrls => {
            let config = load_configuration(&args.input)
                .inspect_err(|e| warn!("Listing endpoints without configuration: {}", e))
                .ok();
            let result = adapter.list_endpoints(config.as_ref());
            write_payload_to(&result, &args.output)?;
        }
    }
    debug!("Result written to {}", args.output.display());
    Ok(())
}

/// Reads the adapter instance from `path` and extracts the ticker and API key.
fn load_configuration(path: &Path) -> Result<Configuration> {
    let instance = AdapterInstance::from_path(path)?;
    debug!(
        "Adapter instance {} (collection {:?}), {} accepted certificate(s)",
        instance.adapter_key.name,
        instance.collection_number,
        instance.certificates().len()
    );
    Configuration::from_instance(&instance)
}
