//! Result type alias shared across the workspace.
//!
//! Defaults the error type to `AdapterError`, so functions can simply return `Result<T>`.
use crate::error::AdapterError;

/// Workspace-wide `Result` alias with `AdapterError` as the default error.
pub type Result<T, E = AdapterError> = std::result::Result<T, E>;
