//! Logging bootstrap.
//!
//! Core code logs through the `log` facade using `event=... key=value`
//! messages. The binary installs a `flexi_logger` backend writing to stderr so
//! log lines never mix with command output on stdout.
//!
//! The level is `warn` by default and `debug` with `--verbose`. `RUST_LOG`
//! overrides both.

use crate::error::{PkeepError, Result};
use flexi_logger::{LogSpecification, Logger, LoggerHandle};
use log::debug;

pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Starts the logger. Keep the returned handle alive for the life of the process.
pub fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let fallback = default_level(verbose);
    let spec = match std::env::var("RUST_LOG") {
        Ok(env) if !env.trim().is_empty() => LogSpecification::parse(&env)
            .map_err(|e| PkeepError::Config(format!("invalid RUST_LOG {:?}: {}", env, e)))?,
        _ => LogSpecification::parse(fallback)
            .map_err(|e| PkeepError::Config(format!("invalid log level: {}", e)))?,
    };

    let handle = Logger::with(spec)
        .log_to_stderr()
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|e| PkeepError::Config(format!("failed to start logger: {}", e)))?;

    debug!(
        "event=app_start version={} platform={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );
    Ok(handle)
}
