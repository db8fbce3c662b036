use crate::error::{CliError, CliResult};
use std::{fs::OpenOptions, path::Path, sync::Mutex};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Send log events to the console and append them to `log_file`
///
/// `RUST_LOG` overrides `default_level` when set.
pub fn init(default_level: &str, log_file: &Path) -> CliResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::Logging(format!("invalid log level {:?}: {}", default_level, e)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))
}
