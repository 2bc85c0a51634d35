//! Diagnostics log setup.
//!
//! The playground owns the alternate screen, so nothing may go to stderr.
//! Logs go to a file, or nowhere.

use std::fs::OpenOptions;

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::Config;

/// Install the global logger described by `config`.
///
/// Returns `false` when no log path is configured (logging stays off).
pub fn init(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Error)
        .set_thread_level(log::LevelFilter::Off)
        .build();

    WriteLogger::init(config.log_level, log_config, file).context("installing logger")?;
    log::info!("logging to {} at {}", path.display(), config.log_level);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_means_no_logger() {
        let config = Config::default();
        assert!(!init(&config).unwrap());
    }
}
