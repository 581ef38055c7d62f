//! Standalone boom panel.
//!
//! ```bash
//! boomplot [config.json]
//! ```
//! Without a config file the synthetic feed runs with default settings.
//! Set `RUST_LOG` to change the log filter (default `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use boomplot::{run_boomplot, BoomPlotConfig, RunError};

fn load_config() -> Result<BoomPlotConfig, RunError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Ok(BoomPlotConfig::load(&path)?),
        None => Ok(BoomPlotConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match load_config().and_then(run_boomplot) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
