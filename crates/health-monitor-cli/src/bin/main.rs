//! Health Monitor
//!
//! Interactive health tracking console with rule-based recommendations.
//!
//! # Usage
//!
//! ```bash
//! health-monitor                       # interactive console
//! health-monitor --ephemeral           # console on a throwaway database
//! health-monitor recommend --email jane@example.com --format yaml
//! health-monitor history --email jane@example.com
//! health-monitor assign --doctor-email house@example.com --patient-email jane@example.com
//! ```
//!
//! Logs go to stderr. `RUST_LOG` takes precedence over the configured level.

use anyhow::{anyhow, Context};
use clap::Parser;
use health_monitor_cli::{cli::load_config, run_cli, AppConfig, ExitCode, HealthCli, LogFormat};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig, verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level {:?}", level))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.log_format {
        LogFormat::Pretty => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow!(e))
    .context("failed to install log subscriber")
}

fn main() {
    let cli = HealthCli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(ExitCode::from_error(&e).into());
        }
    };

    if let Err(e) = init_tracing(&config, cli.verbose) {
        eprintln!("Error: {:#}", e);
        std::process::exit(ExitCode::InvalidInput.into());
    }

    let exit_code = run_cli(cli, &config);
    std::process::exit(exit_code.into());
}
