//! Health Monitor CLI
//!
//! Command-line front end for Health Monitor: an interactive menu-driven
//! console plus one-shot commands for scripting.
//!
//! ## Architecture
//!
//! 1. **CLI** (`cli/`): clap commands, exit codes and table/JSON/YAML output.
//!
//! 2. **Console** (`console/`): the interactive menus, generic over any
//!    `BufRead` input and `Write` output.
//!
//! 3. **Config** (`config`): defaults, TOML file and `HEALTH_MONITOR_*`
//!    environment overrides.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Interactive console against ./health-monitor-data
//! health-monitor
//!
//! # Latest recommendations as JSON
//! health-monitor recommend --email jane@example.com --format json
//!
//! # Link a patient to a doctor
//! health-monitor assign --doctor-email house@example.com --patient-email jane@example.com
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Success
//! - 3: Invalid input, arguments or configuration
//! - 4: User or record not found
//! - 5: Wrong credentials or access denied
//! - 10: Internal error

pub mod cli;
pub mod config;
pub mod console;
pub mod error;

pub use cli::{ExitCode, HealthCli, HealthCommands, OutputFormat};
pub use config::{AppConfig, LogFormat};
pub use console::Console;
pub use error::{CliError, Result};

/// Run the CLI and map any failure to an exit code
///
/// ```rust,no_run
/// use clap::Parser;
/// use health_monitor_cli::{cli::load_config, run_cli, HealthCli};
///
/// let cli = HealthCli::parse();
/// let config = load_config(&cli).unwrap();
/// let exit_code = run_cli(cli, &config);
/// std::process::exit(exit_code.into());
/// ```
pub fn run_cli(cli: HealthCli, config: &AppConfig) -> ExitCode {
    match cli::run(cli, config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if !e.is_user_error() {
                tracing::error!(error = %e, "Command failed");
            }
            ExitCode::from_error(&e)
        }
    }
}
