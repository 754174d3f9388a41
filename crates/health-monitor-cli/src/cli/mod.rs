//! CLI module for Health Monitor
//!
//! Wires configuration, storage and services together and dispatches the
//! parsed command.

pub mod commands;
pub mod output;

pub use commands::{HealthCli, HealthCommands};
pub use output::{AdvisoryOutput, HistoryOutput, OutputFormat};

use std::io::{self, Write};
use std::sync::Arc;

use health_monitor_core::{HealthMonitor, Repositories, ServiceError, StoreError};
use health_monitor_storage::SledStore;

use crate::config::AppConfig;
use crate::error::{CliError, Result};

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful execution
    Success = 0,
    /// Invalid input, arguments or configuration
    InvalidInput = 3,
    /// The user or record does not exist
    NotFound = 4,
    /// Wrong credentials or insufficient rights
    AccessDenied = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from a failed command
    pub fn from_error(err: &CliError) -> Self {
        match err {
            CliError::InvalidInput(_) | CliError::Config(_) => ExitCode::InvalidInput,
            CliError::Service(e) => match e {
                ServiceError::InvalidInput(_) | ServiceError::Store(StoreError::Conflict(_)) => {
                    ExitCode::InvalidInput
                }
                ServiceError::InvalidCredentials | ServiceError::AccessDenied(_) => ExitCode::AccessDenied,
                e if e.is_not_found() => ExitCode::NotFound,
                _ => ExitCode::InternalError,
            },
            _ => ExitCode::InternalError,
        }
    }
}

/// Load configuration for the parsed command line; flags win over file and environment
pub fn load_config(cli: &HealthCli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn open_store(config: &AppConfig, ephemeral: bool) -> Result<SledStore> {
    if ephemeral {
        tracing::info!("Using a temporary database");
        return Ok(SledStore::temporary()?);
    }
    std::fs::create_dir_all(&config.data_dir).map_err(|e| {
        CliError::config(format!(
            "cannot create data directory {}: {}",
            config.data_dir.display(),
            e
        ))
    })?;
    Ok(SledStore::open(&config.data_dir)?)
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: HealthCli, config: &AppConfig) -> Result<ExitCode> {
    let store = Arc::new(open_store(config, cli.ephemeral)?);
    let monitor = HealthMonitor::new(Repositories::from_store(store.clone()));

    let mut stdout = io::stdout();
    let outcome = match cli.command.unwrap_or(HealthCommands::Interactive) {
        HealthCommands::Interactive => commands::execute_interactive(&monitor, config),
        HealthCommands::Recommend {
            email,
            password,
            format,
        } => commands::resolve_password(password)
            .and_then(|password| commands::execute_recommend(&monitor, &email, password, format, &mut stdout)),
        HealthCommands::History {
            email,
            password,
            format,
        } => commands::resolve_password(password)
            .and_then(|password| commands::execute_history(&monitor, &email, password, format, &mut stdout)),
        HealthCommands::Assign {
            doctor_email,
            patient_email,
        } => commands::execute_assign(&monitor, &doctor_email, &patient_email, &mut stdout),
    };

    stdout.flush()?;
    store.flush()?;
    outcome
}
