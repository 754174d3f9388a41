//! CLI command definitions for Health Monitor
//!
//! Provides Clap-based command definitions for the interactive console and
//! the one-shot recommendation, history and assignment commands.

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use zeroize::Zeroizing;

use health_monitor_core::HealthMonitor;

use super::output::{AdvisoryOutput, HistoryOutput, OutputFormat};
use super::ExitCode;
use crate::config::AppConfig;
use crate::console::Console;
use crate::error::{CliError, Result};

/// Health Monitor CLI
///
/// Track daily health metrics, medication reminders and get rule-based
/// recommendations.
#[derive(Parser, Debug)]
#[command(name = "health-monitor")]
#[command(about = "Health Monitor - Your daily dose of health made simple", long_about = None)]
#[command(version)]
pub struct HealthCli {
    /// Output verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of the database (overrides config and environment)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Use a throwaway database that is deleted on exit
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<HealthCommands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum HealthCommands {
    /// Start the menu-driven console (default)
    Interactive,

    /// Evaluate a user's most recent health record
    Recommend {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password; prompted for when absent
        #[arg(long, env = "HEALTH_MONITOR_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Output format for recommendations
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a user's past recommendations
    History {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password; prompted for when absent
        #[arg(long, env = "HEALTH_MONITOR_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Output format for the history
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Assign a patient to a doctor
    Assign {
        /// Email of the doctor account
        #[arg(long)]
        doctor_email: String,

        /// Email of the patient account
        #[arg(long)]
        patient_email: String,
    },
}

/// Execute the interactive console on stdin/stdout
pub fn execute_interactive(monitor: &HealthMonitor, config: &AppConfig) -> Result<ExitCode> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(monitor, config, stdin.lock(), stdout.lock()).run()?;
    Ok(ExitCode::Success)
}

/// Execute the recommend command
pub fn execute_recommend<W: Write>(
    monitor: &HealthMonitor,
    email: &str,
    password: Zeroizing<String>,
    format: OutputFormat,
    out: &mut W,
) -> Result<ExitCode> {
    let session = monitor.accounts().login(email, &password)?;
    let recommendation = monitor.recommendations().recommend(&session)?;

    AdvisoryOutput::new(
        &session.user().email,
        recommendation.date,
        recommendation.advisories,
    )
    .render_to(format, out)?;
    Ok(ExitCode::Success)
}

/// Execute the history command
pub fn execute_history<W: Write>(
    monitor: &HealthMonitor,
    email: &str,
    password: Zeroizing<String>,
    format: OutputFormat,
    out: &mut W,
) -> Result<ExitCode> {
    let session = monitor.accounts().login(email, &password)?;
    let records = monitor.recommendations().history(&session)?;

    HistoryOutput::new(&session.user().email, &records).render_to(format, out)?;
    Ok(ExitCode::Success)
}

/// Execute the assign command
pub fn execute_assign<W: Write>(
    monitor: &HealthMonitor,
    doctor_email: &str,
    patient_email: &str,
    out: &mut W,
) -> Result<ExitCode> {
    let (doctor, patient) = monitor.doctors().assign(doctor_email, patient_email)?;
    writeln!(
        out,
        "Assigned {} <{}> to Dr. {} <{}>",
        patient.full_name(),
        patient.email,
        doctor.full_name(),
        doctor.email
    )?;
    Ok(ExitCode::Success)
}

/// Password from the flag or environment, else one line read from stdin
pub fn resolve_password(password: Option<String>) -> Result<Zeroizing<String>> {
    if let Some(password) = password {
        return Ok(Zeroizing::new(password));
    }

    eprint!("Password: ");
    io::stderr().flush()?;
    read_password(&mut io::stdin().lock())
}

fn read_password<R: BufRead>(input: &mut R) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    if input.read_line(&mut line)? == 0 {
        return Err(CliError::invalid_input("no password given"));
    }
    Ok(Zeroizing::new(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::CommandFactory;
    use health_monitor_core::{HealthMetrics, NewUser, Repositories};
    use health_monitor_storage::SledStore;
    use std::io::Cursor;
    use std::sync::Arc;

    fn monitor() -> HealthMonitor {
        let store = Arc::new(SledStore::temporary().unwrap());
        let monitor = HealthMonitor::new(Repositories::from_store(store));
        monitor
            .accounts()
            .register(NewUser::new("Jane", "Doe", "jane@example.com", "pw"))
            .unwrap();
        monitor
    }

    fn add_record(monitor: &HealthMonitor, heart_rate: i32) {
        let session = monitor.accounts().login("jane@example.com", "pw").unwrap();
        monitor
            .health_data()
            .add(
                &session,
                HealthMetrics {
                    weight_kg: 60.0,
                    height_cm: 165.0,
                    steps: 12_000,
                    heart_rate,
                    water_intake_oz: 80.0,
                    hours_of_sleep: 8.0,
                    date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                },
            )
            .unwrap();
    }

    fn password(value: &str) -> Zeroizing<String> {
        Zeroizing::new(value.to_string())
    }

    #[test]
    fn test_cli_definition_is_valid() {
        HealthCli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = HealthCli::try_parse_from(["health-monitor", "--ephemeral"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.ephemeral);
    }

    #[test]
    fn test_recommend_arguments() {
        let cli = HealthCli::try_parse_from([
            "health-monitor",
            "-vv",
            "recommend",
            "--email",
            "a@example.com",
            "--format",
            "json",
            "--data-dir",
            "/tmp/hm",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/hm")));
        match cli.command {
            Some(HealthCommands::Recommend { email, format, .. }) => {
                assert_eq!(email, "a@example.com");
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_assign_requires_both_emails() {
        assert!(HealthCli::try_parse_from(["health-monitor", "assign", "--doctor-email", "d@x.com"]).is_err());
    }

    #[test]
    fn test_read_password() {
        let password = read_password(&mut Cursor::new("hunter2\r\nrest")).unwrap();
        assert_eq!(password.as_str(), "hunter2");
        assert!(read_password(&mut Cursor::new("")).is_err());
    }

    #[test]
    fn test_recommend_json_reports_record_date() {
        let monitor = monitor();
        add_record(&monitor, 120);

        let mut out = Vec::new();
        let code =
            execute_recommend(&monitor, "jane@example.com", password("pw"), OutputFormat::Json, &mut out)
                .unwrap();
        assert_eq!(code, ExitCode::Success);

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["date"], "2024-04-02");
        assert_eq!(json["advisories"][0]["kind"], "high_heart_rate");
    }

    #[test]
    fn test_recommend_without_data_is_not_found() {
        let monitor = monitor();

        let mut out = Vec::new();
        let err =
            execute_recommend(&monitor, "jane@example.com", password("pw"), OutputFormat::Json, &mut out)
                .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);
        assert!(out.is_empty());
    }

    #[test]
    fn test_recommend_with_wrong_password_is_denied() {
        let monitor = monitor();
        add_record(&monitor, 70);

        let mut out = Vec::new();
        let err = execute_recommend(
            &monitor,
            "jane@example.com",
            password("wrong"),
            OutputFormat::Table,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Service(health_monitor_core::ServiceError::InvalidCredentials)
        ));
        assert_eq!(ExitCode::from_error(&err), ExitCode::AccessDenied);
        assert!(out.is_empty());
    }

    #[test]
    fn test_history_json_lists_evaluations() {
        let monitor = monitor();
        add_record(&monitor, 120);
        execute_recommend(&monitor, "jane@example.com", password("pw"), OutputFormat::Json, &mut Vec::new())
            .unwrap();

        let mut out = Vec::new();
        execute_history(&monitor, "jane@example.com", password("pw"), OutputFormat::Json, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let entries = json["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["date"], "2024-04-02");
    }

    #[test]
    fn test_history_with_wrong_password_is_denied() {
        let monitor = monitor();
        let err = execute_history(
            &monitor,
            "nobody@example.com",
            password("pw"),
            OutputFormat::Json,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::AccessDenied);
    }

    #[test]
    fn test_assign_prints_pairing() {
        let monitor = monitor();
        monitor
            .accounts()
            .register(NewUser::new("Gregory", "House", "house@example.com", "pw").doctor())
            .unwrap();

        let mut out = Vec::new();
        let code = execute_assign(&monitor, "house@example.com", "jane@example.com", &mut out).unwrap();

        assert_eq!(code, ExitCode::Success);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Assigned Jane Doe <jane@example.com> to Dr. Gregory House <house@example.com>\n"
        );
    }

    #[test]
    fn test_assign_unknown_patient_is_not_found() {
        let monitor = monitor();
        monitor
            .accounts()
            .register(NewUser::new("Gregory", "House", "house@example.com", "pw").doctor())
            .unwrap();

        let err = execute_assign(&monitor, "house@example.com", "ghost@example.com", &mut Vec::new())
            .unwrap_err();
        assert_eq!(ExitCode::from_error(&err), ExitCode::NotFound);
    }
}
