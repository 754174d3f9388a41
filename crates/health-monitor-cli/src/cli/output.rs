//! Output formatting for the Health Monitor CLI
//!
//! Renders recommendations and recommendation history as JSON, YAML or a
//! colored human-readable table.

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use health_monitor_core::{AdvisoryKind, AdvisoryList, RecommendationAuditRecord};

use crate::error::Result;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// One evaluation, ready for rendering
#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryOutput {
    pub email: String,
    /// Date of the evaluated health record
    pub date: NaiveDate,
    pub all_clear: bool,
    pub advisories: AdvisoryList,
}

impl AdvisoryOutput {
    pub fn new(email: impl Into<String>, date: NaiveDate, advisories: AdvisoryList) -> Self {
        Self {
            email: email.into(),
            date,
            all_clear: advisories.is_all_clear(),
            advisories,
        }
    }

    pub fn render_to<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(self)?)?,
            OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(self)?)?,
            OutputFormat::Table => self.render_table(out)?,
        }
        Ok(())
    }

    fn render_table<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "Health Recommendations".cyan().bold())?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "{} {}", "User:".dimmed(), self.email)?;
        writeln!(out, "{} {}", "Record date:".dimmed(), self.date)?;
        writeln!(out)?;

        for advisory in &self.advisories {
            let icon = match advisory.kind {
                AdvisoryKind::AllClear => "+".green(),
                _ => "!".yellow(),
            };
            writeln!(out, "{} [{}] {}", icon, advisory.kind.to_string().dimmed(), advisory.message)?;
        }
        Ok(())
    }
}

/// Past evaluations of one user
#[derive(Debug, Clone, Serialize)]
pub struct HistoryOutput {
    pub email: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
    pub recommendations: String,
}

impl HistoryOutput {
    pub fn new(email: impl Into<String>, records: &[RecommendationAuditRecord]) -> Self {
        Self {
            email: email.into(),
            entries: records
                .iter()
                .map(|r| HistoryEntry {
                    date: r.date,
                    recorded_at: r.recorded_at,
                    recommendations: r.text.clone(),
                })
                .collect(),
        }
    }

    pub fn render_to<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(self)?)?,
            OutputFormat::Yaml => write!(out, "{}", serde_yaml::to_string(self)?)?,
            OutputFormat::Table => {
                writeln!(out)?;
                writeln!(out, "{}", "Recommendation History".cyan().bold())?;
                writeln!(out, "{}", "=".repeat(60))?;
                if self.entries.is_empty() {
                    writeln!(out, "No recommendations recorded for {}", self.email)?;
                }
                for entry in &self.entries {
                    writeln!(
                        out,
                        "{} {} {}",
                        entry.date.to_string().cyan(),
                        "|".dimmed(),
                        entry.recommendations
                    )?;
                }
            }
        }
        Ok(())
    }
}
