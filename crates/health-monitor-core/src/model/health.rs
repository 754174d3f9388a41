//! Health records and the snapshot handed to the recommendation evaluator

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// Metrics captured for one day. Values are stored exactly as entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub steps: i32,
    /// Beats per minute
    pub heart_rate: i32,
    pub water_intake_oz: f64,
    pub hours_of_sleep: f64,
    pub date: NaiveDate,
}

/// A persisted [`HealthMetrics`] entry owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: RecordId,
    pub user_id: RecordId,
    #[serde(flatten)]
    pub metrics: HealthMetrics,
}

impl HealthRecord {
    /// The subset of this record the recommendation rules look at
    pub fn snapshot(&self) -> HealthMetricsSnapshot {
        HealthMetricsSnapshot {
            user_id: self.user_id,
            heart_rate: self.metrics.heart_rate,
            steps: self.metrics.steps,
            water_intake_oz: self.metrics.water_intake_oz,
            hours_of_sleep: self.metrics.hours_of_sleep,
            date: self.metrics.date,
        }
    }
}

impl fmt::Display for HealthRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.metrics;
        writeln!(f, "Weight: {}", m.weight_kg)?;
        writeln!(f, "Height: {}", m.height_cm)?;
        writeln!(f, "Steps: {}", m.steps)?;
        writeln!(f, "Heart Rate: {}", m.heart_rate)?;
        writeln!(f, "Water Intake: {}", m.water_intake_oz)?;
        writeln!(f, "Hours of Sleep: {}", m.hours_of_sleep)?;
        write!(f, "Date: {}", m.date)
    }
}

/// One user's metrics for one date, as seen by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthMetricsSnapshot {
    pub user_id: RecordId,
    pub heart_rate: i32,
    pub steps: i32,
    pub water_intake_oz: f64,
    pub hours_of_sleep: f64,
    pub date: NaiveDate,
}
