//! Threshold rules
//!
//! Each rule looks at one metric of a snapshot and produces at most one
//! advisory. Comparisons are strict: a value equal to a threshold is normal.

use super::{Advisory, AdvisoryKind};
use crate::model::HealthMetricsSnapshot;

/// Lower bound of the normal resting heart rate (bpm)
pub const MIN_HEART_RATE: i32 = 60;
/// Upper bound of the normal resting heart rate (bpm)
pub const MAX_HEART_RATE: i32 = 100;
/// Daily step goal
pub const MIN_STEPS: i32 = 10_000;
/// Daily water goal (ounces)
pub const MIN_WATER_INTAKE: f64 = 64.0;
/// Nightly sleep goal (hours)
pub const MIN_HOURS_SLEEP: f64 = 7.0;

pub const LOW_HEART_RATE_ADVICE: &str = "Your heart rate is lower than the recommended range. \
    Consider increasing your physical activity to improve your cardiovascular health.";

pub const HIGH_HEART_RATE_ADVICE: &str = "Your heart rate is higher than the recommended range. \
    Consider reducing stress and incorporating relaxation techniques.";

pub const STEPS_ADVICE: &str = "You're not reaching the recommended daily step count of 10,000 steps. \
    Try to incorporate more walking or other physical activities into your daily routine.";

pub const WATER_ADVICE: &str = "You haven't reached the recommended daily water intake of 64 ounces. \
    Consider increasing your water intake for better hydration.";

pub const ALL_CLEAR_ADVICE: &str = "No recommendations at this time. You're doing great!";

/// Sleep advice embeds the threshold, formatted with one decimal
pub fn sleep_advice() -> String {
    format!(
        "You're not getting enough sleep. Aim for at least {:.1} hours of sleep per night for better performance.",
        MIN_HOURS_SLEEP
    )
}

/// A single recommendation rule
pub trait HealthRule: Send + Sync {
    /// Rule identifier
    fn id(&self) -> &str;

    /// Rule name
    fn name(&self) -> &str;

    /// Evaluate the snapshot, returning the advisory if the rule fires
    fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> Option<Advisory>;
}

/// Flags a resting heart rate outside `[MIN_HEART_RATE, MAX_HEART_RATE]`.
/// Low and high are mutually exclusive.
pub struct HeartRateRule;

impl HealthRule for HeartRateRule {
    fn id(&self) -> &str {
        "heart_rate"
    }

    fn name(&self) -> &str {
        "Heart Rate Range"
    }

    fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> Option<Advisory> {
        if snapshot.heart_rate < MIN_HEART_RATE {
            Some(Advisory::new(AdvisoryKind::LowHeartRate, LOW_HEART_RATE_ADVICE))
        } else if snapshot.heart_rate > MAX_HEART_RATE {
            Some(Advisory::new(AdvisoryKind::HighHeartRate, HIGH_HEART_RATE_ADVICE))
        } else {
            None
        }
    }
}

/// Flags a step count under the daily goal
pub struct StepsRule;

impl HealthRule for StepsRule {
    fn id(&self) -> &str {
        "steps"
    }

    fn name(&self) -> &str {
        "Daily Steps"
    }

    fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> Option<Advisory> {
        (snapshot.steps < MIN_STEPS).then(|| Advisory::new(AdvisoryKind::LowSteps, STEPS_ADVICE))
    }
}

/// Flags water intake under the daily goal
pub struct WaterIntakeRule;

impl HealthRule for WaterIntakeRule {
    fn id(&self) -> &str {
        "water_intake"
    }

    fn name(&self) -> &str {
        "Water Intake"
    }

    fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> Option<Advisory> {
        (snapshot.water_intake_oz < MIN_WATER_INTAKE)
            .then(|| Advisory::new(AdvisoryKind::LowWaterIntake, WATER_ADVICE))
    }
}

/// Flags sleep under the nightly goal
pub struct SleepRule;

impl HealthRule for SleepRule {
    fn id(&self) -> &str {
        "sleep"
    }

    fn name(&self) -> &str {
        "Hours of Sleep"
    }

    fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> Option<Advisory> {
        (snapshot.hours_of_sleep < MIN_HOURS_SLEEP)
            .then(|| Advisory::new(AdvisoryKind::LowSleep, sleep_advice()))
    }
}

/// The rules in evaluation order
pub fn default_rules() -> Vec<Box<dyn HealthRule>> {
    vec![
        Box::new(HeartRateRule),
        Box::new(StepsRule),
        Box::new(WaterIntakeRule),
        Box::new(SleepRule),
    ]
}
