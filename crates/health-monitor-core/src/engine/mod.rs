//! Recommendation engine
//!
//! Runs the threshold rules over a [`HealthMetricsSnapshot`] in a fixed order
//! and records the outcome in the audit trail.
//!
//! # Design Principles
//! - Deterministic: the same snapshot always yields the same advisories
//! - Total: evaluation never fails and never returns an empty list
//! - Audit is best effort: a failed write is logged, never surfaced

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::model::HealthMetricsSnapshot;
use crate::repository::RecommendationAuditWriter;
use rules::{default_rules, HealthRule, ALL_CLEAR_ADVICE};

/// Which condition produced an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    LowHeartRate,
    HighHeartRate,
    LowSteps,
    LowWaterIntake,
    LowSleep,
    /// Nothing fired
    AllClear,
}

impl fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisoryKind::LowHeartRate => write!(f, "low_heart_rate"),
            AdvisoryKind::HighHeartRate => write!(f, "high_heart_rate"),
            AdvisoryKind::LowSteps => write!(f, "low_steps"),
            AdvisoryKind::LowWaterIntake => write!(f, "low_water_intake"),
            AdvisoryKind::LowSleep => write!(f, "low_sleep"),
            AdvisoryKind::AllClear => write!(f, "all_clear"),
        }
    }
}

/// A single human-readable recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub kind: AdvisoryKind,
    pub message: String,
}

impl Advisory {
    pub fn new(kind: AdvisoryKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn all_clear() -> Self {
        Self::new(AdvisoryKind::AllClear, ALL_CLEAR_ADVICE)
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered, never-empty list of advisories
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdvisoryList {
    advisories: Vec<Advisory>,
}

impl AdvisoryList {
    /// Build from triggered advisories; an empty input becomes the all-clear message
    fn from_triggered(advisories: Vec<Advisory>) -> Self {
        if advisories.is_empty() {
            Self {
                advisories: vec![Advisory::all_clear()],
            }
        } else {
            Self { advisories }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Advisory> {
        self.advisories.iter()
    }

    pub fn as_slice(&self) -> &[Advisory] {
        &self.advisories
    }

    pub fn len(&self) -> usize {
        self.advisories.len()
    }

    /// Never true: an evaluation always yields at least one advisory
    pub fn is_empty(&self) -> bool {
        self.advisories.is_empty()
    }

    /// True when no rule fired
    pub fn is_all_clear(&self) -> bool {
        matches!(self.advisories.as_slice(), [a] if a.kind == AdvisoryKind::AllClear)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.advisories.iter().map(|a| a.message.as_str()).collect()
    }

    /// Text stored in the audit trail
    pub fn joined(&self) -> String {
        self.messages().join(", ")
    }
}

impl<'a> IntoIterator for &'a AdvisoryList {
    type Item = &'a Advisory;
    type IntoIter = std::slice::Iter<'a, Advisory>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Rule-based evaluator over health snapshots
pub struct RecommendationEvaluator {
    rules: Vec<Box<dyn HealthRule>>,
    audit: Arc<dyn RecommendationAuditWriter>,
}

impl RecommendationEvaluator {
    /// Create an evaluator with the standard rule set, auditing to `audit`
    pub fn new(audit: Arc<dyn RecommendationAuditWriter>) -> Self {
        Self {
            rules: default_rules(),
            audit,
        }
    }

    /// Compute advisories without touching the audit trail
    pub fn analyze(&self, snapshot: &HealthMetricsSnapshot) -> AdvisoryList {
        let triggered = self
            .rules
            .iter()
            .filter_map(|rule| {
                let advisory = rule.evaluate(snapshot);
                if advisory.is_some() {
                    tracing::debug!(rule = rule.id(), user_id = snapshot.user_id, "Rule fired");
                }
                advisory
            })
            .collect();

        AdvisoryList::from_triggered(triggered)
    }

    /// Compute advisories and append one audit record.
    ///
    /// The audit write happens exactly once per call. If it fails the error
    /// is logged and the computed list is still returned.
    pub fn evaluate(&self, snapshot: &HealthMetricsSnapshot) -> AdvisoryList {
        let advisories = self.analyze(snapshot);

        if let Err(e) = self
            .audit
            .record(snapshot.user_id, &advisories.joined(), snapshot.date)
        {
            tracing::warn!(
                user_id = snapshot.user_id,
                date = %snapshot.date,
                error = %e,
                "Failed to store recommendation audit record"
            );
        }

        advisories
    }
}

impl fmt::Debug for RecommendationEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&str> = self.rules.iter().map(|r| r.id()).collect();
        f.debug_struct("RecommendationEvaluator")
            .field("rules", &ids)
            .finish_non_exhaustive()
    }
}
