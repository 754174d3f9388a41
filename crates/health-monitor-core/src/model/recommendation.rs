//! Persisted audit trail of generated recommendations

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// One entry per evaluation: which advisories were produced, for whom, when
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationAuditRecord {
    pub id: RecordId,
    pub user_id: RecordId,
    /// All advisories joined with `", "`
    pub text: String,
    /// Date of the evaluated metrics
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
}
