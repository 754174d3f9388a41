//! Recommendations for the logged-in user

use chrono::NaiveDate;
use std::sync::Arc;

use super::Repositories;
use crate::engine::{AdvisoryList, RecommendationEvaluator};
use crate::error::{Result, ServiceError};
use crate::model::RecommendationAuditRecord;
use crate::repository::{HealthDataRepository, RecommendationHistory};
use crate::session::Session;

/// Advisories for one health record
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Date of the evaluated record
    pub date: NaiveDate,
    pub advisories: AdvisoryList,
}

pub struct RecommendationService {
    health: Arc<dyn HealthDataRepository>,
    history: Arc<dyn RecommendationHistory>,
    evaluator: RecommendationEvaluator,
}

impl RecommendationService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            health: repos.health.clone(),
            history: repos.history.clone(),
            evaluator: RecommendationEvaluator::new(repos.audit.clone()),
        }
    }

    /// Evaluate the session user's most recently added health record
    pub fn recommend(&self, session: &Session) -> Result<Recommendation> {
        let latest = self.health.latest_for_user(session.user_id())?.ok_or_else(|| {
            ServiceError::NotFound(
                "No health data found for the current user. Please add health data first."
                    .to_string(),
            )
        })?;

        Ok(Recommendation {
            date: latest.metrics.date,
            advisories: self.evaluator.evaluate(&latest.snapshot()),
        })
    }

    /// Past recommendations of the session user, oldest first
    pub fn history(&self, session: &Session) -> Result<Vec<RecommendationAuditRecord>> {
        Ok(self.history.list_for_user(session.user_id())?)
    }
}
