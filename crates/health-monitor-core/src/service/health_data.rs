//! Health record management for the logged-in user

use std::sync::Arc;

use super::Repositories;
use crate::error::{Result, ServiceError};
use crate::model::{HealthMetrics, HealthRecord, RecordId};
use crate::repository::HealthDataRepository;
use crate::session::Session;

pub struct HealthDataService {
    health: Arc<dyn HealthDataRepository>,
}

impl HealthDataService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            health: repos.health.clone(),
        }
    }

    /// Metric values are stored as entered, without range checks
    pub fn add(&self, session: &Session, metrics: HealthMetrics) -> Result<HealthRecord> {
        let record = self.health.create(session.user_id(), metrics)?;
        tracing::info!(user_id = record.user_id, record_id = record.id, date = %record.metrics.date, "Added health record");
        Ok(record)
    }

    /// The session user's records, oldest first
    pub fn list(&self, session: &Session) -> Result<Vec<HealthRecord>> {
        Ok(self.health.list_for_user(session.user_id())?)
    }

    pub fn update(&self, session: &Session, record: &HealthRecord) -> Result<()> {
        self.owned(session, record.id)?;
        let record = HealthRecord {
            user_id: session.user_id(),
            ..record.clone()
        };
        self.health.update(&record)?;
        tracing::info!(user_id = record.user_id, record_id = record.id, "Updated health record");
        Ok(())
    }

    pub fn delete(&self, session: &Session, id: RecordId) -> Result<()> {
        self.owned(session, id)?;
        self.health.delete(id)?;
        tracing::info!(user_id = session.user_id(), record_id = id, "Deleted health record");
        Ok(())
    }

    fn owned(&self, session: &Session, id: RecordId) -> Result<HealthRecord> {
        let existing = self.health.get(id)?;
        if existing.user_id != session.user_id() {
            return Err(ServiceError::access_denied(format!(
                "health record {} belongs to another user",
                id
            )));
        }
        Ok(existing)
    }
}
