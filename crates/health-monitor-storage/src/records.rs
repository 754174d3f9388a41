//! Health data, reminders and the recommendation audit trail

use chrono::{NaiveDate, Utc};

use health_monitor_core::repository::{
    HealthDataRepository, RecommendationAuditWriter, RecommendationHistory, ReminderRepository,
};
use health_monitor_core::{
    HealthMetrics, HealthRecord, MedicineReminder, NewReminder, RecommendationAuditRecord,
    RecordId, StoreResult,
};

use crate::SledStore;

impl HealthDataRepository for SledStore {
    fn create(&self, user_id: RecordId, metrics: HealthMetrics) -> StoreResult<HealthRecord> {
        let record = HealthRecord {
            id: self.next_id()?,
            user_id,
            metrics,
        };
        self.health.insert(&record)?;
        tracing::debug!(user_id, record_id = record.id, "Stored health record");
        Ok(record)
    }

    fn get(&self, id: RecordId) -> StoreResult<HealthRecord> {
        self.health.get(id)
    }

    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<HealthRecord>> {
        self.health.list(user_id)
    }

    fn update(&self, record: &HealthRecord) -> StoreResult<()> {
        self.health.replace(record)
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.health.remove(id)
    }

    fn delete_for_user(&self, user_id: RecordId) -> StoreResult<usize> {
        self.health.remove_for(user_id)
    }
}

impl ReminderRepository for SledStore {
    fn create(
        &self,
        user_id: RecordId,
        reminder: &NewReminder,
        prescribed_by: Option<RecordId>,
    ) -> StoreResult<MedicineReminder> {
        let record = MedicineReminder {
            id: self.next_id()?,
            user_id,
            medicine_name: reminder.medicine_name.clone(),
            dosage: reminder.dosage.clone(),
            schedule: reminder.schedule,
            start_date: reminder.start_date,
            end_date: reminder.end_date,
            prescribed_by,
        };
        self.reminders.insert(&record)?;
        tracing::debug!(user_id, reminder_id = record.id, "Stored reminder");
        Ok(record)
    }

    fn get(&self, id: RecordId) -> StoreResult<MedicineReminder> {
        self.reminders.get(id)
    }

    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<MedicineReminder>> {
        self.reminders.list(user_id)
    }

    fn update(&self, reminder: &MedicineReminder) -> StoreResult<()> {
        self.reminders.replace(reminder)
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        self.reminders.remove(id)
    }

    fn delete_for_user(&self, user_id: RecordId) -> StoreResult<usize> {
        self.reminders.remove_for(user_id)
    }
}

impl RecommendationAuditWriter for SledStore {
    fn record(&self, user_id: RecordId, text: &str, date: NaiveDate) -> StoreResult<()> {
        let record = RecommendationAuditRecord {
            id: self.next_id()?,
            user_id,
            text: text.to_string(),
            date,
            recorded_at: Utc::now(),
        };
        self.recommendations.insert(&record)
    }
}

impl RecommendationHistory for SledStore {
    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<RecommendationAuditRecord>> {
        self.recommendations.list(user_id)
    }
}
