//! Medication reminders for the logged-in user

use chrono::NaiveDate;
use std::sync::Arc;

use super::Repositories;
use crate::error::{Result, ServiceError};
use crate::model::{MedicineReminder, NewReminder, RecordId};
use crate::repository::ReminderRepository;
use crate::session::Session;

pub struct ReminderService {
    reminders: Arc<dyn ReminderRepository>,
}

impl ReminderService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            reminders: repos.reminders.clone(),
        }
    }

    pub fn add(&self, session: &Session, reminder: NewReminder) -> Result<MedicineReminder> {
        let reminder = normalize(reminder)?;
        let created = self.reminders.create(session.user_id(), &reminder, None)?;
        tracing::info!(user_id = created.user_id, reminder_id = created.id, "Added medication reminder");
        Ok(created)
    }

    /// The session user's reminders, oldest first
    pub fn list(&self, session: &Session) -> Result<Vec<MedicineReminder>> {
        Ok(self.reminders.list_for_user(session.user_id())?)
    }

    /// Reminders whose end date is before `today`
    pub fn overdue(&self, session: &Session, today: NaiveDate) -> Result<Vec<MedicineReminder>> {
        Ok(self
            .list(session)?
            .into_iter()
            .filter(|r| r.is_overdue(today))
            .collect())
    }

    pub fn update(&self, session: &Session, reminder: &MedicineReminder) -> Result<()> {
        let existing = self.owned(session, reminder.id)?;
        check_dates(reminder.start_date, reminder.end_date)?;
        if reminder.medicine_name.trim().is_empty() {
            return Err(ServiceError::invalid_input("medicine name is required"));
        }

        let updated = MedicineReminder {
            user_id: existing.user_id,
            prescribed_by: existing.prescribed_by,
            ..reminder.clone()
        };
        self.reminders.update(&updated)?;
        tracing::info!(user_id = updated.user_id, reminder_id = updated.id, "Updated medication reminder");
        Ok(())
    }

    pub fn delete(&self, session: &Session, id: RecordId) -> Result<()> {
        self.owned(session, id)?;
        self.reminders.delete(id)?;
        tracing::info!(user_id = session.user_id(), reminder_id = id, "Deleted medication reminder");
        Ok(())
    }

    fn owned(&self, session: &Session, id: RecordId) -> Result<MedicineReminder> {
        let existing = self.reminders.get(id)?;
        if existing.user_id != session.user_id() {
            return Err(ServiceError::access_denied(format!(
                "reminder {} belongs to another user",
                id
            )));
        }
        Ok(existing)
    }
}

/// Trim text fields and check the date range
pub(crate) fn normalize(reminder: NewReminder) -> Result<NewReminder> {
    let medicine_name = reminder.medicine_name.trim().to_string();
    if medicine_name.is_empty() {
        return Err(ServiceError::invalid_input("medicine name is required"));
    }
    check_dates(reminder.start_date, reminder.end_date)?;

    Ok(NewReminder {
        medicine_name,
        dosage: reminder.dosage.trim().to_string(),
        ..reminder
    })
}

fn check_dates(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(ServiceError::invalid_input(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schedule;

    fn reminder(start: (i32, u32, u32), end: (i32, u32, u32)) -> NewReminder {
        NewReminder {
            medicine_name: "  Metformin ".into(),
            dosage: " 500mg ".into(),
            schedule: Schedule::Every12Hours,
            start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        }
    }

    #[test]
    fn test_normalize_trims() {
        let r = normalize(reminder((2024, 1, 1), (2024, 2, 1))).unwrap();
        assert_eq!(r.medicine_name, "Metformin");
        assert_eq!(r.dosage, "500mg");
    }

    #[test]
    fn test_single_day_course_is_valid() {
        assert!(normalize(reminder((2024, 1, 1), (2024, 1, 1))).is_ok());
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = normalize(reminder((2024, 2, 1), (2024, 1, 1))).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
