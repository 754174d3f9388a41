//! Medication reminders

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// How often a medicine is taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    #[default]
    Every24Hours,
    Every12Hours,
    Every8Hours,
}

impl Schedule {
    /// All schedules in menu order
    pub const ALL: [Schedule; 3] = [
        Schedule::Every24Hours,
        Schedule::Every12Hours,
        Schedule::Every8Hours,
    ];

    /// Map a 1-based menu choice to a schedule
    pub fn from_choice(choice: usize) -> Option<Self> {
        choice.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn interval_hours(&self) -> u32 {
        match self {
            Schedule::Every24Hours => 24,
            Schedule::Every12Hours => 12,
            Schedule::Every8Hours => 8,
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Every {} hours", self.interval_hours())
    }
}

/// Input for creating a reminder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub medicine_name: String,
    pub dosage: String,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A persisted reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineReminder {
    pub id: RecordId,
    /// The patient taking the medicine
    pub user_id: RecordId,
    pub medicine_name: String,
    pub dosage: String,
    pub schedule: Schedule,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Doctor who prescribed it, when created through the doctor portal
    #[serde(default)]
    pub prescribed_by: Option<RecordId>,
}

impl MedicineReminder {
    /// A reminder is overdue once its end date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

impl fmt::Display for MedicineReminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reminder ID: {}", self.id)?;
        writeln!(f, "Medicine Name: {}", self.medicine_name)?;
        writeln!(f, "Dosage: {}", self.dosage)?;
        writeln!(f, "Schedule: {}", self.schedule)?;
        writeln!(f, "Start Date: {}", self.start_date)?;
        write!(f, "End Date: {}", self.end_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_menu_choices() {
        assert_eq!(Schedule::from_choice(1), Some(Schedule::Every24Hours));
        assert_eq!(Schedule::from_choice(2), Some(Schedule::Every12Hours));
        assert_eq!(Schedule::from_choice(3), Some(Schedule::Every8Hours));
        assert_eq!(Schedule::from_choice(0), None);
        assert_eq!(Schedule::from_choice(4), None);
        assert_eq!(Schedule::default(), Schedule::Every24Hours);
    }

    #[test]
    fn test_schedule_display() {
        assert_eq!(Schedule::Every8Hours.to_string(), "Every 8 hours");
        assert_eq!(Schedule::Every24Hours.to_string(), "Every 24 hours");
    }

    #[test]
    fn test_is_overdue_is_strict() {
        let reminder = MedicineReminder {
            id: 1,
            user_id: 2,
            medicine_name: "Amoxicillin".into(),
            dosage: "500mg".into(),
            schedule: Schedule::Every8Hours,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 10),
            prescribed_by: None,
        };
        assert!(!reminder.is_overdue(date(2024, 1, 10)));
        assert!(reminder.is_overdue(date(2024, 1, 11)));
        assert!(!reminder.is_overdue(date(2024, 1, 5)));
    }
}
