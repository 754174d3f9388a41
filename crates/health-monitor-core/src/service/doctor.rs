//! Doctor portal
//!
//! Doctors see and manage data of the patients assigned to them. Every
//! operation checks the session's doctor flag and the assignment.

use std::sync::Arc;

use super::reminders::normalize;
use super::Repositories;
use crate::error::{Result, ServiceError};
use crate::model::{
    normalize_email, DoctorProfile, HealthRecord, MedicineReminder, NewReminder, RecordId, User,
};
use crate::repository::{DoctorRepository, HealthDataRepository, ReminderRepository, UserRepository};
use crate::session::Session;

pub struct DoctorPortal {
    users: Arc<dyn UserRepository>,
    doctors: Arc<dyn DoctorRepository>,
    health: Arc<dyn HealthDataRepository>,
    reminders: Arc<dyn ReminderRepository>,
}

impl DoctorPortal {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            users: repos.users.clone(),
            doctors: repos.doctors.clone(),
            health: repos.health.clone(),
            reminders: repos.reminders.clone(),
        }
    }

    pub fn profile(&self, session: &Session) -> Result<Option<DoctorProfile>> {
        require_doctor(session)?;
        Ok(self.doctors.profile(session.user_id())?)
    }

    /// Patients assigned to the session doctor. Links to deleted users are skipped.
    pub fn patients(&self, session: &Session) -> Result<Vec<User>> {
        require_doctor(session)?;

        let mut patients = Vec::new();
        for id in self.doctors.patient_ids(session.user_id())? {
            match self.users.get(id) {
                Ok(user) => patients.push(user),
                Err(e) if e.is_not_found() => {
                    tracing::debug!(doctor_id = session.user_id(), patient_id = id, "Skipping dangling patient link");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(patients)
    }

    pub fn patient_health_data(&self, session: &Session, patient_id: RecordId) -> Result<Vec<HealthRecord>> {
        self.require_patient(session, patient_id)?;
        Ok(self.health.list_for_user(patient_id)?)
    }

    pub fn patient_reminders(&self, session: &Session, patient_id: RecordId) -> Result<Vec<MedicineReminder>> {
        self.require_patient(session, patient_id)?;
        Ok(self.reminders.list_for_user(patient_id)?)
    }

    /// Create a reminder owned by the patient and attributed to the doctor
    pub fn prescribe(
        &self,
        session: &Session,
        patient_id: RecordId,
        reminder: NewReminder,
    ) -> Result<MedicineReminder> {
        self.require_patient(session, patient_id)?;
        let reminder = normalize(reminder)?;

        let created = self
            .reminders
            .create(patient_id, &reminder, Some(session.user_id()))?;
        tracing::info!(
            doctor_id = session.user_id(),
            patient_id,
            reminder_id = created.id,
            "Prescribed medication"
        );
        Ok(created)
    }

    /// Link a patient to a doctor, both addressed by email
    pub fn assign(&self, doctor_email: &str, patient_email: &str) -> Result<(User, User)> {
        let doctor = self.user_by_email(doctor_email)?;
        let patient = self.user_by_email(patient_email)?;

        if !doctor.is_doctor {
            return Err(ServiceError::invalid_input(format!(
                "{} is not registered as a doctor",
                doctor.email
            )));
        }
        if doctor.id == patient.id {
            return Err(ServiceError::invalid_input("a doctor cannot be their own patient"));
        }

        self.doctors.assign_patient(doctor.id, patient.id)?;
        tracing::info!(doctor_id = doctor.id, patient_id = patient.id, "Assigned patient");
        Ok((doctor, patient))
    }

    fn user_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_email(email);
        self.users
            .find_by_email(&email)?
            .ok_or_else(|| ServiceError::NotFound(format!("no user with email {}", email)))
    }

    fn require_patient(&self, session: &Session, patient_id: RecordId) -> Result<()> {
        require_doctor(session)?;
        if !self.doctors.is_assigned(session.user_id(), patient_id)? {
            return Err(ServiceError::access_denied(format!(
                "patient {} is not assigned to you",
                patient_id
            )));
        }
        Ok(())
    }
}

fn require_doctor(session: &Session) -> Result<()> {
    if session.is_doctor() {
        Ok(())
    } else {
        Err(ServiceError::access_denied(
            "You are not authorized to access the doctor portal.",
        ))
    }
}
