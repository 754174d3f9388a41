//! Doctor portal screens
//!
//! Only reachable for sessions with the doctor flag. Choosing "Logout" here
//! ends the whole session, not just the portal.

use std::io::{BufRead, Write};

use health_monitor_core::{Session, User};

use super::Console;
use crate::error::Result;

impl<R: BufRead, W: Write> Console<'_, R, W> {
    pub(super) fn doctor_portal(&mut self, session: &Session) -> Result<()> {
        let profile = self.monitor.doctors().profile(session);
        if let Some(profile) = self.report(profile)? {
            writeln!(self.out)?;
            writeln!(self.out, "Doctor: {}", session.user().full_name())?;
            match profile {
                Some(profile) => {
                    writeln!(self.out, "Specialization: {}", profile.specialization)?;
                    writeln!(self.out, "License Number: {}", profile.medical_license_number)?;
                }
                None => writeln!(self.out, "No doctor profile on file.")?,
            }
        }

        loop {
            self.heading("Doctor Portal Menu")?;
            writeln!(self.out)?;
            writeln!(self.out, "1. View All Patients")?;
            writeln!(self.out, "2. View Patient Medication List")?;
            writeln!(self.out, "3. View Patient Health Data")?;
            writeln!(self.out, "4. Prescribe Patient Medication")?;
            writeln!(self.out, "5. Logout")?;
            writeln!(self.out)?;

            match self.prompt_choice()? {
                1 => self.view_patients(session)?,
                2 => self.view_patient_reminders(session)?,
                3 => self.view_patient_health_data(session)?,
                4 => self.prescribe(session)?,
                5 => return Ok(()),
                _ => self.say("Oops! It appears that choice is not available. Please choose again.")?,
            }
        }
    }

    fn patients(&mut self, session: &Session) -> Result<Option<Vec<User>>> {
        let listed = self.monitor.doctors().patients(session);
        let Some(patients) = self.report(listed)? else {
            return Ok(None);
        };
        if patients.is_empty() {
            self.say(format!(
                "No patients found for Doctor {}",
                session.user().full_name()
            ))?;
            return Ok(None);
        }
        Ok(Some(patients))
    }

    /// Numbered patient list followed by a selection prompt
    fn pick_patient(&mut self, session: &Session) -> Result<Option<User>> {
        let Some(patients) = self.patients(session)? else {
            return Ok(None);
        };

        self.heading(&format!("Patient List for Doctor {}", session.user().full_name()))?;
        writeln!(self.out)?;
        for (index, patient) in patients.iter().enumerate() {
            writeln!(self.out, "{}. {}", index + 1, patient.full_name())?;
        }
        writeln!(self.out)?;

        let selected = self
            .select(&patients, "Select a patient by entering the number of your choice: ")?
            .cloned();
        if selected.is_none() {
            self.say("Invalid choice. Please select a valid patient.")?;
        }
        Ok(selected)
    }

    fn view_patients(&mut self, session: &Session) -> Result<()> {
        let Some(patients) = self.patients(session)? else {
            return Ok(());
        };

        self.heading(&format!(
            "Detailed Patient List for Doctor {}",
            session.user().full_name()
        ))?;
        writeln!(self.out)?;
        for patient in &patients {
            writeln!(self.out, "Patient ID: {}", patient.id)?;
            writeln!(self.out, "Name: {}", patient.full_name())?;
            writeln!(self.out, "Email: {}", patient.email)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn view_patient_reminders(&mut self, session: &Session) -> Result<()> {
        let Some(patient) = self.pick_patient(session)? else {
            return Ok(());
        };

        let listed = self.monitor.doctors().patient_reminders(session, patient.id);
        let Some(reminders) = self.report(listed)? else {
            return Ok(());
        };
        if reminders.is_empty() {
            return self.say(format!("No medicine reminders found for {}", patient.full_name()));
        }

        self.heading(&format!("Medicine reminders for {}", patient.full_name()))?;
        self.print_reminders(&reminders)
    }

    fn view_patient_health_data(&mut self, session: &Session) -> Result<()> {
        let Some(patient) = self.pick_patient(session)? else {
            return Ok(());
        };

        let listed = self.monitor.doctors().patient_health_data(session, patient.id);
        let Some(records) = self.report(listed)? else {
            return Ok(());
        };
        if records.is_empty() {
            writeln!(self.out)?;
            return self.say(format!(
                "No health data found for Patient {}.",
                patient.full_name()
            ));
        }

        for record in &records {
            self.heading(&format!("Health Data for {}", patient.full_name()))?;
            writeln!(self.out, "{}", record)?;
        }
        Ok(())
    }

    fn prescribe(&mut self, session: &Session) -> Result<()> {
        let Some(patient) = self.pick_patient(session)? else {
            return Ok(());
        };
        let Some(reminder) = self.prompt_new_reminder()? else {
            return Ok(());
        };

        let prescribed = self.monitor.doctors().prescribe(session, patient.id, reminder);
        if self.report(prescribed)?.is_some() {
            writeln!(self.out)?;
            self.say(format!(
                "Medication prescribed to {} successfully.",
                patient.full_name()
            ))?;
        }
        Ok(())
    }
}
