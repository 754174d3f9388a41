//! Medication reminder screens

use std::io::{BufRead, Write};

use health_monitor_core::{MedicineReminder, NewReminder, RecordId, Session};

use super::Console;
use crate::error::Result;

impl<R: BufRead, W: Write> Console<'_, R, W> {
    /// Prompts shared by self-service reminders and doctor prescriptions.
    /// `None` if a date did not parse.
    pub(super) fn prompt_new_reminder(&mut self) -> Result<Option<NewReminder>> {
        self.heading("New Medication Reminder")?;
        writeln!(self.out)?;

        let medicine_name = self.prompt("Medicine Name: ")?;
        let dosage = self.prompt("Dosage: ")?;
        let schedule = self.prompt_schedule()?;

        let Some(start_date) = self.prompt_date("Start Date")? else {
            return Ok(None);
        };
        let Some(end_date) = self.prompt_date("End Date")? else {
            return Ok(None);
        };

        Ok(Some(NewReminder {
            medicine_name,
            dosage,
            schedule,
            start_date,
            end_date,
        }))
    }

    pub(super) fn add_reminder(&mut self, session: &Session) -> Result<()> {
        let Some(reminder) = self.prompt_new_reminder()? else {
            return Ok(());
        };

        let added = self.monitor.reminders().add(session, reminder);
        if self.report(added)?.is_some() {
            writeln!(self.out)?;
            self.say("Your medication reminder has been added successfully.")?;
        }
        Ok(())
    }

    pub(super) fn print_reminders(&mut self, reminders: &[MedicineReminder]) -> Result<()> {
        for reminder in reminders {
            writeln!(self.out, "{}", reminder)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub(super) fn list_reminders(&mut self, session: &Session) -> Result<()> {
        let listed = self.monitor.reminders().list(session);
        let Some(reminders) = self.report(listed)? else {
            return Ok(());
        };
        if reminders.is_empty() {
            return self.say("No medication reminders found for the current user.");
        }

        self.heading("Medication Reminders")?;
        writeln!(self.out)?;
        self.print_reminders(&reminders)
    }

    pub(super) fn overdue_reminders(&mut self, session: &Session) -> Result<()> {
        let today = self.today;
        let listed = self.monitor.reminders().overdue(session, today);
        let Some(overdue) = self.report(listed)? else {
            return Ok(());
        };
        if overdue.is_empty() {
            return self.say("You have no overdue medication reminders at this time.");
        }

        self.heading("Overdue Medication Reminders")?;
        self.print_reminders(&overdue)?;

        if self.prompt_yes_no("Do you want to delete any overdue reminders? (Y/N) ")? != Some(true) {
            return Ok(());
        }

        let id: RecordId =
            self.prompt_number("Enter the Reminder ID of the medication reminder you wish to delete: ")?;
        if !overdue.iter().any(|r| r.id == id) {
            return self.say(format!(
                "No medication reminder found with the ID {}. Please choose again.",
                id
            ));
        }

        let deleted = self.monitor.reminders().delete(session, id);
        if self.report(deleted)?.is_some() {
            self.say("Medication reminder deleted.")?;
        }
        Ok(())
    }

    pub(super) fn update_reminder(&mut self, session: &Session) -> Result<()> {
        let listed = self.monitor.reminders().list(session);
        let Some(reminders) = self.report(listed)? else {
            return Ok(());
        };
        if reminders.is_empty() {
            return self.say(
                "No medicine reminders found for the current user. Please enter a medicine reminder.",
            );
        }

        self.heading("Medicine Reminders")?;
        writeln!(self.out)?;
        for (index, reminder) in reminders.iter().enumerate() {
            writeln!(self.out, "{}. Medicine Name: {}", index + 1, reminder.medicine_name)?;
        }
        writeln!(self.out)?;

        let selected = self.select(
            &reminders,
            "Please choose the number of the medicine reminder you wish to update: ",
        )?;
        let Some(mut reminder) = selected.cloned() else {
            return self.say("Oops! It appears that choice is invalid. Please choose again.");
        };

        self.heading("Current Medicine Reminder")?;
        writeln!(self.out, "Medicine: {}", reminder.medicine_name)?;
        writeln!(self.out, "Dosage: {}", reminder.dosage)?;
        writeln!(self.out, "Schedule: {}", reminder.schedule)?;
        writeln!(self.out, "Start Date: {}", reminder.start_date)?;
        writeln!(self.out, "End Date: {}", reminder.end_date)?;

        self.heading("Update Medicine Reminder")?;
        writeln!(self.out, "1. Update Medicine Name")?;
        writeln!(self.out, "2. Update Dosage")?;
        writeln!(self.out, "3. Update Schedule")?;
        writeln!(self.out, "4. Update Start Date")?;
        writeln!(self.out, "5. Update End Date")?;
        writeln!(self.out, "6. Exit")?;
        writeln!(self.out)?;

        match self.prompt_choice()? {
            1 => reminder.medicine_name = self.prompt("Enter new medicine name: ")?,
            2 => reminder.dosage = self.prompt("Enter new dosage: ")?,
            3 => reminder.schedule = self.prompt_schedule()?,
            4 => match self.prompt_date("Enter new start date")? {
                Some(date) => reminder.start_date = date,
                None => return Ok(()),
            },
            5 => match self.prompt_date("Enter new end date")? {
                Some(date) => reminder.end_date = date,
                None => return Ok(()),
            },
            6 => return Ok(()),
            _ => return self.say("Oops! It appears that option is not available. Please choose again."),
        }

        let updated = self.monitor.reminders().update(session, &reminder);
        if self.report(updated)?.is_some() {
            writeln!(self.out)?;
            self.say("Medication Reminder updated successfully.")?;
        }
        Ok(())
    }
}
