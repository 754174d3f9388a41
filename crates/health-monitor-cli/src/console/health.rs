//! Health data and recommendation screens

use std::io::{BufRead, Write};

use health_monitor_core::{HealthMetrics, HealthRecord, Session};

use super::Console;
use crate::error::Result;

impl<R: BufRead, W: Write> Console<'_, R, W> {
    pub(super) fn add_health_data(&mut self, session: &Session) -> Result<()> {
        self.heading("Your Health Data")?;
        let Some(date) = self.prompt_date("Date")? else {
            return Ok(());
        };

        let metrics = HealthMetrics {
            weight_kg: self.prompt_decimal("Weight (kg): ")?,
            height_cm: self.prompt_decimal("Height (cms): ")?,
            steps: self.prompt_number("Steps Count: ")?,
            heart_rate: self.prompt_number("Heart Rate: ")?,
            water_intake_oz: self.prompt_decimal("Water Intake (ozs): ")?,
            hours_of_sleep: self.prompt_decimal("Hours of Sleep (hrs): ")?,
            date,
        };

        let added = self.monitor.health_data().add(session, metrics);
        if self.report(added)?.is_some() {
            writeln!(self.out)?;
            self.say("Your health data has been updated successfully.")?;
        }
        Ok(())
    }

    /// Numbered list of record dates; `None` when there is nothing to show
    fn pick_record(&mut self, session: &Session, label: &str, empty: &str) -> Result<Option<HealthRecord>> {
        let listed = self.monitor.health_data().list(session);
        let Some(records) = self.report(listed)? else {
            return Ok(None);
        };
        if records.is_empty() {
            self.say(empty)?;
            return Ok(None);
        }

        self.heading("Health Records")?;
        writeln!(self.out)?;
        for (index, record) in records.iter().enumerate() {
            writeln!(self.out, "{}. Date: {}", index + 1, record.metrics.date)?;
        }
        writeln!(self.out)?;

        match self.select(&records, label)? {
            Some(record) => Ok(Some(record.clone())),
            None => {
                self.say("Oops! It appears that choice is invalid. Please choose again.")?;
                Ok(None)
            }
        }
    }

    pub(super) fn update_health_data(&mut self, session: &Session) -> Result<()> {
        let Some(mut record) = self.pick_record(
            session,
            "Please choose the number of the health data record you wish to update: ",
            "No health data found for the current user. Please enter a health data record.",
        )?
        else {
            return Ok(());
        };

        self.heading("Current Health Data")?;
        writeln!(self.out, "{}", record)?;

        self.heading("Update Health Data")?;
        writeln!(self.out, "1. Update Weight")?;
        writeln!(self.out, "2. Update Height")?;
        writeln!(self.out, "3. Update Steps")?;
        writeln!(self.out, "4. Update Heart Rate")?;
        writeln!(self.out, "5. Update Water Intake")?;
        writeln!(self.out, "6. Update Hours of Sleep")?;
        writeln!(self.out, "7. Exit")?;
        writeln!(self.out)?;

        let m = &mut record.metrics;
        match self.prompt_choice()? {
            1 => m.weight_kg = self.prompt_decimal("Enter new weight: ")?,
            2 => m.height_cm = self.prompt_decimal("Enter new height: ")?,
            3 => m.steps = self.prompt_number("Enter new steps count: ")?,
            4 => m.heart_rate = self.prompt_number("Enter new heart rate: ")?,
            5 => m.water_intake_oz = self.prompt_decimal("Enter new water intake amount in ounces: ")?,
            6 => m.hours_of_sleep = self.prompt_decimal("Enter new hours of sleep: ")?,
            7 => return Ok(()),
            _ => return self.say("Oops! It appears that option is not available. Please choose again."),
        }

        let updated = self.monitor.health_data().update(session, &record);
        if self.report(updated)?.is_some() {
            writeln!(self.out)?;
            self.say("Your Health Data record has been updated successfully.")?;
        }
        Ok(())
    }

    pub(super) fn delete_health_data(&mut self, session: &Session) -> Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Deleting your health record will permanently remove all the data associated with it."
        )?;

        let Some(record) = self.pick_record(
            session,
            "Please choose the number of the health record you want to delete: ",
            "No health records found.",
        )?
        else {
            return Ok(());
        };

        if self.prompt_yes_no("Delete Health Data Record (Y/N): ")? != Some(true) {
            return self.say("This health record will remain on file.");
        }

        let deleted = self.monitor.health_data().delete(session, record.id);
        if self.report(deleted)?.is_some() {
            writeln!(self.out)?;
            self.say("Your health record has been successfully deleted.")?;
        }
        Ok(())
    }

    pub(super) fn show_recommendations(&mut self, session: &Session) -> Result<()> {
        let recommended = self.monitor.recommendations().recommend(session);
        let Some(recommendation) = self.report(recommended)? else {
            return Ok(());
        };

        self.heading("Health Recommendations")?;
        writeln!(self.out)?;
        for advisory in &recommendation.advisories {
            writeln!(self.out, "* {}", advisory)?;
            writeln!(self.out)?;
        }
        Ok(())
    }
}
