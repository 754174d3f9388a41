//! Interactive console
//!
//! A line-oriented, menu-driven front end over [`HealthMonitor`]. The console
//! is generic over its input and output so whole sessions can be scripted.
//!
//! Input rules:
//! - numeric answers re-prompt until they parse
//! - dates use the configured format; a malformed date aborts the action
//! - end of input leaves the console cleanly from any prompt

mod account;
mod doctor;
mod health;
mod reminders;

use chrono::{Local, NaiveDate};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;
use zeroize::Zeroizing;

use health_monitor_core::{HealthMonitor, Schedule, ServiceError, Session};

use crate::config::AppConfig;
use crate::error::{CliError, Result};

const CHOICE_PROMPT: &str = "Please enter the number of your choice: ";

pub struct Console<'a, R, W> {
    monitor: &'a HealthMonitor,
    config: &'a AppConfig,
    input: R,
    out: W,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(monitor: &'a HealthMonitor, config: &'a AppConfig, input: R, out: W) -> Self {
        Self {
            monitor,
            config,
            input,
            out,
            today: Local::now().date_naive(),
        }
    }

    /// Fix the date used to decide which reminders are overdue
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run until the user exits or input ends
    pub fn run(mut self) -> Result<()> {
        match self.main_menu() {
            Err(CliError::EndOfInput) => {
                tracing::debug!("Console input closed");
                writeln!(self.out)?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "Welcome to the Smart Health Monitoring System!")?;
            writeln!(self.out, "   \"Your Daily Dose of Health Made Simple.\"")?;
            self.heading("Let's Get Started")?;
            writeln!(self.out)?;
            writeln!(self.out, "1. New User Registration")?;
            writeln!(self.out, "2. Login")?;
            writeln!(self.out, "3. Exit")?;
            writeln!(self.out)?;

            match self.prompt_choice()? {
                1 => self.register()?,
                2 => {
                    if let Some(session) = self.login()? {
                        self.health_options(session)?;
                    }
                }
                3 => {
                    writeln!(self.out, "Have a Happy & Healthy Day!")?;
                    return Ok(());
                }
                _ => self.say("Oops! It appears that choice is invalid. Please choose again.")?,
            }
        }
    }

    fn health_options(&mut self, mut session: Session) -> Result<()> {
        loop {
            self.heading("Health Options")?;
            writeln!(self.out)?;
            for (number, item) in [
                "Update User Profile",
                "Delete User Profile",
                "Add Health Data Record",
                "Update Health Data Record",
                "Delete Health Data Record",
                "Retrieve Health Recommendations",
                "Add Medication Reminder",
                "Retrieve Medication Reminder List",
                "Retrieve Overdue Medication Reminders",
                "Update Medication Reminder",
                "Access Doctor Portal",
                "Logout",
            ]
            .iter()
            .enumerate()
            {
                writeln!(self.out, "{:<3} {}", format!("{}.", number + 1), item)?;
            }
            writeln!(self.out)?;

            match self.prompt_choice()? {
                1 => self.update_profile(&mut session)?,
                2 => {
                    if self.delete_profile(&session)? {
                        return Ok(());
                    }
                }
                3 => self.add_health_data(&session)?,
                4 => self.update_health_data(&session)?,
                5 => self.delete_health_data(&session)?,
                6 => self.show_recommendations(&session)?,
                7 => self.add_reminder(&session)?,
                8 => self.list_reminders(&session)?,
                9 => self.overdue_reminders(&session)?,
                10 => self.update_reminder(&session)?,
                11 => {
                    if session.is_doctor() {
                        self.doctor_portal(&session)?;
                        return self.logout(&session);
                    }
                    self.say("Access denied. You are not authorized to access the doctor portal.")?;
                }
                12 => return self.logout(&session),
                _ => self.say("Oops! It looks like that choice is invalid. Please choose again.")?,
            }
        }
    }

    fn logout(&mut self, session: &Session) -> Result<()> {
        tracing::info!(user_id = session.user_id(), "User logged out");
        self.say("You have been logged out.")
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn heading(&mut self, title: &str) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", title)?;
        writeln!(self.out, "{}", "-".repeat(title.chars().count()))?;
        Ok(())
    }

    /// Read one line, without the line terminator
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }

    /// Show `label` and read a trimmed answer
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;
        Ok(self.read_line()?.trim().to_string())
    }

    fn prompt_secret(&mut self, label: &str) -> Result<Zeroizing<String>> {
        write!(self.out, "{}", label)?;
        self.out.flush()?;

        let mut line = Zeroizing::new(String::new());
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }
        Ok(Zeroizing::new(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Re-prompt until the answer parses
    fn prompt_number<T: FromStr>(&mut self, label: &str) -> Result<T> {
        loop {
            match self.prompt(label)?.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    /// Like [`Self::prompt_number`] but also rejects NaN and infinities
    fn prompt_decimal(&mut self, label: &str) -> Result<f64> {
        loop {
            let value: f64 = self.prompt_number(label)?;
            if value.is_finite() {
                return Ok(value);
            }
            self.say("Please enter a valid number.")?;
        }
    }

    fn prompt_choice(&mut self) -> Result<usize> {
        self.prompt_number(CHOICE_PROMPT)
    }

    /// `Some(true)` for Y, `Some(false)` for N, `None` for anything else
    fn prompt_yes_no(&mut self, label: &str) -> Result<Option<bool>> {
        let answer = self.prompt(label)?;
        Ok(match answer.to_ascii_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        })
    }

    /// Read a date; prints the format hint and returns `None` if it does not parse
    fn prompt_date(&mut self, label: &str) -> Result<Option<NaiveDate>> {
        let label = format!("{} ({}): ", label, self.config.date_label());
        let input = self.prompt(&label)?;
        match self.config.parse_date(&input) {
            Some(date) => Ok(Some(date)),
            None => {
                let hint = format!(
                    "Invalid date format. Please enter date in {} format.",
                    self.config.date_label()
                );
                self.say(hint)?;
                Ok(None)
            }
        }
    }

    fn prompt_schedule(&mut self) -> Result<Schedule> {
        writeln!(self.out)?;
        writeln!(self.out, "Please Choose Your Medication Schedule")?;
        writeln!(self.out)?;
        for (number, schedule) in Schedule::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", number + 1, schedule)?;
        }
        writeln!(self.out)?;

        let choice = self.prompt_choice()?;
        match Schedule::from_choice(choice) {
            Some(schedule) => Ok(schedule),
            None => {
                self.say("Invalid choice. Defaulting to every 24 hours.")?;
                Ok(Schedule::default())
            }
        }
    }

    /// Pick an item from a numbered list by its 1-based position
    fn select<'l, T>(&mut self, items: &'l [T], label: &str) -> Result<Option<&'l T>> {
        let choice: usize = self.prompt_number(label)?;
        Ok(choice.checked_sub(1).and_then(|i| items.get(i)))
    }

    /// Print user-facing service errors and carry on; anything else is fatal
    fn report<T>(&mut self, result: std::result::Result<T, ServiceError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(ServiceError::NotFound(msg)) => {
                self.say(msg)?;
                Ok(None)
            }
            Err(e) if e.is_user_error() => {
                self.say(e)?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
