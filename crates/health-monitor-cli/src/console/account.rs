//! Registration, login and profile screens

use std::io::{BufRead, Write};

use health_monitor_core::{NewUser, ProfileUpdate, ServiceError, Session};

use super::Console;
use crate::error::Result;

impl<R: BufRead, W: Write> Console<'_, R, W> {
    pub(super) fn register(&mut self) -> Result<()> {
        writeln!(self.out)?;
        let first_name = self.prompt("Please enter your first name: ")?;
        let last_name = self.prompt("Please enter your last name: ")?;
        let email = self.prompt("Please enter your email address: ")?;
        let password = self.prompt_secret("Please enter your password: ")?;

        let Some(is_doctor) = self.prompt_yes_no("Are you a licensed medical doctor? (Y/N) ")? else {
            return self.say("Oops! That's an invalid entry, please enter Y or N.");
        };

        let new_user = NewUser::new(first_name, last_name, email, password.as_str());
        let registered = if is_doctor {
            let license = self.prompt("Please enter your medical license number: ")?;
            let specialization = self.prompt("Please enter your specialization: ")?;
            self.monitor
                .accounts()
                .register_doctor(new_user, &license, &specialization)
                .map(|(user, _)| user)
        } else {
            self.monitor.accounts().register(new_user)
        };
        let Some(user) = self.report(registered)? else {
            return Ok(());
        };

        writeln!(self.out)?;
        self.say(format!(
            "Registration complete. Welcome aboard, {}! Please log in to continue.",
            user.first_name
        ))
    }

    pub(super) fn login(&mut self) -> Result<Option<Session>> {
        let email = self.prompt("Please enter your email address: ")?;
        let password = self.prompt_secret("Please enter your password: ")?;

        match self.monitor.accounts().login(&email, &password) {
            Ok(session) => {
                writeln!(self.out)?;
                self.say(format!("Hello, {}. Let's get Healthy!", session.user().first_name))?;
                Ok(Some(session))
            }
            Err(ServiceError::InvalidCredentials) => {
                self.say("Invalid email or password. Please try again.")?;
                Ok(None)
            }
            Err(e) => self.report(Err(e)),
        }
    }

    pub(super) fn update_profile(&mut self, session: &mut Session) -> Result<()> {
        let user = session.user().clone();
        self.heading("User Details")?;
        writeln!(self.out, "First Name: {}", user.first_name)?;
        writeln!(self.out, "Last Name: {}", user.last_name)?;
        writeln!(self.out, "Email: {}", user.email)?;
        writeln!(self.out, "Is Doctor: {}", if user.is_doctor { "Yes" } else { "No" })?;

        self.heading("Update User Profile")?;
        writeln!(self.out, "1. Update First Name")?;
        writeln!(self.out, "2. Update Last Name")?;
        writeln!(self.out, "3. Update Email")?;
        writeln!(self.out, "4. Update Password")?;
        writeln!(self.out, "5. Update Doctor Status")?;
        writeln!(self.out, "6. Exit")?;
        writeln!(self.out)?;

        let update = match self.prompt_number::<usize>("Please choose the number of your choice: ")? {
            1 => ProfileUpdate::FirstName(self.prompt("Enter new first name: ")?),
            2 => ProfileUpdate::LastName(self.prompt("Enter new last name: ")?),
            3 => ProfileUpdate::Email(self.prompt("Enter new email: ")?),
            4 => {
                let password = self.prompt_secret("Enter new password: ")?;
                ProfileUpdate::Password(password.to_string())
            }
            5 => match self.prompt_yes_no("Are you a licensed medical doctor? (Y/N): ")? {
                Some(is_doctor) => ProfileUpdate::DoctorStatus(is_doctor),
                None => return self.say("Oops! That's an invalid entry, please enter Y or N."),
            },
            6 => return Ok(()),
            _ => return self.say("Invalid choice. Please try again."),
        };

        let updated = self.monitor.accounts().update_profile(session, update);
        if self.report(updated)?.is_some() {
            self.say("User information updated successfully.")?;
        }
        Ok(())
    }

    /// Returns true when the account is gone and the session has ended
    pub(super) fn delete_profile(&mut self, session: &Session) -> Result<bool> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Deleting your account will permanently remove all the data associated with it."
        )?;
        writeln!(self.out)?;

        if self.prompt_yes_no("Delete Account (Y/N): ")? != Some(true) {
            self.say("So glad you've decided to keep investing in your health.")?;
            return Ok(false);
        }

        let deleted = self.monitor.accounts().delete_account(session.clone());
        if self.report(deleted)?.is_none() {
            return Ok(false);
        }
        writeln!(self.out)?;
        self.say("Your account has been successfully deleted. We're sad to see you go.")?;
        Ok(true)
    }
}
