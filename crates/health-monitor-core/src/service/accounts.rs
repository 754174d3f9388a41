//! Registration, login and profile management

use std::sync::Arc;

use super::Repositories;
use crate::error::{Result, ServiceError};
use crate::model::{normalize_email, DoctorProfile, NewUser, ProfileUpdate, User, UserDraft};
use crate::password::{hash_password, verify_password};
use crate::repository::{DoctorRepository, HealthDataRepository, ReminderRepository, UserRepository};
use crate::session::Session;

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    doctors: Arc<dyn DoctorRepository>,
    health: Arc<dyn HealthDataRepository>,
    reminders: Arc<dyn ReminderRepository>,
}

impl AccountService {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            users: repos.users.clone(),
            doctors: repos.doctors.clone(),
            health: repos.health.clone(),
            reminders: repos.reminders.clone(),
        }
    }

    /// Create an account. The email must be unused.
    pub fn register(&self, new_user: NewUser) -> Result<User> {
        let first_name = required("first name", &new_user.first_name)?;
        let last_name = required("last name", &new_user.last_name)?;
        let email = validate_email(&new_user.email)?;
        if new_user.password.is_empty() {
            return Err(ServiceError::invalid_input("password is required"));
        }

        let draft = UserDraft {
            first_name,
            last_name,
            email,
            password_hash: hash_password(&new_user.password)?,
            is_doctor: new_user.is_doctor,
        };

        let user = self.users.create(draft)?;
        tracing::info!(user_id = user.id, is_doctor = user.is_doctor, "Registered user");
        Ok(user)
    }

    /// Create a doctor account together with its profile.
    ///
    /// License and specialization are checked before anything is stored. If
    /// the profile cannot be saved the new account is removed again.
    pub fn register_doctor(
        &self,
        new_user: NewUser,
        medical_license_number: &str,
        specialization: &str,
    ) -> Result<(User, DoctorProfile)> {
        let medical_license_number = required("medical license number", medical_license_number)?;
        let specialization = required("specialization", specialization)?;

        let user = self.register(new_user.doctor())?;
        let profile = DoctorProfile {
            user_id: user.id,
            medical_license_number,
            specialization,
        };

        if let Err(e) = self.doctors.save_profile(&profile) {
            tracing::warn!(user_id = user.id, error = %e, "Doctor profile not saved, removing account");
            if let Err(cleanup) = self.users.delete(user.id) {
                tracing::error!(user_id = user.id, error = %cleanup, "Failed to remove account without profile");
            }
            return Err(e.into());
        }

        Ok((user, profile))
    }

    /// Verify credentials and open a session
    pub fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_by_email(&email)? else {
            tracing::warn!(email = %email, "Login rejected: unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login rejected: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in");
        Ok(Session::new(user))
    }

    /// Apply one profile change. Blank text values leave the field untouched.
    pub fn update_profile(&self, session: &mut Session, update: ProfileUpdate) -> Result<User> {
        let mut user = self.users.get(session.user_id())?;

        match update {
            ProfileUpdate::FirstName(v) => set_if_present(&mut user.first_name, &v),
            ProfileUpdate::LastName(v) => set_if_present(&mut user.last_name, &v),
            ProfileUpdate::Email(v) => {
                if !v.trim().is_empty() {
                    user.email = validate_email(&v)?;
                }
            }
            ProfileUpdate::Password(v) => {
                if !v.trim().is_empty() {
                    user.password_hash = hash_password(&v)?;
                }
            }
            ProfileUpdate::DoctorStatus(is_doctor) => user.is_doctor = is_doctor,
        }

        self.users.update(&user)?;
        tracing::info!(user_id = user.id, "Updated user profile");
        session.refresh(user.clone());
        Ok(user)
    }

    /// Delete the account and everything it owns. Consumes the session.
    ///
    /// Recommendation audit records are retained.
    pub fn delete_account(&self, session: Session) -> Result<()> {
        let user_id = session.user_id();

        let records = self.health.delete_for_user(user_id)?;
        let reminders = self.reminders.delete_for_user(user_id)?;
        self.doctors.remove_user(user_id)?;
        self.users.delete(user_id)?;

        tracing::info!(user_id, records, reminders, "Deleted user account");
        Ok(())
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(ServiceError::invalid_input(format!("{} is required", field)))
    } else {
        Ok(value.to_string())
    }
}

fn validate_email(email: &str) -> Result<String> {
    let email = normalize_email(email);
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ServiceError::invalid_input(format!(
            "'{}' is not a valid email address",
            email
        ))),
    }
}

fn set_if_present(field: &mut String, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        *field = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email(" A@B.org ").unwrap(), "a@b.org");
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@domain.com").is_err());
        assert!(validate_email("local@").is_err());
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Ada ").unwrap(), "Ada");
        assert!(matches!(required("name", "   "), Err(ServiceError::InvalidInput(_))));
    }

    #[test]
    fn test_set_if_present_keeps_blank() {
        let mut name = "Ada".to_string();
        set_if_present(&mut name, "  ");
        assert_eq!(name, "Ada");
        set_if_present(&mut name, " Grace ");
        assert_eq!(name, "Grace");
    }
}
