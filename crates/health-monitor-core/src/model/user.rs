//! Users and doctor profiles
//!
//! A doctor is an ordinary [`User`] with `is_doctor` set and, optionally, a
//! [`DoctorProfile`] stored alongside it under the same user id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::RecordId;

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    /// Normalized (trimmed, lowercase) email; unique across users
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    pub is_doctor: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Registration input, carrying the plaintext password
#[derive(Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_doctor: bool,
}

impl NewUser {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            password: password.into(),
            is_doctor: false,
        }
    }

    /// Mark the registrant as a licensed doctor
    pub fn doctor(mut self) -> Self {
        self.is_doctor = true;
        self
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("is_doctor", &self.is_doctor)
            .finish()
    }
}

/// What a repository needs to create a user: the password is already hashed
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_doctor: bool,
}

/// A single-field change to the logged-in user's profile
#[derive(Clone)]
pub enum ProfileUpdate {
    FirstName(String),
    LastName(String),
    Email(String),
    Password(String),
    DoctorStatus(bool),
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileUpdate::FirstName(v) => f.debug_tuple("FirstName").field(v).finish(),
            ProfileUpdate::LastName(v) => f.debug_tuple("LastName").field(v).finish(),
            ProfileUpdate::Email(v) => f.debug_tuple("Email").field(v).finish(),
            ProfileUpdate::Password(_) => f.debug_tuple("Password").field(&"<redacted>").finish(),
            ProfileUpdate::DoctorStatus(v) => f.debug_tuple("DoctorStatus").field(v).finish(),
        }
    }
}

/// Professional details attached to a doctor account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub user_id: RecordId,
    pub medical_license_number: String,
    pub specialization: String,
}
