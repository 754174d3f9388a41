//! Logged-in session
//!
//! A `Session` is created by a successful login and passed explicitly to
//! every user-scoped operation. Dropping it is logging out.

use crate::model::{RecordId, User};

#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    pub(crate) fn new(user: User) -> Self {
        Self { user }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn user_id(&self) -> RecordId {
        self.user.id
    }

    pub fn is_doctor(&self) -> bool {
        self.user.is_doctor
    }

    /// Replace the cached user after a profile change
    pub(crate) fn refresh(&mut self, user: User) {
        self.user = user;
    }
}
