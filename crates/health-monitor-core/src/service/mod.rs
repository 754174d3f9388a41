//! Application services
//!
//! Each service owns the repository handles it needs and takes the caller's
//! [`Session`](crate::session::Session) explicitly. [`HealthMonitor`] bundles
//! them for the front end.

pub mod accounts;
pub mod doctor;
pub mod health_data;
pub mod recommendations;
pub mod reminders;

pub use accounts::AccountService;
pub use doctor::DoctorPortal;
pub use health_data::HealthDataService;
pub use recommendations::{Recommendation, RecommendationService};
pub use reminders::ReminderService;

use std::sync::Arc;

use crate::repository::{
    DoctorRepository, HealthDataRepository, RecommendationAuditWriter, RecommendationHistory,
    ReminderRepository, UserRepository,
};

/// Repository handles shared by the services
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub doctors: Arc<dyn DoctorRepository>,
    pub health: Arc<dyn HealthDataRepository>,
    pub reminders: Arc<dyn ReminderRepository>,
    pub audit: Arc<dyn RecommendationAuditWriter>,
    pub history: Arc<dyn RecommendationHistory>,
}

impl Repositories {
    /// Use one store that implements every repository trait
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: UserRepository
            + DoctorRepository
            + HealthDataRepository
            + ReminderRepository
            + RecommendationAuditWriter
            + RecommendationHistory
            + 'static,
    {
        Self {
            users: store.clone(),
            doctors: store.clone(),
            health: store.clone(),
            reminders: store.clone(),
            audit: store.clone(),
            history: store,
        }
    }
}

/// All services over one set of repositories
pub struct HealthMonitor {
    accounts: AccountService,
    health_data: HealthDataService,
    recommendations: RecommendationService,
    reminders: ReminderService,
    doctors: DoctorPortal,
}

impl HealthMonitor {
    pub fn new(repos: Repositories) -> Self {
        Self {
            accounts: AccountService::new(&repos),
            health_data: HealthDataService::new(&repos),
            recommendations: RecommendationService::new(&repos),
            reminders: ReminderService::new(&repos),
            doctors: DoctorPortal::new(&repos),
        }
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn health_data(&self) -> &HealthDataService {
        &self.health_data
    }

    pub fn recommendations(&self) -> &RecommendationService {
        &self.recommendations
    }

    pub fn reminders(&self) -> &ReminderService {
        &self.reminders
    }

    pub fn doctors(&self) -> &DoctorPortal {
        &self.doctors
    }
}
