//! Domain model
//!
//! Plain value types shared by the evaluator, the services and the storage
//! backends. Identifiers are store-assigned and monotonically increasing, so
//! ordering by id is ordering by creation.

pub mod health;
pub mod recommendation;
pub mod reminder;
pub mod user;

pub use health::{HealthMetrics, HealthMetricsSnapshot, HealthRecord};
pub use recommendation::RecommendationAuditRecord;
pub use reminder::{MedicineReminder, NewReminder, Schedule};
pub use user::{normalize_email, DoctorProfile, NewUser, ProfileUpdate, User, UserDraft};

/// Store-assigned identifier for every persisted entity
pub type RecordId = u64;
