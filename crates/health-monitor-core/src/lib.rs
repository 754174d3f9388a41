//! Health Monitor Core
//!
//! Domain model, rule-based recommendation evaluator and application services
//! for the Health Monitor console.
//!
//! ## Architecture
//!
//! 1. **Model** (`model/`): users, doctor profiles, health records,
//!    medication reminders and recommendation audit records.
//!
//! 2. **Engine** (`engine/`): the recommendation evaluator. Threshold rules run
//!    in a fixed order over a [`HealthMetricsSnapshot`]; the resulting
//!    [`AdvisoryList`] is written to an audit sink on a best-effort basis.
//!
//! 3. **Repositories** (`repository`): one trait per entity. Storage backends
//!    live in other crates.
//!
//! 4. **Services** (`service/`): accounts, health data, recommendations,
//!    reminders and the doctor portal. User-scoped operations take an explicit
//!    [`Session`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use health_monitor_core::{HealthMetricsSnapshot, RecommendationEvaluator};
//! # use health_monitor_core::repository::RecommendationAuditWriter;
//! # fn sink() -> Arc<dyn RecommendationAuditWriter> { unimplemented!() }
//!
//! let evaluator = RecommendationEvaluator::new(sink());
//! let snapshot = HealthMetricsSnapshot {
//!     user_id: 1,
//!     heart_rate: 110,
//!     steps: 5_000,
//!     water_intake_oz: 50.0,
//!     hours_of_sleep: 5.0,
//!     date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
//! };
//!
//! for advisory in &evaluator.evaluate(&snapshot) {
//!     println!("* {}", advisory);
//! }
//! ```

pub mod engine;
pub mod error;
pub mod model;
pub mod password;
pub mod repository;
pub mod service;
pub mod session;

pub use engine::{Advisory, AdvisoryKind, AdvisoryList, RecommendationEvaluator};
pub use error::{Result, ServiceError, StoreError, StoreResult};
pub use model::{
    DoctorProfile, HealthMetrics, HealthMetricsSnapshot, HealthRecord, MedicineReminder,
    NewReminder, NewUser, ProfileUpdate, RecommendationAuditRecord, RecordId, Schedule, User,
    UserDraft,
};
pub use service::{HealthMonitor, Recommendation, Repositories};
pub use session::Session;
