//! Repository traits
//!
//! One trait per entity. Services and the recommendation evaluator depend on
//! these traits only, never on a concrete store. Implementations return
//! [`StoreError::NotFound`](crate::error::StoreError::NotFound) when a
//! record addressed by id does not exist, and
//! [`StoreError::Unavailable`](crate::error::StoreError::Unavailable) when the
//! store itself failed.
//!
//! All operations are synchronous and blocking.

use chrono::NaiveDate;

use crate::error::StoreResult;
use crate::model::{
    DoctorProfile, HealthMetrics, HealthRecord, MedicineReminder, NewReminder,
    RecommendationAuditRecord, RecordId, User, UserDraft,
};

/// Account storage
pub trait UserRepository: Send + Sync {
    /// Persist a new user. Fails with `Conflict` if the email is taken.
    fn create(&self, draft: UserDraft) -> StoreResult<User>;

    fn get(&self, id: RecordId) -> StoreResult<User>;

    /// Look up by normalized email
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Overwrite an existing user. Fails with `Conflict` if the new email is
    /// taken by someone else.
    fn update(&self, user: &User) -> StoreResult<()>;

    fn delete(&self, id: RecordId) -> StoreResult<()>;
}

/// Doctor profiles and the doctor-patient relation
pub trait DoctorRepository: Send + Sync {
    /// Insert or replace the profile for `profile.user_id`
    fn save_profile(&self, profile: &DoctorProfile) -> StoreResult<()>;

    fn profile(&self, user_id: RecordId) -> StoreResult<Option<DoctorProfile>>;

    fn assign_patient(&self, doctor_id: RecordId, patient_id: RecordId) -> StoreResult<()>;

    fn is_assigned(&self, doctor_id: RecordId, patient_id: RecordId) -> StoreResult<bool>;

    /// Patient ids in ascending order
    fn patient_ids(&self, doctor_id: RecordId) -> StoreResult<Vec<RecordId>>;

    /// Drop the profile and every link where the user is doctor or patient
    fn remove_user(&self, user_id: RecordId) -> StoreResult<()>;
}

/// Health metrics storage
pub trait HealthDataRepository: Send + Sync {
    fn create(&self, user_id: RecordId, metrics: HealthMetrics) -> StoreResult<HealthRecord>;

    fn get(&self, id: RecordId) -> StoreResult<HealthRecord>;

    /// Records of one user, oldest first
    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<HealthRecord>>;

    /// The most recently added record of a user
    fn latest_for_user(&self, user_id: RecordId) -> StoreResult<Option<HealthRecord>> {
        Ok(self.list_for_user(user_id)?.pop())
    }

    fn update(&self, record: &HealthRecord) -> StoreResult<()>;

    fn delete(&self, id: RecordId) -> StoreResult<()>;

    /// Remove every record of a user, returning how many were removed
    fn delete_for_user(&self, user_id: RecordId) -> StoreResult<usize>;
}

/// Medication reminder storage
pub trait ReminderRepository: Send + Sync {
    fn create(
        &self,
        user_id: RecordId,
        reminder: &NewReminder,
        prescribed_by: Option<RecordId>,
    ) -> StoreResult<MedicineReminder>;

    fn get(&self, id: RecordId) -> StoreResult<MedicineReminder>;

    /// Reminders of one user, oldest first
    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<MedicineReminder>>;

    fn update(&self, reminder: &MedicineReminder) -> StoreResult<()>;

    fn delete(&self, id: RecordId) -> StoreResult<()>;

    fn delete_for_user(&self, user_id: RecordId) -> StoreResult<usize>;
}

/// Append-only sink for recommendation audit records
pub trait RecommendationAuditWriter: Send + Sync {
    fn record(&self, user_id: RecordId, text: &str, date: NaiveDate) -> StoreResult<()>;
}

/// Read side of the recommendation audit trail
pub trait RecommendationHistory: Send + Sync {
    /// Audit records of one user, oldest first
    fn list_for_user(&self, user_id: RecordId) -> StoreResult<Vec<RecommendationAuditRecord>>;
}
