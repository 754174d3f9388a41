//! Health Monitor Storage
//!
//! Embedded storage for Health Monitor on top of [sled]. A single
//! [`SledStore`] implements every repository trait from
//! `health_monitor_core::repository`, so it can back all services at once:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use health_monitor_core::{HealthMonitor, Repositories};
//! use health_monitor_storage::SledStore;
//!
//! let store = Arc::new(SledStore::open("./health-monitor-data")?);
//! let monitor = HealthMonitor::new(Repositories::from_store(store));
//! # Ok::<(), health_monitor_core::StoreError>(())
//! ```
//!
//! ## Layout
//!
//! | Tree | Key | Value |
//! |------|-----|-------|
//! | `users` | user id | JSON [`User`](health_monitor_core::User) |
//! | `users_by_email` | normalized email | user id |
//! | `doctor_profiles` | user id | JSON profile |
//! | `doctor_patients` | doctor id, patient id | empty |
//! | `patient_doctors` | patient id, doctor id | empty |
//! | `health_data`, `reminders`, `recommendations` | record id | JSON record |
//! | `<table>_by_user` | owner id, record id | empty |
//!
//! Ids come from sled's monotonic id generator and are shared by all trees,
//! so a higher id always means a later insert.

mod accounts;
mod keys;
mod records;
mod table;

use sled::transaction::{TransactionError, TransactionResult};
use sled::{Db, Tree};
use std::fmt;
use std::path::Path;

use health_monitor_core::{
    HealthRecord, MedicineReminder, RecommendationAuditRecord, RecordId, StoreError, StoreResult,
};

use table::UserTable;

/// sled-backed implementation of every repository trait
pub struct SledStore {
    db: Db,
    users: Tree,
    users_by_email: Tree,
    doctor_profiles: Tree,
    doctor_patients: Tree,
    patient_doctors: Tree,
    health: UserTable<HealthRecord>,
    reminders: UserTable<MedicineReminder>,
    recommendations: UserTable<RecommendationAuditRecord>,
}

impl SledStore {
    /// Open (or create) a store in the given directory
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let db = sled::open(path).map_err(db_err)?;
        tracing::info!(path = %path.display(), "Opened data store");
        Self::from_db(db)
    }

    /// A store that lives only as long as this value
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open().map_err(db_err)?;
        tracing::debug!("Opened temporary data store");
        Self::from_db(db)
    }

    fn from_db(db: Db) -> StoreResult<Self> {
        Ok(Self {
            users: db.open_tree("users").map_err(db_err)?,
            users_by_email: db.open_tree("users_by_email").map_err(db_err)?,
            doctor_profiles: db.open_tree("doctor_profiles").map_err(db_err)?,
            doctor_patients: db.open_tree("doctor_patients").map_err(db_err)?,
            patient_doctors: db.open_tree("patient_doctors").map_err(db_err)?,
            health: UserTable::open(&db, "health_data", "health record")?,
            reminders: UserTable::open(&db, "reminders", "reminder")?,
            recommendations: UserTable::open(&db, "recommendations", "recommendation")?,
            db,
        })
    }

    /// Write all pending changes to disk
    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush().map_err(db_err)?;
        Ok(())
    }

    fn next_id(&self) -> StoreResult<RecordId> {
        // sled starts at 0; keep 0 free so ids read like row numbers
        Ok(self.db.generate_id().map_err(db_err)? + 1)
    }
}

impl fmt::Debug for SledStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SledStore")
            .field("users", &self.users.len())
            .field("size_on_disk", &self.db.size_on_disk().ok())
            .finish_non_exhaustive()
    }
}

pub(crate) fn db_err(err: sled::Error) -> StoreError {
    StoreError::unavailable(err.to_string())
}

pub(crate) fn tx_result<T>(result: TransactionResult<T, StoreError>) -> StoreResult<T> {
    result.map_err(|e| match e {
        TransactionError::Abort(e) => e,
        TransactionError::Storage(e) => db_err(e),
    })
}
