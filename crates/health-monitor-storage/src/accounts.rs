//! Users, doctor profiles and doctor-patient links

use chrono::Utc;
use sled::transaction::{abort, ConflictableTransactionResult, Transactional};
use sled::Tree;

use health_monitor_core::repository::{DoctorRepository, UserRepository};
use health_monitor_core::{DoctorProfile, RecordId, StoreError, StoreResult, User, UserDraft};

use crate::keys::{decode_id, decode_pair_suffix, id_key, pair_key};
use crate::{db_err, tx_result, SledStore};

const EMPTY: &[u8] = &[];

fn email_taken(email: &str) -> StoreError {
    StoreError::Conflict(format!("email {} is already registered", email))
}

impl SledStore {
    fn load_user(&self, id: RecordId) -> StoreResult<User> {
        let bytes = self
            .users
            .get(id_key(id))
            .map_err(db_err)?
            .ok_or_else(|| StoreError::not_found("user", id))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl UserRepository for SledStore {
    fn create(&self, draft: UserDraft) -> StoreResult<User> {
        let user = User {
            id: self.next_id()?,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            password_hash: draft.password_hash,
            is_doctor: draft.is_doctor,
            created_at: Utc::now(),
        };
        let key = id_key(user.id);
        let bytes = serde_json::to_vec(&user)?;
        let email = user.email.as_str();

        tx_result((&self.users, &self.users_by_email).transaction(
            |(users, by_email)| -> ConflictableTransactionResult<(), StoreError> {
                if by_email.get(email.as_bytes())?.is_some() {
                    return abort(email_taken(email));
                }
                by_email.insert(email.as_bytes(), &key[..])?;
                users.insert(&key[..], bytes.as_slice())?;
                Ok(())
            },
        ))?;

        tracing::debug!(user_id = user.id, "Stored user");
        Ok(user)
    }

    fn get(&self, id: RecordId) -> StoreResult<User> {
        self.load_user(id)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let Some(id) = self.users_by_email.get(email.as_bytes()).map_err(db_err)? else {
            return Ok(None);
        };
        match self.load_user(decode_id(&id)?) {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn update(&self, user: &User) -> StoreResult<()> {
        let previous = self.load_user(user.id)?;
        let key = id_key(user.id);
        let bytes = serde_json::to_vec(user)?;
        let email = user.email.as_str();
        let old_email = previous.email.as_str();

        tx_result((&self.users, &self.users_by_email).transaction(
            |(users, by_email)| -> ConflictableTransactionResult<(), StoreError> {
                if email != old_email {
                    if let Some(owner) = by_email.get(email.as_bytes())? {
                        if owner[..] != key[..] {
                            return abort(email_taken(email));
                        }
                    }
                    by_email.remove(old_email.as_bytes())?;
                    by_email.insert(email.as_bytes(), &key[..])?;
                }
                users.insert(&key[..], bytes.as_slice())?;
                Ok(())
            },
        ))
    }

    fn delete(&self, id: RecordId) -> StoreResult<()> {
        let previous = self.load_user(id)?;
        let key = id_key(id);
        let email = previous.email.as_str();

        tx_result((&self.users, &self.users_by_email).transaction(
            |(users, by_email)| -> ConflictableTransactionResult<(), StoreError> {
                users.remove(&key[..])?;
                by_email.remove(email.as_bytes())?;
                Ok(())
            },
        ))?;

        tracing::debug!(user_id = id, "Removed user");
        Ok(())
    }
}

/// Second ids of every pair key starting with `first`
fn linked_ids(tree: &Tree, first: RecordId) -> StoreResult<Vec<RecordId>> {
    tree.scan_prefix(id_key(first))
        .keys()
        .map(|key| decode_pair_suffix(&key.map_err(db_err)?))
        .collect()
}

impl DoctorRepository for SledStore {
    fn save_profile(&self, profile: &DoctorProfile) -> StoreResult<()> {
        let bytes = serde_json::to_vec(profile)?;
        self.doctor_profiles
            .insert(id_key(profile.user_id), bytes)
            .map_err(db_err)?;
        Ok(())
    }

    fn profile(&self, user_id: RecordId) -> StoreResult<Option<DoctorProfile>> {
        match self.doctor_profiles.get(id_key(user_id)).map_err(db_err)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn assign_patient(&self, doctor_id: RecordId, patient_id: RecordId) -> StoreResult<()> {
        let forward = pair_key(doctor_id, patient_id);
        let reverse = pair_key(patient_id, doctor_id);

        tx_result((&self.doctor_patients, &self.patient_doctors).transaction(
            |(patients, doctors)| -> ConflictableTransactionResult<(), StoreError> {
                patients.insert(&forward[..], EMPTY)?;
                doctors.insert(&reverse[..], EMPTY)?;
                Ok(())
            },
        ))
    }

    fn is_assigned(&self, doctor_id: RecordId, patient_id: RecordId) -> StoreResult<bool> {
        self.doctor_patients
            .contains_key(pair_key(doctor_id, patient_id))
            .map_err(db_err)
    }

    fn patient_ids(&self, doctor_id: RecordId) -> StoreResult<Vec<RecordId>> {
        linked_ids(&self.doctor_patients, doctor_id)
    }

    fn remove_user(&self, user_id: RecordId) -> StoreResult<()> {
        let patients = linked_ids(&self.doctor_patients, user_id)?;
        let doctors = linked_ids(&self.patient_doctors, user_id)?;

        tx_result(
            (&self.doctor_profiles, &self.doctor_patients, &self.patient_doctors).transaction(
                |(profiles, forward, reverse)| -> ConflictableTransactionResult<(), StoreError> {
                    profiles.remove(&id_key(user_id)[..])?;
                    for &patient in &patients {
                        forward.remove(&pair_key(user_id, patient)[..])?;
                        reverse.remove(&pair_key(patient, user_id)[..])?;
                    }
                    for &doctor in &doctors {
                        forward.remove(&pair_key(doctor, user_id)[..])?;
                        reverse.remove(&pair_key(user_id, doctor)[..])?;
                    }
                    Ok(())
                },
            ),
        )?;

        tracing::debug!(
            user_id,
            patients = patients.len(),
            doctors = doctors.len(),
            "Removed doctor links"
        );
        Ok(())
    }
}
