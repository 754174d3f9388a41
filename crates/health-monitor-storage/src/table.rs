//! Tables of records owned by a user
//!
//! A [`UserTable`] is a pair of trees: `records` maps id to the JSON record,
//! `by_user` holds one empty-valued `(owner, id)` key per record. Both are
//! written in the same transaction.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sled::transaction::{ConflictableTransactionResult, TransactionalTree, Transactional};
use sled::{Db, Tree};
use std::marker::PhantomData;

use health_monitor_core::{
    HealthRecord, MedicineReminder, RecommendationAuditRecord, RecordId, StoreError, StoreResult,
};

use crate::keys::{decode_pair_suffix, id_key, pair_key};
use crate::{db_err, tx_result};

const EMPTY: &[u8] = &[];

/// A record with an id and an owning user
pub(crate) trait Owned {
    fn id(&self) -> RecordId;
    fn owner(&self) -> RecordId;
}

impl Owned for HealthRecord {
    fn id(&self) -> RecordId {
        self.id
    }
    fn owner(&self) -> RecordId {
        self.user_id
    }
}

impl Owned for MedicineReminder {
    fn id(&self) -> RecordId {
        self.id
    }
    fn owner(&self) -> RecordId {
        self.user_id
    }
}

impl Owned for RecommendationAuditRecord {
    fn id(&self) -> RecordId {
        self.id
    }
    fn owner(&self) -> RecordId {
        self.user_id
    }
}

pub(crate) struct UserTable<T> {
    entity: &'static str,
    records: Tree,
    by_user: Tree,
    _record: PhantomData<fn() -> T>,
}

impl<T> UserTable<T>
where
    T: Owned + Serialize + DeserializeOwned,
{
    pub(crate) fn open(db: &Db, tree: &str, entity: &'static str) -> StoreResult<Self> {
        Ok(Self {
            entity,
            records: db.open_tree(tree).map_err(db_err)?,
            by_user: db.open_tree(format!("{}_by_user", tree)).map_err(db_err)?,
            _record: PhantomData,
        })
    }

    pub(crate) fn insert(&self, record: &T) -> StoreResult<()> {
        let key = id_key(record.id());
        let index = pair_key(record.owner(), record.id());
        let bytes = serde_json::to_vec(record)?;

        tx_result((&self.records, &self.by_user).transaction(
            |(records, by_user)| -> ConflictableTransactionResult<(), StoreError> {
                records.insert(&key[..], bytes.as_slice())?;
                by_user.insert(&index[..], EMPTY)?;
                Ok(())
            },
        ))
    }

    pub(crate) fn get(&self, id: RecordId) -> StoreResult<T> {
        let bytes = self
            .records
            .get(id_key(id))
            .map_err(db_err)?
            .ok_or_else(|| StoreError::not_found(self.entity, id))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Records of one owner in id order
    pub(crate) fn list(&self, owner: RecordId) -> StoreResult<Vec<T>> {
        let mut out = Vec::new();
        for id in self.ids_for(owner)? {
            match self.get(id) {
                Ok(record) => out.push(record),
                Err(e) if e.is_not_found() => {
                    tracing::warn!(entity = self.entity, id, owner, "Index entry without record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// Overwrite an existing record, moving its index entry if the owner changed
    pub(crate) fn replace(&self, record: &T) -> StoreResult<()> {
        let previous = self.get(record.id())?;
        let key = id_key(record.id());
        let old_index = pair_key(previous.owner(), record.id());
        let new_index = pair_key(record.owner(), record.id());
        let bytes = serde_json::to_vec(record)?;

        tx_result((&self.records, &self.by_user).transaction(
            |(records, by_user)| -> ConflictableTransactionResult<(), StoreError> {
                records.insert(&key[..], bytes.as_slice())?;
                if old_index != new_index {
                    by_user.remove(&old_index[..])?;
                    by_user.insert(&new_index[..], EMPTY)?;
                }
                Ok(())
            },
        ))
    }

    pub(crate) fn remove(&self, id: RecordId) -> StoreResult<()> {
        let previous = self.get(id)?;
        let pairs = [(id, previous.owner())];
        tx_result((&self.records, &self.by_user).transaction(|(records, by_user)| {
            remove_all(records, by_user, &pairs)
        }))
    }

    /// Remove every record of one owner, returning how many went
    pub(crate) fn remove_for(&self, owner: RecordId) -> StoreResult<usize> {
        let pairs: Vec<(RecordId, RecordId)> = self
            .ids_for(owner)?
            .into_iter()
            .map(|id| (id, owner))
            .collect();
        if pairs.is_empty() {
            return Ok(0);
        }

        tx_result((&self.records, &self.by_user).transaction(|(records, by_user)| {
            remove_all(records, by_user, &pairs)
        }))?;
        Ok(pairs.len())
    }

    fn ids_for(&self, owner: RecordId) -> StoreResult<Vec<RecordId>> {
        self.by_user
            .scan_prefix(id_key(owner))
            .keys()
            .map(|key| decode_pair_suffix(&key.map_err(db_err)?))
            .collect()
    }
}

fn remove_all(
    records: &TransactionalTree,
    by_user: &TransactionalTree,
    pairs: &[(RecordId, RecordId)],
) -> ConflictableTransactionResult<(), StoreError> {
    for &(id, owner) in pairs {
        records.remove(&id_key(id)[..])?;
        by_user.remove(&pair_key(owner, id)[..])?;
    }
    Ok(())
}
