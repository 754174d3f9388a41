//! Key encoding
//!
//! Ids are stored big-endian so that sled's lexicographic key order matches
//! numeric order. Composite keys are two ids back to back, which makes
//! `scan_prefix(first)` return every second id in ascending order.

use health_monitor_core::{RecordId, StoreError, StoreResult};

pub(crate) const ID_LEN: usize = 8;

pub(crate) fn id_key(id: RecordId) -> [u8; ID_LEN] {
    id.to_be_bytes()
}

pub(crate) fn pair_key(first: RecordId, second: RecordId) -> [u8; ID_LEN * 2] {
    let mut key = [0u8; ID_LEN * 2];
    key[..ID_LEN].copy_from_slice(&first.to_be_bytes());
    key[ID_LEN..].copy_from_slice(&second.to_be_bytes());
    key
}

pub(crate) fn decode_id(bytes: &[u8]) -> StoreResult<RecordId> {
    let raw: [u8; ID_LEN] = bytes
        .try_into()
        .map_err(|_| StoreError::Serialization(format!("malformed id key of {} bytes", bytes.len())))?;
    Ok(RecordId::from_be_bytes(raw))
}

/// The second id of a [`pair_key`]
pub(crate) fn decode_pair_suffix(key: &[u8]) -> StoreResult<RecordId> {
    if key.len() != ID_LEN * 2 {
        return Err(StoreError::Serialization(format!(
            "malformed composite key of {} bytes",
            key.len()
        )));
    }
    decode_id(&key[ID_LEN..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(decode_id(&[1, 2, 3]).is_err());
        assert!(decode_pair_suffix(&id_key(4)).is_err());
    }

    #[test]
    fn test_pair_suffix() {
        assert_eq!(decode_pair_suffix(&pair_key(3, 900)).unwrap(), 900);
    }

    proptest! {
        #[test]
        fn prop_key_order_matches_id_order(a in any::<u64>(), b in any::<u64>()) {
            prop_assert_eq!(a.cmp(&b), id_key(a).cmp(&id_key(b)));
            prop_assert_eq!(decode_id(&id_key(a)).unwrap(), a);
        }

        #[test]
        fn prop_pair_keys_group_by_prefix(owner in any::<u64>(), a in any::<u64>(), b in any::<u64>()) {
            let (ka, kb) = (pair_key(owner, a), pair_key(owner, b));
            prop_assert!(ka.starts_with(&id_key(owner)));
            prop_assert_eq!(a.cmp(&b), ka.cmp(&kb));
        }
    }
}
