use cosmwasm_schema::cw_serde;
use cosmwasm_std::Storage;
use cw_storage_plus::{Item, Map};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

#[cw_serde]
pub struct VectorInfo {
    pub bucket_size: u64,
    pub len: u64,
}

impl VectorInfo {
    pub fn bucket_index(&self, index: u64) -> (u64, u64) {
        bucket_index(self.bucket_size, index)
    }
}

/// Bucket holding the element at `index`, and its offset inside that bucket
pub const fn bucket_index(bucket_size: u64, index: u64) -> (u64, u64) {
    (index / bucket_size, index % bucket_size)
}

/// A vector split into fixed-size buckets, each stored under its own key.
///
/// Every bucket but the last is always full. Removal is swap-remove only:
/// order is not preserved, in exchange each operation touches at most two
/// buckets.
pub struct BigVector<'a, T> {
    info: Item<'a, VectorInfo>,
    buckets: Map<'a, u64, Vec<T>>,
}

impl<'a, T> BigVector<'a, T> {
    pub const fn new(info_namespace: &'a str, buckets_namespace: &'a str) -> Self {
        BigVector {
            info: Item::new(info_namespace),
            buckets: Map::new(buckets_namespace),
        }
    }
}

impl<'a, T> BigVector<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn init(&self, store: &mut dyn Storage, bucket_size: u64) -> Result<(), StorageError> {
        if bucket_size == 0 {
            return Err(StorageError::ZeroBucketSize {});
        }
        if self.info.may_load(store)?.is_some() {
            return Err(StorageError::AlreadyInitialized {});
        }
        self.info.save(store, &VectorInfo { bucket_size, len: 0 })?;
        Ok(())
    }

    pub fn is_initialized(&self, store: &dyn Storage) -> Result<bool, StorageError> {
        Ok(self.info.may_load(store)?.is_some())
    }

    pub fn info(&self, store: &dyn Storage) -> Result<VectorInfo, StorageError> {
        self.info.may_load(store)?.ok_or(StorageError::NotInitialized {})
    }

    pub fn length(&self, store: &dyn Storage) -> Result<u64, StorageError> {
        Ok(self.info(store)?.len)
    }

    pub fn is_empty(&self, store: &dyn Storage) -> Result<bool, StorageError> {
        Ok(self.length(store)? == 0)
    }

    pub fn push_back(&self, store: &mut dyn Storage, item: T) -> Result<(), StorageError> {
        let mut info = self.info(store)?;
        let (bucket_id, _) = info.bucket_index(info.len);

        let mut bucket = self.buckets.may_load(store, bucket_id)?.unwrap_or_default();
        bucket.push(item);
        self.buckets.save(store, bucket_id, &bucket)?;

        info.len += 1;
        self.info.save(store, &info)?;
        Ok(())
    }

    pub fn pop_back(&self, store: &mut dyn Storage) -> Result<Option<T>, StorageError> {
        let mut info = self.info(store)?;
        if info.len == 0 {
            return Ok(None);
        }

        let (bucket_id, _) = info.bucket_index(info.len - 1);
        let mut bucket = self.buckets.load(store, bucket_id)?;
        let item = bucket.pop();
        self.save_bucket(store, bucket_id, &bucket)?;

        info.len -= 1;
        self.info.save(store, &info)?;
        Ok(item)
    }

    pub fn borrow(&self, store: &dyn Storage, index: u64) -> Result<T, StorageError> {
        let info = self.info(store)?;
        check_index(&info, index)?;

        let (bucket_id, offset) = info.bucket_index(index);
        let mut bucket = self.buckets.load(store, bucket_id)?;
        if (offset as usize) < bucket.len() {
            Ok(bucket.swap_remove(offset as usize))
        } else {
            Err(StorageError::IndexOutOfRange {
                index,
                length: info.len,
            })
        }
    }

    /// Removes the element at `index`, moving the last element into its slot
    pub fn swap_remove(&self, store: &mut dyn Storage, index: u64) -> Result<T, StorageError> {
        let mut info = self.info(store)?;
        check_index(&info, index)?;

        let (last_bucket_id, _) = info.bucket_index(info.len - 1);
        let mut last_bucket = self.buckets.load(store, last_bucket_id)?;
        let last = last_bucket.pop().ok_or(StorageError::IndexOutOfRange {
            index,
            length: info.len,
        })?;

        let (bucket_id, offset) = info.bucket_index(index);
        let removed = if index == info.len - 1 {
            last
        } else if bucket_id == last_bucket_id {
            let slot = last_bucket
                .get_mut(offset as usize)
                .ok_or(StorageError::IndexOutOfRange {
                    index,
                    length: info.len,
                })?;
            std::mem::replace(slot, last)
        } else {
            let mut bucket = self.buckets.load(store, bucket_id)?;
            let slot = bucket
                .get_mut(offset as usize)
                .ok_or(StorageError::IndexOutOfRange {
                    index,
                    length: info.len,
                })?;
            let removed = std::mem::replace(slot, last);
            self.buckets.save(store, bucket_id, &bucket)?;
            removed
        };
        self.save_bucket(store, last_bucket_id, &last_bucket)?;

        info.len -= 1;
        self.info.save(store, &info)?;
        Ok(removed)
    }

    fn save_bucket(
        &self,
        store: &mut dyn Storage,
        bucket_id: u64,
        bucket: &Vec<T>,
    ) -> Result<(), StorageError> {
        if bucket.is_empty() {
            self.buckets.remove(store, bucket_id);
        } else {
            self.buckets.save(store, bucket_id, bucket)?;
        }
        Ok(())
    }
}

fn check_index(info: &VectorInfo, index: u64) -> Result<(), StorageError> {
    if index >= info.len {
        return Err(StorageError::IndexOutOfRange {
            index,
            length: info.len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    const VECTOR: BigVector<u64> = BigVector::new("vec", "vec__buckets");

    fn setup(bucket_size: u64, items: u64) -> MockStorage {
        let mut store = MockStorage::new();
        VECTOR.init(&mut store, bucket_size).unwrap();
        for i in 0..items {
            VECTOR.push_back(&mut store, i).unwrap();
        }
        store
    }

    fn contents(store: &MockStorage) -> Vec<u64> {
        let len = VECTOR.length(store).unwrap();
        (0..len).map(|i| VECTOR.borrow(store, i).unwrap()).collect()
    }

    #[test]
    fn zero_bucket_size() {
        let mut store = MockStorage::new();
        assert_eq!(
            VECTOR.init(&mut store, 0).unwrap_err(),
            StorageError::ZeroBucketSize {}
        );
        assert!(!VECTOR.is_initialized(&store).unwrap());
    }

    #[test]
    fn index_resolution() {
        assert_eq!(bucket_index(4, 0), (0, 0));
        assert_eq!(bucket_index(4, 3), (0, 3));
        assert_eq!(bucket_index(4, 4), (1, 0));
        assert_eq!(bucket_index(4, 11), (2, 3));
        assert_eq!(bucket_index(1, 7), (7, 0));
    }

    #[test]
    fn push_opens_new_buckets() {
        let store = setup(3, 7);

        assert_eq!(VECTOR.length(&store).unwrap(), 7);
        assert_eq!(contents(&store), vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(VECTOR.buckets.load(&store, 0).unwrap().len(), 3);
        assert_eq!(VECTOR.buckets.load(&store, 2).unwrap(), vec![6]);
        assert!(VECTOR.buckets.may_load(&store, 3).unwrap().is_none());
    }

    #[test]
    fn swap_remove_moves_last_element() {
        let mut store = setup(3, 7);

        // from another bucket
        assert_eq!(VECTOR.swap_remove(&mut store, 1).unwrap(), 1);
        assert_eq!(contents(&store), vec![0, 6, 2, 3, 4, 5]);
        // last bucket emptied and dropped
        assert!(VECTOR.buckets.may_load(&store, 2).unwrap().is_none());

        // within the last bucket
        assert_eq!(VECTOR.swap_remove(&mut store, 3).unwrap(), 3);
        assert_eq!(contents(&store), vec![0, 6, 2, 5, 4]);

        // the tail itself
        assert_eq!(VECTOR.swap_remove(&mut store, 4).unwrap(), 4);
        assert_eq!(contents(&store), vec![0, 6, 2, 5]);
        assert_eq!(VECTOR.length(&store).unwrap(), 4);
    }

    #[test]
    fn out_of_range() {
        let mut store = setup(2, 3);

        assert_eq!(
            VECTOR.swap_remove(&mut store, 3).unwrap_err(),
            StorageError::IndexOutOfRange {
                index: 3,
                length: 3
            }
        );
        assert_eq!(
            VECTOR.borrow(&store, 10).unwrap_err(),
            StorageError::IndexOutOfRange {
                index: 10,
                length: 3
            }
        );
        assert_eq!(VECTOR.length(&store).unwrap(), 3);
    }

    #[test]
    fn drain_to_empty() {
        let mut store = setup(4, 10);

        let mut removed = vec![];
        while !VECTOR.is_empty(&store).unwrap() {
            let len = VECTOR.length(&store).unwrap();
            removed.push(VECTOR.swap_remove(&mut store, len / 2).unwrap());
            assert_eq!(VECTOR.length(&store).unwrap(), len - 1);
        }

        removed.sort_unstable();
        assert_eq!(removed, (0..10).collect::<Vec<_>>());
        assert!(VECTOR.buckets.may_load(&store, 0).unwrap().is_none());

        // reusable once drained
        VECTOR.push_back(&mut store, 42).unwrap();
        assert_eq!(contents(&store), vec![42]);
    }

    #[test]
    fn pop_back() {
        let mut store = setup(2, 3);

        assert_eq!(VECTOR.pop_back(&mut store).unwrap(), Some(2));
        assert_eq!(VECTOR.pop_back(&mut store).unwrap(), Some(1));
        assert_eq!(VECTOR.pop_back(&mut store).unwrap(), Some(0));
        assert_eq!(VECTOR.pop_back(&mut store).unwrap(), None);
        assert!(VECTOR.is_empty(&store).unwrap());
    }
}
