use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_vec, Storage};
use cw_storage_plus::{Item, Map};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StorageError;

/// Average number of entries a bucket should hold
const TARGET_LOAD_PER_BUCKET: u64 = 10;
/// Load factor (percent) above which one bucket is split
const SPLIT_THRESHOLD: u64 = 75;

#[cw_serde]
pub struct TableInfo {
    pub num_buckets: u64,
    pub level: u32,
    pub len: u64,
}

impl TableInfo {
    fn load_factor(&self) -> u64 {
        self.len * 100 / (self.num_buckets * TARGET_LOAD_PER_BUCKET)
    }

    fn bucket_index(&self, hash: u64) -> u64 {
        let index = hash % (1u64 << (self.level + 1));
        if index < self.num_buckets {
            index
        } else {
            hash % (1u64 << self.level)
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Entry<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// A hash table whose entries are spread over buckets stored under their own keys.
///
/// Growth uses linear hashing: whenever the load factor crosses the threshold a
/// single bucket is split in two. Only the entries of that bucket are touched,
/// so the cost of any insert is bounded by one bucket's size.
pub struct BucketTable<'a, K, V> {
    info: Item<'a, TableInfo>,
    buckets: Map<'a, u64, Vec<Entry<K, V>>>,
}

impl<'a, K, V> BucketTable<'a, K, V> {
    pub const fn new(info_namespace: &'a str, buckets_namespace: &'a str) -> Self {
        BucketTable {
            info: Item::new(info_namespace),
            buckets: Map::new(buckets_namespace),
        }
    }
}

impl<'a, K, V> BucketTable<'a, K, V>
where
    K: Serialize + DeserializeOwned + PartialEq,
    V: Serialize + DeserializeOwned,
{
    /// Creates an empty table with `initial_buckets` buckets
    pub fn init(&self, store: &mut dyn Storage, initial_buckets: u64) -> Result<(), StorageError> {
        if initial_buckets == 0 {
            return Err(StorageError::ZeroBuckets {});
        }
        if self.info.may_load(store)?.is_some() {
            return Err(StorageError::AlreadyInitialized {});
        }

        let mut info = TableInfo {
            num_buckets: 1,
            level: 0,
            len: 0,
        };
        for _ in 1..initial_buckets {
            self.split_one_bucket(store, &mut info)?;
        }
        self.info.save(store, &info)?;

        Ok(())
    }

    pub fn is_initialized(&self, store: &dyn Storage) -> Result<bool, StorageError> {
        Ok(self.info.may_load(store)?.is_some())
    }

    pub fn info(&self, store: &dyn Storage) -> Result<TableInfo, StorageError> {
        self.info.may_load(store)?.ok_or(StorageError::NotInitialized {})
    }

    pub fn len(&self, store: &dyn Storage) -> Result<u64, StorageError> {
        Ok(self.info(store)?.len)
    }

    pub fn is_empty(&self, store: &dyn Storage) -> Result<bool, StorageError> {
        Ok(self.len(store)? == 0)
    }

    pub fn num_buckets(&self, store: &dyn Storage) -> Result<u64, StorageError> {
        Ok(self.info(store)?.num_buckets)
    }

    /// Inserts a new entry. Fails without touching the stored value if `key` exists.
    pub fn add(&self, store: &mut dyn Storage, key: K, value: V) -> Result<(), StorageError> {
        let mut info = self.info(store)?;
        let hash = hash_key(&key)?;
        let index = info.bucket_index(hash);

        let mut bucket = self.bucket(store, index)?;
        if bucket.iter().any(|entry| entry.key == key) {
            return Err(StorageError::DuplicateKey {});
        }
        bucket.push(Entry { hash, key, value });
        self.save_bucket(store, index, bucket)?;

        info.len += 1;
        if info.load_factor() > SPLIT_THRESHOLD {
            self.split_one_bucket(store, &mut info)?;
        }
        self.info.save(store, &info)?;

        Ok(())
    }

    pub fn contains(&self, store: &dyn Storage, key: &K) -> Result<bool, StorageError> {
        Ok(self.locate(store, key)?.1.is_some())
    }

    pub fn may_load(&self, store: &dyn Storage, key: &K) -> Result<Option<V>, StorageError> {
        let (index, position) = self.locate(store, key)?;
        match position {
            Some(position) => {
                let mut bucket = self.bucket(store, index)?;
                Ok(Some(bucket.swap_remove(position).value))
            }
            None => Ok(None),
        }
    }

    pub fn load(&self, store: &dyn Storage, key: &K) -> Result<V, StorageError> {
        self.may_load(store, key)?.ok_or(StorageError::KeyNotFound {})
    }

    /// Replaces the value under an existing `key` with the result of `action`.
    /// Nothing is written if `action` fails.
    pub fn update<A, E>(&self, store: &mut dyn Storage, key: &K, action: A) -> Result<V, E>
    where
        A: FnOnce(&V) -> Result<V, E>,
        E: From<StorageError>,
        V: Clone,
    {
        let (index, position) = self.locate(store, key)?;
        let position = position.ok_or(StorageError::KeyNotFound {})?;

        let mut bucket = self.bucket(store, index)?;
        let entry = bucket
            .get_mut(position)
            .ok_or(StorageError::KeyNotFound {})?;
        let value = action(&entry.value)?;
        entry.value = value.clone();
        self.save_bucket(store, index, bucket)?;

        Ok(value)
    }

    pub fn remove(&self, store: &mut dyn Storage, key: &K) -> Result<V, StorageError> {
        let mut info = self.info(store)?;
        let (index, position) = self.locate(store, key)?;
        let position = position.ok_or(StorageError::KeyNotFound {})?;

        let mut bucket = self.bucket(store, index)?;
        let entry = bucket.swap_remove(position);
        self.save_bucket(store, index, bucket)?;

        info.len -= 1;
        self.info.save(store, &info)?;

        Ok(entry.value)
    }

    /// Bucket index of `key` and its position inside that bucket, if present
    fn locate(&self, store: &dyn Storage, key: &K) -> Result<(u64, Option<usize>), StorageError> {
        let info = self.info(store)?;
        let index = info.bucket_index(hash_key(key)?);
        let position = self
            .bucket(store, index)?
            .iter()
            .position(|entry| &entry.key == key);

        Ok((index, position))
    }

    fn bucket(&self, store: &dyn Storage, index: u64) -> Result<Vec<Entry<K, V>>, StorageError> {
        Ok(self.buckets.may_load(store, index)?.unwrap_or_default())
    }

    fn save_bucket(
        &self,
        store: &mut dyn Storage,
        index: u64,
        bucket: Vec<Entry<K, V>>,
    ) -> Result<(), StorageError> {
        if bucket.is_empty() {
            self.buckets.remove(store, index);
        } else {
            self.buckets.save(store, index, &bucket)?;
        }
        Ok(())
    }

    /// Appends one bucket and moves into it the entries of its sibling that now hash there
    fn split_one_bucket(
        &self,
        store: &mut dyn Storage,
        info: &mut TableInfo,
    ) -> Result<(), StorageError> {
        let new_index = info.num_buckets;
        let to_split = new_index ^ (1u64 << info.level);
        info.num_buckets = new_index + 1;
        if to_split + 1 == 1u64 << info.level {
            info.level += 1;
        }

        let (moved, kept): (Vec<_>, Vec<_>) = self
            .bucket(store, to_split)?
            .into_iter()
            .partition(|entry| info.bucket_index(entry.hash) == new_index);

        self.save_bucket(store, to_split, kept)?;
        self.save_bucket(store, new_index, moved)?;

        Ok(())
    }
}

/// First 8 bytes of the sha256 digest of the key's JSON encoding
fn hash_key<K: Serialize>(key: &K) -> Result<u64, StorageError> {
    let digest = Sha256::digest(to_vec(key)?);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    Ok(u64::from_be_bytes(head))
}
