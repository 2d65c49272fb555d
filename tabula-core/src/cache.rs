use crate::{OrmError, Result};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// Key-value store used to cache query results.
pub trait CacheStore<V>: Send + Sync {
    fn put(&self, key: &str, value: V) -> Result<()>;

    /// Value stored under `key`, [`OrmError::NotFound`] on a miss.
    fn get(&self, key: &str) -> Result<V>;

    fn del(&self, key: &str) -> Result<()>;
}

/// In-process [`CacheStore`] behind a single lock.
#[derive(Debug)]
pub struct MemoryStore<V> {
    store: RwLock<HashMap<String, V>>,
}

impl<V> MemoryStore<V> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync> CacheStore<V> for MemoryStore<V> {
    fn put(&self, key: &str, value: V) -> Result<()> {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn get(&self, key: &str) -> Result<V> {
        self.store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| OrmError::NotFound(key.to_owned()).into())
    }

    fn del(&self, key: &str) -> Result<()> {
        self.store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
