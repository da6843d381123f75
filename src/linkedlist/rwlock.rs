use parking_lot::lock_api::{RawRwLock, RwLock};

use crate::lock::DefaultRawRwLock;
use crate::set::{ConcurrentSet, SequentialSet};

use super::SortedList;

pub struct RwLockList<K, R: RawRwLock = DefaultRawRwLock> {
    list: RwLock<R, SortedList<K>>,
}

impl<K: Ord, R: RawRwLock> ConcurrentSet<K> for RwLockList<K, R> {
    fn new() -> Self {
        Self {
            list: RwLock::new(SortedList::new()),
        }
    }

    fn search(&self, key: &K) -> bool {
        self.list.read().search(key)
    }

    // the sorted list re-checks the key under the write lock
    fn insert(&self, key: K) -> bool {
        if self.search(&key) {
            return false;
        }

        self.list.write().insert(key)
    }

    fn remove(&self, key: &K) -> bool {
        if !self.search(key) {
            return false;
        }

        self.list.write().remove(key)
    }
}

impl<K: Clone, R: RawRwLock> RwLockList<K, R> {
    pub fn keys(&self) -> Vec<K> {
        self.list.read().keys().into_iter().cloned().collect()
    }
}

impl<K, R: RawRwLock> RwLockList<K, R> {
    pub fn len(&self) -> usize {
        self.list.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.read().is_empty()
    }
}
