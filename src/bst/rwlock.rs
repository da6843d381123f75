use parking_lot::lock_api::{RawRwLock, RwLock};

use crate::lock::DefaultRawRwLock;
use crate::set::{ConcurrentSet, SequentialSet};

use super::Tree;

/// Binary search tree guarded by one reader-writer lock.
///
/// `insert` and `remove` first check the key under the shared lock and bail out early.
/// The check is repeated by the sequential tree under the exclusive lock, so a key inserted
/// or removed by another thread in between is never inserted twice or removed twice.
pub struct RwLockBST<K, R: RawRwLock = DefaultRawRwLock> {
    tree: RwLock<R, Tree<K>>,
}

impl<K: Ord, R: RawRwLock> ConcurrentSet<K> for RwLockBST<K, R> {
    fn new() -> Self {
        Self {
            tree: RwLock::new(Tree::new()),
        }
    }

    fn search(&self, key: &K) -> bool {
        self.tree.read().search(key)
    }

    fn insert(&self, key: K) -> bool {
        if self.search(&key) {
            return false;
        }

        self.tree.write().insert(key)
    }

    fn remove(&self, key: &K) -> bool {
        if !self.search(key) {
            return false;
        }

        self.tree.write().remove(key)
    }
}

impl<K: Clone, R: RawRwLock> RwLockBST<K, R> {
    /// Snapshot of the keys in order.
    pub fn keys(&self) -> Vec<K> {
        self.tree.read().keys().into_iter().cloned().collect()
    }

    pub fn root(&self) -> Option<K> {
        self.tree.read().root().cloned()
    }
}

impl<K, R: RawRwLock> RwLockBST<K, R> {
    pub fn height(&self) -> usize {
        self.tree.read().height()
    }
}
