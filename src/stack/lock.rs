use parking_lot::lock_api::{RawRwLock, RwLock};

use crate::lock::DefaultRawRwLock;

use super::{ConcurrentStack, Stack};

pub struct RwLockStack<V, R: RawRwLock = DefaultRawRwLock> {
    stack: RwLock<R, Stack<V>>,
}

impl<V, R: RawRwLock> ConcurrentStack<V> for RwLockStack<V, R> {
    fn new() -> Self {
        Self {
            stack: RwLock::new(Stack::new()),
        }
    }

    fn push(&self, value: V) {
        self.stack.write().push(value);
    }

    fn pop(&self) -> Option<V> {
        self.stack.write().pop()
    }
}

impl<V, R: RawRwLock> RwLockStack<V, R> {
    pub fn len(&self) -> usize {
        self.stack.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.read().is_empty()
    }

    /// Count the reachable nodes by walking the whole stack under the shared lock.
    pub fn count_nodes(&self) -> usize {
        self.stack.read().iter().count()
    }
}

impl<V: PartialEq, R: RawRwLock> RwLockStack<V, R> {
    pub fn search(&self, value: &V) -> bool {
        self.stack.read().search(value)
    }
}

impl<V: Clone, R: RawRwLock> RwLockStack<V, R> {
    pub fn top(&self) -> Option<V> {
        self.stack.read().top().cloned()
    }
}
