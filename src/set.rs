pub trait SequentialSet<K: Ord> {
    fn new() -> Self;

    /// Insert key into the set.
    ///
    /// If success, return true.
    /// If the key already exists, return false and leave the set untouched.
    fn insert(&mut self, key: K) -> bool;

    /// Return true if the key is in the set.
    fn search(&self, key: &K) -> bool;

    /// Remove key from the set.
    ///
    /// If success, return true.
    /// If the key does not exist, return false.
    fn remove(&mut self, key: &K) -> bool;
}

pub trait ConcurrentSet<K: Ord> {
    fn new() -> Self;

    /// Return true if the key is in the set.
    ///
    /// Only takes the shared side of the lock, so searches run in parallel.
    fn search(&self, key: &K) -> bool;

    /// Insert key into the set.
    ///
    /// If success, return true.
    /// If the key already exists, return false.
    fn insert(&self, key: K) -> bool;

    /// Remove key from the set.
    ///
    /// If success, return true.
    /// If the key does not exist, return false.
    fn remove(&self, key: &K) -> bool;
}
