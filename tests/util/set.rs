use std::collections::BTreeSet;

use crossbeam_utils::thread;
use parking_lot::lock_api::RawRwLock;
use rand::{thread_rng, Rng};
use rwbench::bst::RwLockBST;
use rwbench::linkedlist::RwLockList;
use rwbench::set::{ConcurrentSet, SequentialSet};

use super::assert_strictly_ascending;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Operation {
    Insert,
    Search,
    Remove,
}

const OPS: [Operation; 3] = [Operation::Insert, Operation::Search, Operation::Remove];

/// Snapshot of the keys of a concurrent set, in ascending order.
pub trait Snapshot {
    fn snapshot(&self) -> Vec<u64>;
}

impl<R: RawRwLock> Snapshot for RwLockBST<u64, R> {
    fn snapshot(&self) -> Vec<u64> {
        self.keys()
    }
}

impl<R: RawRwLock> Snapshot for RwLockList<u64, R> {
    fn snapshot(&self) -> Vec<u64> {
        self.keys()
    }
}

/// Drive the set with random operations on keys in `[0, key_range)` and compare every result
/// with `BTreeSet`.
pub fn stress_sequential<S: SequentialSet<u64>>(iter: u64, key_range: u64) -> S {
    let mut set = S::new();
    let mut reference = BTreeSet::new();
    let mut rng = thread_rng();

    for i in 0..iter {
        let key = rng.gen_range(0..key_range);
        let op = OPS[rng.gen_range(0..OPS.len())];

        match op {
            Operation::Insert => {
                let expected = reference.insert(key);
                assert_eq!(set.insert(key), expected, "[{:0>10}] Insert({})", i, key);
            }
            Operation::Search => {
                let expected = reference.contains(&key);
                assert_eq!(set.search(&key), expected, "[{:0>10}] Search({})", i, key);
            }
            Operation::Remove => {
                let expected = reference.remove(&key);
                assert_eq!(set.remove(&key), expected, "[{:0>10}] Remove({})", i, key);
            }
        }
    }

    for key in 0..key_range {
        assert_eq!(set.search(&key), reference.contains(&key), "final Search({})", key);
    }

    set
}

struct Sequentialized<C> {
    inner: C,
}

impl<C: ConcurrentSet<u64>> SequentialSet<u64> for Sequentialized<C> {
    fn new() -> Self {
        Self { inner: C::new() }
    }

    fn insert(&mut self, key: u64) -> bool {
        self.inner.insert(key)
    }

    fn search(&self, key: &u64) -> bool {
        self.inner.search(key)
    }

    fn remove(&mut self, key: &u64) -> bool {
        self.inner.remove(key)
    }
}

/// Same as `stress_sequential`, through the concurrent interface of a single thread.
pub fn stress_concurrent_as_sequential<C>(iter: u64, key_range: u64)
where
    C: ConcurrentSet<u64> + Snapshot,
{
    let set = stress_sequential::<Sequentialized<C>>(iter, key_range);
    assert_strictly_ascending(&set.inner.snapshot());
}

/// Every thread inserts its own disjoint block of keys. None of the inserts may be lost.
pub fn insert_disjoint<C>(thread_num: u64, per_thread: u64)
where
    C: Sync + ConcurrentSet<u64> + Snapshot,
{
    let set = C::new();

    thread::scope(|s| {
        for t in 0..thread_num {
            let set = &set;

            s.spawn(move |_| {
                for key in (t * per_thread)..((t + 1) * per_thread) {
                    assert!(set.insert(key));
                }
            });
        }
    })
    .unwrap();

    let expected: Vec<u64> = (0..thread_num * per_thread).collect();
    assert_eq!(set.snapshot(), expected);
}

/// Threads hammer one shared key range with mixed operations.
///
/// Afterwards the keys must still be strictly ascending, and per key the successful inserts
/// minus the successful removes of all threads must match whether the key is present.
pub fn stress_concurrent<C>(iter: u64, thread_num: u64, key_range: u64)
where
    C: Sync + ConcurrentSet<u64> + Snapshot,
{
    let set = C::new();

    let balances = thread::scope(|s| {
        let mut threads = Vec::new();

        for _ in 0..thread_num {
            let t = s.spawn(|_| {
                let mut rng = thread_rng();
                let mut balance = vec![0i64; key_range as usize];

                for _ in 0..iter {
                    let key = rng.gen_range(0..key_range);

                    match OPS[rng.gen_range(0..OPS.len())] {
                        Operation::Insert => {
                            if set.insert(key) {
                                balance[key as usize] += 1;
                            }
                        }
                        Operation::Search => {
                            let _ = set.search(&key);
                        }
                        Operation::Remove => {
                            if set.remove(&key) {
                                balance[key as usize] -= 1;
                            }
                        }
                    }
                }

                balance
            });

            threads.push(t);
        }

        threads
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    })
    .unwrap();

    let keys = set.snapshot();
    assert_strictly_ascending(&keys);

    for key in 0..key_range {
        let balance: i64 = balances.iter().map(|b| b[key as usize]).sum();
        let present = keys.binary_search(&key).is_ok();

        // successful inserts and removes of one key alternate, starting from absent
        assert_eq!(balance, present as i64, "key {} balance {}", key, balance);
        assert_eq!(set.search(&key), present);
    }
}
